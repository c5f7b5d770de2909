use crate::statement::{Statement, StatementKind, StmtId};
use crate::{ModelError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// Package-private.
    Default,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Default => "default",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and visibility data for one procedure as the front end resolved it.
/// The signature string is the stable identity across the whole analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcedureRef {
    pub signature: String,
    pub type_name: String,
    pub visibility: Visibility,
    pub is_application_code: bool,
}

impl ProcedureRef {
    pub fn new(
        signature: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
        is_application_code: bool,
    ) -> Self {
        Self {
            signature: signature.into(),
            type_name: type_name.into(),
            visibility,
            is_application_code,
        }
    }
}

/// Statement-level CFG of one procedure. May contain cycles and multiple heads
/// (exception handlers enter mid-body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureBody {
    pub statements: Vec<Statement>,
    pub heads: Vec<StmtId>,
}

impl ProcedureBody {
    pub fn new(statements: Vec<Statement>, heads: Vec<StmtId>) -> Self {
        Self { statements, heads }
    }

    pub fn statement(&self, id: StmtId) -> Option<&Statement> {
        self.statements.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    fn contains(&self, id: StmtId) -> bool {
        (id.0 as usize) < self.statements.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    #[serde(flatten)]
    pub reference: ProcedureRef,
    #[serde(default)]
    pub body: Option<ProcedureBody>,
}

impl Procedure {
    pub fn new(reference: ProcedureRef, body: Option<ProcedureBody>) -> Self {
        Self { reference, body }
    }

    pub fn signature(&self) -> &str {
        &self.reference.signature
    }

    pub fn has_active_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Immutable registry of every procedure the front end loaded, keyed by signature.
/// Built once before analysis begins; all analyses read it as a snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<Procedure>")]
pub struct Program {
    procedures: IndexMap<String, Procedure>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_procedures(procedures: Vec<Procedure>) -> Self {
        let mut program = Self::new();
        for procedure in procedures {
            program.insert(procedure);
        }
        program
    }

    /// First-seen wins on duplicate signatures, keeping load order deterministic.
    pub fn insert(&mut self, procedure: Procedure) {
        self.procedures
            .entry(procedure.signature().to_string())
            .or_insert(procedure);
    }

    pub fn procedure(&self, signature: &str) -> Option<&Procedure> {
        self.procedures.get(signature)
    }

    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.values()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Reject bodies whose heads, successor lists, or branch targets name statements
    /// that do not exist. Analyses assume every id resolves.
    pub fn validate(&self) -> Result<()> {
        for procedure in self.procedures.values() {
            let Some(body) = procedure.body.as_ref() else {
                continue;
            };
            let signature = procedure.signature();

            for &head in &body.heads {
                if !body.contains(head) {
                    return Err(ModelError::DanglingHead {
                        procedure: signature.to_string(),
                        head,
                    });
                }
            }

            for (index, statement) in body.statements.iter().enumerate() {
                let id = StmtId(index as u32);
                let targets = kind_targets(&statement.kind);
                for &target in statement.succs.iter().chain(targets.iter()) {
                    if !body.contains(target) {
                        return Err(ModelError::DanglingTarget {
                            procedure: signature.to_string(),
                            statement: id,
                            target,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Procedure>> for Program {
    fn from(procedures: Vec<Procedure>) -> Self {
        Self::from_procedures(procedures)
    }
}

fn kind_targets(kind: &StatementKind) -> Vec<StmtId> {
    match kind {
        StatementKind::Branch {
            then_target,
            else_target,
            ..
        } => vec![*then_target, *else_target],
        StatementKind::Switch {
            cases,
            default_target,
            ..
        } => {
            let mut targets: Vec<StmtId> = cases.iter().map(|case| case.target).collect();
            targets.extend(*default_target);
            targets
        }
        StatementKind::Call { .. } | StatementKind::Plain => Vec::new(),
    }
}
