use serde::{Deserialize, Serialize};

/// Structural identity of a statement within one procedure body.
///
/// Two ids are equal only when they name the same position, so textually identical
/// statements at different positions stay distinct. Cycle detection depends on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StmtId(pub u32);

impl std::fmt::Display for StmtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: String,
    pub target: StmtId,
}

impl SwitchCase {
    pub fn new(value: impl Into<String>, target: StmtId) -> Self {
        Self {
            value: value.into(),
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementKind {
    Branch {
        condition: String,
        then_target: StmtId,
        else_target: StmtId,
    },

    /// Multi-way branch with cases in declared order. Lookup and table switches both
    /// normalize to an explicit case list, so table bounds need no separate handling.
    Switch {
        key: String,
        cases: Vec<SwitchCase>,
        default_target: Option<StmtId>,
    },

    Call {
        /// Statically referenced callee signature; `None` when the front end could not
        /// resolve one.
        callee: Option<String>,
    },

    Plain,
}

/// One CFG node as handed over by the front end: rendered text, branching structure,
/// local variables defined and used here, and the explicit successor list.
///
/// Successors are the front end's CFG edges and may include exceptional edges the
/// branching structure does not mention; branch and switch targets are kept
/// separately for predicate extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    #[serde(flatten)]
    pub kind: StatementKind,
    #[serde(default)]
    pub defs: Vec<String>,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub succs: Vec<StmtId>,
}

impl Statement {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatementKind::Plain,
            defs: Vec::new(),
            uses: Vec::new(),
            succs: Vec::new(),
        }
    }

    pub fn branch(
        text: impl Into<String>,
        condition: impl Into<String>,
        then_target: StmtId,
        else_target: StmtId,
    ) -> Self {
        Self {
            text: text.into(),
            kind: StatementKind::Branch {
                condition: condition.into(),
                then_target,
                else_target,
            },
            defs: Vec::new(),
            uses: Vec::new(),
            succs: vec![then_target, else_target],
        }
    }

    pub fn switch(
        text: impl Into<String>,
        key: impl Into<String>,
        cases: Vec<SwitchCase>,
        default_target: Option<StmtId>,
    ) -> Self {
        let mut succs: Vec<StmtId> = cases.iter().map(|case| case.target).collect();
        succs.extend(default_target);
        Self {
            text: text.into(),
            kind: StatementKind::Switch {
                key: key.into(),
                cases,
                default_target,
            },
            defs: Vec::new(),
            uses: Vec::new(),
            succs,
        }
    }

    pub fn call(text: impl Into<String>, callee: Option<&str>) -> Self {
        Self {
            text: text.into(),
            kind: StatementKind::Call {
                callee: callee.map(String::from),
            },
            defs: Vec::new(),
            uses: Vec::new(),
            succs: Vec::new(),
        }
    }

    pub fn with_defs(mut self, defs: &[&str]) -> Self {
        self.defs = defs.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_uses(mut self, uses: &[&str]) -> Self {
        self.uses = uses.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn with_succs(mut self, succs: &[u32]) -> Self {
        self.succs = succs.iter().map(|&s| StmtId(s)).collect();
        self
    }

    pub fn is_branching(&self) -> bool {
        matches!(
            self.kind,
            StatementKind::Branch { .. } | StatementKind::Switch { .. }
        )
    }

    pub fn callee(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::Call { callee } => callee.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_constructor_fills_successors() {
        let stmt = Statement::branch("if x > 0 goto s2", "x > 0", StmtId(2), StmtId(3));
        assert_eq!(stmt.succs, vec![StmtId(2), StmtId(3)]);
        assert!(stmt.is_branching());
    }

    #[test]
    fn test_switch_constructor_includes_default() {
        let stmt = Statement::switch(
            "switch(mode)",
            "mode",
            vec![SwitchCase::new("0", StmtId(1)), SwitchCase::new("1", StmtId(2))],
            Some(StmtId(3)),
        );
        assert_eq!(stmt.succs, vec![StmtId(1), StmtId(2), StmtId(3)]);
    }

    #[test]
    fn test_callee_accessor() {
        let stmt = Statement::call("invoke bar()", Some("B.bar()"));
        assert_eq!(stmt.callee(), Some("B.bar()"));
        assert!(!stmt.is_branching());

        let unresolved = Statement::call("invoke dyn()", None);
        assert_eq!(unresolved.callee(), None);
    }

    #[test]
    fn test_statement_kind_json_tagging() {
        let stmt = Statement::plain("x = 1").with_defs(&["x"]).with_succs(&[1]);
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"], "plain");

        let back: Statement = serde_json::from_value(json).unwrap();
        assert_eq!(back, stmt);
    }
}
