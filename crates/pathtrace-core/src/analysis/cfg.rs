use crate::procedure::ProcedureBody;
use crate::statement::{Statement, StmtId};

/// Read-only traversal view over one procedure body: entry statements and successor
/// sets, exactly the surface the path analyses consume.
#[derive(Debug, Clone, Copy)]
pub struct ControlFlowGraph<'a> {
    body: &'a ProcedureBody,
}

impl<'a> ControlFlowGraph<'a> {
    pub fn from_body(body: &'a ProcedureBody) -> Self {
        Self { body }
    }

    pub fn heads(&self) -> &[StmtId] {
        &self.body.heads
    }

    pub fn successors(&self, id: StmtId) -> &[StmtId] {
        self.body
            .statement(id)
            .map(|stmt| stmt.succs.as_slice())
            .unwrap_or(&[])
    }

    pub fn statement(&self, id: StmtId) -> Option<&'a Statement> {
        self.body.statement(id)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Every call-site statement whose statically referenced callee matches `callee`
    /// by exact signature. Virtual dispatch to overriding methods is not resolved.
    pub fn call_sites(&self, callee: &str) -> Vec<StmtId> {
        self.body
            .statements
            .iter()
            .enumerate()
            .filter(|(_, stmt)| stmt.callee() == Some(callee))
            .map(|(index, _)| StmtId(index as u32))
            .collect()
    }
}
