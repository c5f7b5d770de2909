use super::cfg::ControlFlowGraph;
use crate::statement::StmtId;
use std::collections::HashSet;

/// Ordered sequence of distinct statements from one head to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcretePath {
    statements: Vec<StmtId>,
}

impl ConcretePath {
    fn new(statements: Vec<StmtId>) -> Self {
        debug_assert!({
            let unique: HashSet<_> = statements.iter().collect();
            unique.len() == statements.len()
        });
        Self { statements }
    }

    pub fn statements(&self) -> &[StmtId] {
        &self.statements
    }

    pub fn contains(&self, id: StmtId) -> bool {
        self.statements.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn render(&self, cfg: &ControlFlowGraph) -> Vec<String> {
        self.statements
            .iter()
            .map(|&id| {
                cfg.statement(id)
                    .map(|stmt| stmt.text.clone())
                    .unwrap_or_else(|| id.to_string())
            })
            .collect()
    }
}

/// Enumerate every simple path from any head to `target`.
///
/// The visited set is branch-local (entries are removed on backtrack), so a statement
/// can appear in multiple disjoint result paths while no single path revisits it.
/// An unreachable target yields an empty result, not an error. Worst case is
/// exponential in branch density; exact duplicates are the only suppression applied.
pub fn enumerate_paths(cfg: &ControlFlowGraph, target: StmtId) -> Vec<ConcretePath> {
    let mut results = Vec::new();
    let mut seen: HashSet<Vec<StmtId>> = HashSet::new();
    let mut stack = Vec::new();
    let mut visited = HashSet::new();

    for &head in cfg.heads() {
        dfs(cfg, head, target, &mut stack, &mut visited, &mut seen, &mut results);
    }

    results
}

fn dfs(
    cfg: &ControlFlowGraph,
    current: StmtId,
    target: StmtId,
    stack: &mut Vec<StmtId>,
    visited: &mut HashSet<StmtId>,
    seen: &mut HashSet<Vec<StmtId>>,
    results: &mut Vec<ConcretePath>,
) {
    if !visited.insert(current) {
        return;
    }
    stack.push(current);

    if current == target {
        if seen.insert(stack.clone()) {
            results.push(ConcretePath::new(stack.clone()));
        }
    } else {
        for &successor in cfg.successors(current) {
            dfs(cfg, successor, target, stack, visited, seen, results);
        }
    }

    stack.pop();
    visited.remove(&current);
}
