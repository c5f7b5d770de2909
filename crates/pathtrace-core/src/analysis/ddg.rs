use super::cfg::ControlFlowGraph;
use super::paths::ConcretePath;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A use of `to` on this path is influenced by an earlier definition of `from`
/// on this same path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

impl DependencyEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Def→use edges among the locals touched along one concrete path,
/// deduplicated per (from, to) pair and ordered for reproducible export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDependencyGraph {
    pub edges: BTreeSet<DependencyEdge>,
}

impl DataDependencyGraph {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.edges
            .contains(&DependencyEdge::new(from, to))
    }
}

/// Walk the path in order; every variable used at a statement receives an edge from
/// every variable defined at any strictly earlier statement on the same path.
///
/// This over-approximates across all earlier definitions rather than tracking only
/// the nearest reaching definition; that policy is load-bearing for consumers and
/// must not be tightened here.
pub fn build_ddg(cfg: &ControlFlowGraph, path: &ConcretePath) -> DataDependencyGraph {
    let mut edges = BTreeSet::new();
    let mut defined: HashSet<&str> = HashSet::new();

    for &id in path.statements() {
        let Some(statement) = cfg.statement(id) else {
            continue;
        };

        for used in &statement.uses {
            for &def in &defined {
                edges.insert(DependencyEdge::new(def, used.clone()));
            }
        }
        for def in &statement.defs {
            defined.insert(def.as_str());
        }
    }

    DataDependencyGraph { edges }
}
