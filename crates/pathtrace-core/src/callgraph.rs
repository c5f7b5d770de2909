use crate::procedure::{ProcedureRef, Visibility};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One raw caller→callee edge from the external whole-program call-graph builder.
/// Multiple call sites between the same pair arrive as repeated edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller: ProcedureRef,
    pub callee: ProcedureRef,
}

impl CallEdge {
    pub fn new(caller: ProcedureRef, callee: ProcedureRef) -> Self {
        Self { caller, callee }
    }
}

/// Caller-side admission rules, injected at construction. An empty prefix list
/// admits every application-code caller.
#[derive(Debug, Clone)]
pub struct CallGraphFilter {
    pub application_only: bool,
    pub package_prefixes: Vec<String>,
}

impl CallGraphFilter {
    pub fn application_code() -> Self {
        Self {
            application_only: true,
            package_prefixes: Vec::new(),
        }
    }

    pub fn with_prefixes(package_prefixes: Vec<String>) -> Self {
        Self {
            application_only: true,
            package_prefixes,
        }
    }

    fn admits(&self, caller: &ProcedureRef) -> bool {
        if self.application_only && !caller.is_application_code {
            return false;
        }
        self.package_prefixes.is_empty()
            || self
                .package_prefixes
                .iter()
                .any(|prefix| caller.type_name.starts_with(prefix))
    }
}

impl Default for CallGraphFilter {
    fn default() -> Self {
        Self::application_code()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphNode {
    pub signature: String,
    pub modifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphEdge {
    pub src: String,
    pub tgt: String,
}

/// Deduplicated, visibility-annotated view of the filtered call graph,
/// sorted by signature for reproducible export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphSnapshot {
    pub nodes: Vec<CallGraphNode>,
    pub edges: Vec<CallGraphEdge>,
}

/// Aggregates raw edges into deduplicated node and edge sets. Pure filter and
/// aggregate; there are no error conditions.
#[derive(Debug, Default)]
pub struct CallGraphIndex {
    filter: CallGraphFilter,
    nodes: IndexMap<String, Visibility>,
    edges: IndexMap<String, (String, String)>,
}

impl CallGraphIndex {
    pub fn new(filter: CallGraphFilter) -> Self {
        Self {
            filter,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    pub fn ingest(&mut self, edges: &[CallEdge]) {
        for edge in edges {
            if !self.filter.admits(&edge.caller) {
                continue;
            }

            self.register_node(&edge.caller);
            self.register_node(&edge.callee);

            let key = format!("{}->{}", edge.caller.signature, edge.callee.signature);
            self.edges.entry(key).or_insert_with(|| {
                (
                    edge.caller.signature.clone(),
                    edge.callee.signature.clone(),
                )
            });
        }
    }

    /// First-seen visibility wins; the call-graph builder reports a consistent
    /// modifier per signature anyway.
    fn register_node(&mut self, endpoint: &ProcedureRef) {
        self.nodes
            .entry(endpoint.signature.clone())
            .or_insert(endpoint.visibility);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn snapshot(&self) -> CallGraphSnapshot {
        let mut nodes: Vec<CallGraphNode> = self
            .nodes
            .iter()
            .map(|(signature, visibility)| CallGraphNode {
                signature: signature.clone(),
                modifier: visibility.as_str().to_string(),
            })
            .collect();
        nodes.sort_by(|a, b| a.signature.cmp(&b.signature));

        let mut edges: Vec<CallGraphEdge> = self
            .edges
            .values()
            .map(|(src, tgt)| CallGraphEdge {
                src: src.clone(),
                tgt: tgt.clone(),
            })
            .collect();
        edges.sort_by(|a, b| (&a.src, &a.tgt).cmp(&(&b.src, &b.tgt)));

        CallGraphSnapshot { nodes, edges }
    }
}
