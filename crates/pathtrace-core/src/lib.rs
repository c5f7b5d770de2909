/*! Core model and analyses for interprocedural path auditing.
 *
 * Security review of a whole program starts from "which chains of calls reach this sensitive
 * procedure, under what branch conditions, carrying what data". This crate provides the immutable
 * procedure/CFG model those questions are asked against, plus the analyses that answer them:
 * call-graph aggregation, simple-path enumeration, predicate reconstruction, and per-path
 * data-dependency graphs.
 */

pub mod analysis;
pub mod callgraph;
pub mod procedure;
pub mod statement;

pub use analysis::{
    build_ddg, enumerate_paths, path_predicate, CacheStatistics, ChainAnalysis, ChainAnalyzer,
    ConcretePath, ControlFlowGraph, DataDependencyGraph, DependencyEdge, MethodPaths, PathBundle,
    PathCache, PathKey, PathRecord,
};
pub use callgraph::{CallEdge, CallGraphFilter, CallGraphIndex, CallGraphSnapshot};
pub use procedure::{Procedure, ProcedureBody, ProcedureRef, Program, Visibility};
pub use statement::{Statement, StatementKind, StmtId, SwitchCase};

use thiserror::Error;

/// Structural defects in a loaded program model. Algorithmic edge cases (no paths, no
/// branches, unreachable targets) are valid empty results and never surface here.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("head {head} out of range in {procedure}")]
    DanglingHead { procedure: String, head: StmtId },
    #[error("statement {statement} in {procedure} references unknown statement {target}")]
    DanglingTarget {
        procedure: String,
        statement: StmtId,
        target: StmtId,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
