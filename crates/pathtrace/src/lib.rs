/*! Unified interface for interprocedural path analysis.
 *
 * Single import for everything you need: call-graph aggregation, path enumeration
 * with branch predicates and data dependencies, and console/JSON emitters.
 * Batteries-included entry point for auditing workflows.
 */

pub use pathtrace_core as core;
pub use pathtrace_emit as emit;

pub use pathtrace_core::{
    analysis::{
        build_ddg, compute_bundle, enumerate_paths, path_predicate, ChainAnalysis, ChainAnalyzer,
        ConcretePath, ControlFlowGraph, DataDependencyGraph, DependencyEdge, MethodPaths,
        PathBundle, PathCache, PathKey, PathRecord,
    },
    callgraph::{CallEdge, CallGraphFilter, CallGraphIndex, CallGraphSnapshot},
    procedure::{Procedure, ProcedureBody, ProcedureRef, Program, Visibility},
    statement::{Statement, StatementKind, StmtId, SwitchCase},
};

pub use pathtrace_emit::{CallGraphReportEmitter, ChainReportEmitter, Emitter};
