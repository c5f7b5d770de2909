/*! Per-procedure path analyses and their orchestration.
 *
 * Answering "how does control reach this call site" takes three cooperating views of one
 * concrete path: the statement sequence itself, the branch outcomes that select it, and the
 * def→use edges among the locals it touches. These modules compute each view, memoize the
 * bundle per call site, and assemble chain-level results.
 */

pub mod cache;
pub mod cfg;
pub mod chain;
pub mod ddg;
pub mod paths;
pub mod predicate;

pub use cache::{CacheStatistics, PathBundle, PathCache, PathKey};
pub use cfg::ControlFlowGraph;
pub use chain::{compute_bundle, ChainAnalysis, ChainAnalyzer, MethodPaths, PathRecord};
pub use ddg::{build_ddg, DataDependencyGraph, DependencyEdge};
pub use paths::{enumerate_paths, ConcretePath};
pub use predicate::path_predicate;
