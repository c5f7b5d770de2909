/*! Emitters for PathTrace analysis artifacts.
 *
 * Two surfaces: pretty-printed JSON files consumed by downstream scoring tools, and
 * colored console summaries for a human skimming the results. A failure writing one
 * artifact never invalidates results already computed in memory.
 */

pub mod emitter;
pub mod json;
pub mod report;

pub use emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
pub use json::{to_pretty_json, write_json_pretty};
pub use report::{CallGraphReportEmitter, ChainReportEmitter};
