use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
use pathtrace_core::{CallGraphSnapshot, ChainAnalysis};
use std::io::Write;

/// Console summary of chain analysis results: one section per chain, per-method path
/// counts, and the predicate of each path.
pub struct ChainReportEmitter;

impl Emitter for ChainReportEmitter {
    type Item = Vec<ChainAnalysis>;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        for analysis in item {
            EmitHelper::write_section(writer, context, &analysis.chain)?;

            if analysis.method_paths.is_empty() {
                EmitHelper::write_line(writer, context, "no feasible call-site paths")?;
                continue;
            }

            for method in &analysis.method_paths {
                EmitHelper::write_colored_line(
                    writer,
                    context,
                    &format!("{} ({} paths)", method.method, method.paths.len()),
                    "bright_blue",
                )?;

                context.indent();
                for (index, record) in method.paths.iter().enumerate() {
                    let constraints = if record.constraints.is_empty() {
                        "unconditional".to_string()
                    } else {
                        record.constraints.join(" && ")
                    };
                    EmitHelper::write_line(
                        writer,
                        context,
                        &format!(
                            "path {}: {} statements, {} ddg edges, {}",
                            index,
                            record.path.len(),
                            record.data_dependency_graph.len(),
                            constraints
                        ),
                    )?;
                }
                context.dedent();
            }
        }
        Ok(())
    }
}

/// Console summary of a call-graph snapshot: counts plus every edge.
pub struct CallGraphReportEmitter;

impl Emitter for CallGraphReportEmitter {
    type Item = CallGraphSnapshot;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        EmitHelper::write_section(writer, context, "Call graph")?;
        EmitHelper::write_pair(writer, context, "nodes", &item.nodes.len().to_string())?;
        EmitHelper::write_pair(writer, context, "edges", &item.edges.len().to_string())?;

        context.indent();
        for edge in &item.edges {
            EmitHelper::write_line(writer, context, &format!("{} -> {}", edge.src, edge.tgt))?;
        }
        context.dedent();
        Ok(())
    }
}
