use super::cache::{CacheStatistics, PathBundle, PathCache, PathKey};
use super::cfg::ControlFlowGraph;
use super::ddg::DataDependencyGraph;
use super::{build_ddg, enumerate_paths, path_predicate};
use crate::procedure::{Procedure, Program};
use crate::statement::StmtId;
use serde::Serialize;

/// One concrete path to a call site, rendered for export: the statement texts in
/// order, the predicate selecting the path, and its data-dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRecord {
    pub path: Vec<String>,
    pub constraints: Vec<String>,
    pub data_dependency_graph: DataDependencyGraph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodPaths {
    pub method: String,
    pub paths: Vec<PathRecord>,
}

/// Result for one call-graph-level chain. A chain whose pairs yielded no call-site
/// paths still appears, with an empty method list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainAnalysis {
    pub chain: String,
    pub method_paths: Vec<MethodPaths>,
}

/// Compute the full path bundle for one call site: enumerate, then derive the
/// predicate and DDG per path, index-aligned.
pub fn compute_bundle(cfg: &ControlFlowGraph, target: StmtId) -> PathBundle {
    let paths = enumerate_paths(cfg, target);
    let predicates = paths.iter().map(|path| path_predicate(cfg, path)).collect();
    let ddgs = paths.iter().map(|path| build_ddg(cfg, path)).collect();
    PathBundle {
        paths,
        predicates,
        ddgs,
    }
}

/// Walks chains of procedures pairwise, locating call sites by exact static signature
/// match and assembling per-path records through the path cache.
///
/// Calls resolved through virtual dispatch to an overriding method are not matched;
/// the external call-graph builder already under-approximates the same way.
pub struct ChainAnalyzer<'a> {
    program: &'a Program,
    cache: PathCache,
}

impl<'a> ChainAnalyzer<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            cache: PathCache::new(),
        }
    }

    /// Analyze every chain, preserving input order. A chain naming an unknown
    /// signature is skipped whole; remaining chains continue unaffected.
    pub fn analyze(&mut self, chains: &[Vec<String>]) -> Vec<ChainAnalysis> {
        let mut results = Vec::new();

        'chains: for chain in chains {
            let mut procedures = Vec::with_capacity(chain.len());
            for signature in chain {
                match self.program.procedure(signature) {
                    Some(procedure) => procedures.push(procedure),
                    None => {
                        tracing::warn!(
                            signature = %signature,
                            "chain references unknown procedure, skipping chain"
                        );
                        continue 'chains;
                    }
                }
            }

            let mut method_paths = Vec::new();
            for pair in procedures.windows(2) {
                if let Some(entry) = self.method_paths(pair[0], pair[1].signature()) {
                    method_paths.push(entry);
                }
            }

            results.push(ChainAnalysis {
                chain: render_chain(chain),
                method_paths,
            });
        }

        results
    }

    pub fn cache_statistics(&self) -> &CacheStatistics {
        self.cache.statistics()
    }

    /// Paths to every call site of `callee` inside `caller`, or `None` when the pair
    /// contributes nothing (no body, no call sites, or no feasible paths).
    fn method_paths(&mut self, caller: &Procedure, callee: &str) -> Option<MethodPaths> {
        let Some(body) = caller.body.as_ref() else {
            tracing::warn!(
                procedure = %caller.signature(),
                "procedure has no active body, skipping"
            );
            return None;
        };

        let cfg = ControlFlowGraph::from_body(body);
        let mut records = Vec::new();

        for call_site in cfg.call_sites(callee) {
            let call_site_text = cfg
                .statement(call_site)
                .map(|stmt| stmt.text.clone())
                .unwrap_or_default();
            let key = PathKey::new(caller.signature(), call_site_text, callee);
            let bundle = self
                .cache
                .get_or_compute(key, || compute_bundle(&cfg, call_site));

            for index in 0..bundle.len() {
                records.push(PathRecord {
                    path: bundle.paths[index].render(&cfg),
                    constraints: bundle.predicates[index].clone(),
                    data_dependency_graph: bundle.ddgs[index].clone(),
                });
            }
        }

        if records.is_empty() {
            None
        } else {
            Some(MethodPaths {
                method: caller.signature().to_string(),
                paths: records,
            })
        }
    }
}

fn render_chain(chain: &[String]) -> String {
    chain.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::{ProcedureBody, ProcedureRef, Visibility};
    use crate::statement::Statement;
    use pretty_assertions::assert_eq;

    fn procedure(signature: &str, body: Option<ProcedureBody>) -> Procedure {
        Procedure::new(
            ProcedureRef::new(signature, "com.app.Main", Visibility::Public, true),
            body,
        )
    }

    fn caller_body() -> ProcedureBody {
        // Branch guards the call: only the then-arm reaches it.
        ProcedureBody::new(
            vec![
                Statement::plain("t0 = input()").with_defs(&["t0"]).with_succs(&[1]),
                Statement::branch("if t0 > 0 goto s2", "t0 > 0", StmtId(2), StmtId(3))
                    .with_uses(&["t0"]),
                Statement::call("invoke B.bar(t0)", Some("B.bar()")).with_uses(&["t0"]),
                Statement::plain("return"),
            ],
            vec![StmtId(0)],
        )
    }

    fn two_step_program() -> Program {
        let mut program = Program::new();
        program.insert(procedure("A.foo()", Some(caller_body())));
        program.insert(procedure("B.bar()", Some(ProcedureBody::new(
            vec![Statement::plain("return")],
            vec![StmtId(0)],
        ))));
        program
    }

    fn chain(signatures: &[&str]) -> Vec<String> {
        signatures.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_pair_chain_produces_guarded_path() {
        let program = two_step_program();
        let mut analyzer = ChainAnalyzer::new(&program);
        let results = analyzer.analyze(&[chain(&["A.foo()", "B.bar()"])]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chain, "A.foo() -> B.bar()");
        assert_eq!(results[0].method_paths.len(), 1);

        let method = &results[0].method_paths[0];
        assert_eq!(method.method, "A.foo()");
        assert_eq!(method.paths.len(), 1);

        let record = &method.paths[0];
        assert_eq!(
            record.path,
            vec!["t0 = input()", "if t0 > 0 goto s2", "invoke B.bar(t0)"]
        );
        assert_eq!(record.constraints, vec!["t0 > 0"]);
        assert_eq!(record.data_dependency_graph.len(), 1);
        assert!(record.data_dependency_graph.contains("t0", "t0"));
    }

    #[test]
    fn test_pair_without_call_sites_is_omitted_but_chain_remains() {
        let mut program = two_step_program();
        program.insert(procedure(
            "C.baz()",
            Some(ProcedureBody::new(
                vec![Statement::plain("return")],
                vec![StmtId(0)],
            )),
        ));

        let mut analyzer = ChainAnalyzer::new(&program);
        // B.bar() never calls C.baz(); the chain still appears, with only the A->B pair.
        let results = analyzer.analyze(&[chain(&["A.foo()", "B.bar()", "C.baz()"])]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].method_paths.len(), 1);
        assert_eq!(results[0].method_paths[0].method, "A.foo()");
    }

    #[test]
    fn test_chain_with_no_method_paths_still_appears_empty() {
        let mut program = Program::new();
        program.insert(procedure(
            "A.foo()",
            Some(ProcedureBody::new(
                vec![Statement::plain("return")],
                vec![StmtId(0)],
            )),
        ));
        program.insert(procedure("B.bar()", None));

        let mut analyzer = ChainAnalyzer::new(&program);
        let results = analyzer.analyze(&[chain(&["A.foo()", "B.bar()"])]);

        assert_eq!(results.len(), 1);
        assert!(results[0].method_paths.is_empty());
    }

    #[test]
    fn test_unknown_signature_skips_chain_and_continues() {
        let program = two_step_program();
        let mut analyzer = ChainAnalyzer::new(&program);
        let results = analyzer.analyze(&[
            chain(&["A.foo()", "Missing.gone()"]),
            chain(&["A.foo()", "B.bar()"]),
        ]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chain, "A.foo() -> B.bar()");
    }

    #[test]
    fn test_missing_body_skips_pair_contribution() {
        let mut program = Program::new();
        program.insert(procedure("A.foo()", None));
        program.insert(procedure("B.bar()", Some(ProcedureBody::new(
            vec![
                Statement::call("invoke C.baz()", Some("C.baz()")),
            ],
            vec![StmtId(0)],
        ))));
        program.insert(procedure("C.baz()", Some(ProcedureBody::new(
            vec![Statement::plain("return")],
            vec![StmtId(0)],
        ))));

        let mut analyzer = ChainAnalyzer::new(&program);
        let results = analyzer.analyze(&[chain(&["A.foo()", "B.bar()", "C.baz()"])]);

        // A.foo() has no body; only B.bar() -> C.baz() contributes.
        assert_eq!(results[0].method_paths.len(), 1);
        assert_eq!(results[0].method_paths[0].method, "B.bar()");
    }

    #[test]
    fn test_repeated_pairs_hit_the_cache() {
        let program = two_step_program();
        let mut analyzer = ChainAnalyzer::new(&program);
        analyzer.analyze(&[
            chain(&["A.foo()", "B.bar()"]),
            chain(&["A.foo()", "B.bar()"]),
        ]);

        assert_eq!(analyzer.cache_statistics().misses, 1);
        assert_eq!(analyzer.cache_statistics().hits, 1);
    }

    #[test]
    fn test_unreachable_call_site_yields_no_entry() {
        let mut program = Program::new();
        // The call site hangs off an unreachable statement.
        program.insert(procedure(
            "A.foo()",
            Some(ProcedureBody::new(
                vec![
                    Statement::plain("return"),
                    Statement::call("invoke B.bar()", Some("B.bar()")),
                ],
                vec![StmtId(0)],
            )),
        ));
        program.insert(procedure("B.bar()", Some(ProcedureBody::new(
            vec![Statement::plain("return")],
            vec![StmtId(0)],
        ))));

        let mut analyzer = ChainAnalyzer::new(&program);
        let results = analyzer.analyze(&[chain(&["A.foo()", "B.bar()"])]);

        assert_eq!(results.len(), 1);
        assert!(results[0].method_paths.is_empty());
    }
}
