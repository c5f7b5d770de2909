use super::cfg::ControlFlowGraph;
use super::paths::ConcretePath;
use crate::statement::StatementKind;

/// Reconstruct the branch predicate one concrete path satisfies: exactly one
/// constraint per branching statement on the path, in path-encounter order.
///
/// Two-way branches contribute the condition text when the path contains the
/// then-target and the negated text otherwise. Multi-way branches contribute a
/// `key == value` equality for the first declared case whose target lies on the
/// path, or `"default"` when none does.
pub fn path_predicate(cfg: &ControlFlowGraph, path: &ConcretePath) -> Vec<String> {
    let mut constraints = Vec::new();

    for &id in path.statements() {
        let Some(statement) = cfg.statement(id) else {
            continue;
        };

        match &statement.kind {
            StatementKind::Branch {
                condition,
                then_target,
                ..
            } => {
                if path.contains(*then_target) {
                    constraints.push(condition.clone());
                } else {
                    constraints.push(format!("!({})", condition));
                }
            }
            StatementKind::Switch { key, cases, .. } => {
                match cases.iter().find(|case| path.contains(case.target)) {
                    Some(case) => constraints.push(format!("{} == {}", key, case.value)),
                    None => constraints.push("default".to_string()),
                }
            }
            StatementKind::Call { .. } | StatementKind::Plain => {}
        }
    }

    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::paths::enumerate_paths;
    use crate::procedure::ProcedureBody;
    use crate::statement::{Statement, StmtId, SwitchCase};
    use pretty_assertions::assert_eq;

    fn predicate_for(body: &ProcedureBody, target: StmtId) -> Vec<Vec<String>> {
        let cfg = ControlFlowGraph::from_body(body);
        enumerate_paths(&cfg, target)
            .iter()
            .map(|path| path_predicate(&cfg, path))
            .collect()
    }

    #[test]
    fn test_branch_emits_condition_or_negation() {
        // Both branch arms reach the call; one through the then-target, one past it.
        let body = ProcedureBody::new(
            vec![
                Statement::branch("if x > 0 goto s1", "x > 0", StmtId(1), StmtId(2)),
                Statement::plain("y = 1").with_succs(&[3]),
                Statement::plain("y = 2").with_succs(&[3]),
                Statement::call("invoke B.bar()", Some("B.bar()")),
            ],
            vec![StmtId(0)],
        );

        let predicates = predicate_for(&body, StmtId(3));
        assert_eq!(
            predicates,
            vec![vec!["x > 0".to_string()], vec!["!(x > 0)".to_string()]]
        );
    }

    #[test]
    fn test_exactly_one_constraint_per_branching_statement() {
        // Two branches stacked ahead of the target.
        let body = ProcedureBody::new(
            vec![
                Statement::branch("if a goto s1", "a", StmtId(1), StmtId(4)),
                Statement::branch("if b goto s2", "b", StmtId(2), StmtId(3)),
                Statement::plain("x = 1").with_succs(&[3]),
                Statement::call("invoke B.bar()", Some("B.bar()")),
                Statement::plain("return"),
            ],
            vec![StmtId(0)],
        );

        let predicates = predicate_for(&body, StmtId(3));
        assert_eq!(predicates.len(), 2);
        for predicate in &predicates {
            assert_eq!(predicate.len(), 2);
            assert_eq!(predicate[0], "a");
        }
        assert_eq!(predicates[0][1], "b");
        assert_eq!(predicates[1][1], "!(b)");
    }

    #[test]
    fn test_switch_emits_first_matching_case() {
        let body = ProcedureBody::new(
            vec![
                Statement::switch(
                    "switch(mode)",
                    "mode",
                    vec![
                        SwitchCase::new("0", StmtId(1)),
                        SwitchCase::new("1", StmtId(2)),
                    ],
                    Some(StmtId(3)),
                ),
                Statement::plain("a = 1").with_succs(&[4]),
                Statement::plain("a = 2").with_succs(&[4]),
                Statement::plain("a = 3").with_succs(&[4]),
                Statement::call("invoke B.bar()", Some("B.bar()")),
            ],
            vec![StmtId(0)],
        );

        let predicates = predicate_for(&body, StmtId(4));
        assert_eq!(
            predicates,
            vec![
                vec!["mode == 0".to_string()],
                vec!["mode == 1".to_string()],
                vec!["default".to_string()],
            ]
        );
    }

    #[test]
    fn test_switch_with_shared_case_target_emits_single_constraint() {
        // Both cases jump to the same statement; only the first declared case counts.
        let body = ProcedureBody::new(
            vec![
                Statement::switch(
                    "switch(mode)",
                    "mode",
                    vec![
                        SwitchCase::new("7", StmtId(1)),
                        SwitchCase::new("9", StmtId(1)),
                    ],
                    None,
                ),
                Statement::call("invoke B.bar()", Some("B.bar()")),
            ],
            vec![StmtId(0)],
        );

        let predicates = predicate_for(&body, StmtId(1));
        assert_eq!(predicates, vec![vec!["mode == 7".to_string()]]);
    }

    #[test]
    fn test_straight_line_path_has_empty_predicate() {
        let body = ProcedureBody::new(
            vec![
                Statement::plain("x = 1").with_succs(&[1]),
                Statement::call("invoke B.bar()", Some("B.bar()")),
            ],
            vec![StmtId(0)],
        );

        let predicates = predicate_for(&body, StmtId(1));
        assert_eq!(predicates, vec![Vec::<String>::new()]);
    }
}
