//! 2-SAT decision and assignment construction.

use tracing::debug;

use crate::cnf::Cnf;
use crate::graph::build_graph;
use crate::literal::{Literal, VarId};
use crate::scc::{tarjan, SccPartition};

/// Result of deciding a CNF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// One value per variable, indexed by [`VarId`].
    Satisfiable(Vec<bool>),
    /// Variables whose two literals share an SCC, in ascending id order.
    /// Never empty.
    Unsatisfiable { contradicted: Vec<VarId> },
}

impl Decision {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Decision::Satisfiable(_))
    }
}

/// Decide satisfiability of `cnf` and, when satisfiable, build a total
/// assignment.
///
/// A variable is contradicted iff `x` and `¬x` fall in the same SCC.
/// Otherwise components are walked in emission order (sinks of the
/// condensation first) and the first literal met for each variable is made
/// true. Anything a true literal implies lives in an SCC emitted no later,
/// so it was already made true, and no implication can end in a false
/// literal.
pub fn decide(cnf: &Cnf) -> Decision {
    let graph = build_graph(cnf);
    let scc = tarjan(&graph);

    let contradicted = contradicted_vars(cnf, &scc);
    if !contradicted.is_empty() {
        debug!(count = contradicted.len(), "contradicted variables found");
        return Decision::Unsatisfiable { contradicted };
    }

    Decision::Satisfiable(assign(cnf.var_count(), &scc))
}

fn contradicted_vars(cnf: &Cnf, scc: &SccPartition) -> Vec<VarId> {
    cnf.vars()
        .filter(|&var| scc.same_component(Literal::positive(var), Literal::negative(var)))
        .collect()
}

fn assign(var_count: usize, scc: &SccPartition) -> Vec<bool> {
    let mut values: Vec<Option<bool>> = vec![None; var_count];
    for component in scc.components() {
        for &lit in component {
            let slot = &mut values[lit.var() as usize];
            if slot.is_none() {
                *slot = Some(lit.is_positive());
            }
        }
    }
    // Every literal is a graph node, so every slot has been filled.
    values.into_iter().map(|v| v.unwrap_or(false)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::compile_problem;
    use crate::problem::Problem;

    fn decide_problem(problem: &Problem, forced: &[&str]) -> Decision {
        decide(&compile_problem(problem, forced).unwrap())
    }

    fn satisfies(cnf: &Cnf, values: &[bool]) -> bool {
        cnf.implications().all(|(from, to)| {
            !from.eval(values[from.var() as usize]) || to.eval(values[to.var() as usize])
        })
    }

    #[test]
    fn empty_cnf_is_satisfiable() {
        assert_eq!(
            decide_problem(&Problem::default(), &[]),
            Decision::Satisfiable(vec![])
        );
    }

    #[test]
    fn unconstrained_components_default_to_deselected() {
        assert_eq!(
            decide_problem(&Problem::new(["A", "B"]), &[]),
            Decision::Satisfiable(vec![false, false])
        );
    }

    #[test]
    fn forced_requirements_are_selected() {
        let problem = Problem::new(["Milk", "Lid", "Flush"])
            .requires("Milk", "Lid")
            .requires("Milk", "Flush");
        assert_eq!(
            decide_problem(&problem, &["Milk"]),
            Decision::Satisfiable(vec![true, true, true])
        );
    }

    #[test]
    fn conflict_never_selects_both() {
        let problem = Problem::new(["BigTank", "ExtraHeater"]).conflicts("BigTank", "ExtraHeater");
        for forced in [&[][..], &["BigTank"][..], &["ExtraHeater"][..]] {
            match decide_problem(&problem, forced) {
                Decision::Satisfiable(values) => assert!(!(values[0] && values[1])),
                other => panic!("expected satisfiable, got {other:?}"),
            }
        }
    }

    #[test]
    fn self_conflict_deselects_component() {
        let problem = Problem::new(["A"]).conflicts("A", "A");
        assert_eq!(
            decide_problem(&problem, &[]),
            Decision::Satisfiable(vec![false])
        );
        assert_eq!(
            decide_problem(&problem, &["A"]),
            Decision::Unsatisfiable {
                contradicted: vec![0]
            }
        );
    }

    #[test]
    fn chain_with_conflict_is_contradicted_when_forced() {
        let problem = Problem::new(["A", "B", "C"])
            .requires("A", "B")
            .requires("B", "C")
            .conflicts("A", "C");

        let free = decide_problem(&problem, &[]);
        assert!(free.is_satisfiable());

        match decide_problem(&problem, &["A"]) {
            Decision::Unsatisfiable { contradicted } => assert!(contradicted.contains(&0)),
            other => panic!("expected unsatisfiable, got {other:?}"),
        }
    }

    #[test]
    fn assignments_satisfy_every_implication() {
        let problem = Problem::new(["A", "B", "C", "D", "E"])
            .requires("A", "B")
            .requires("C", "B")
            .conflicts("B", "D")
            .requires("E", "D")
            .conflicts("A", "E");
        for forced in [&[][..], &["A"][..], &["E"][..], &["C"][..], &["D"][..]] {
            let cnf = compile_problem(&problem, forced).unwrap();
            match decide(&cnf) {
                Decision::Satisfiable(values) => assert!(
                    satisfies(&cnf, &values),
                    "forced {forced:?} produced {values:?}"
                ),
                other => panic!("forced {forced:?}: expected satisfiable, got {other:?}"),
            }
        }
    }

    #[test]
    fn decision_is_deterministic() {
        let problem = Problem::new(["A", "B", "C", "D"])
            .requires("A", "B")
            .conflicts("B", "C")
            .requires("D", "C");
        let first = decide_problem(&problem, &["D"]);
        for _ in 0..20 {
            assert_eq!(decide_problem(&problem, &["D"]), first);
        }
    }
}
