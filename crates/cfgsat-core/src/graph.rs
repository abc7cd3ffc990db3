//! Implication graph builder.
//!
//! Nodes are all `2 * var_count` literals, addressed by [`Literal::index`].
//! Every stored implication `L ⇒ M` contributes the edge `L → M` and its
//! contrapositive `¬M → ¬L`, so the graph is closed under contraposition.

use std::collections::HashSet;

use tracing::debug;

use crate::cnf::Cnf;
use crate::literal::Literal;

/// Directed literal-to-literal graph, built once per solve.
#[derive(Debug, Clone)]
pub struct ImplicationGraph {
    successors: Vec<Vec<Literal>>,
    seen: HashSet<(Literal, Literal)>,
}

impl ImplicationGraph {
    fn with_literals(literal_count: usize) -> Self {
        Self {
            successors: vec![Vec::new(); literal_count],
            seen: HashSet::new(),
        }
    }

    /// Insert `from → to` unless already present.
    fn insert_edge(&mut self, from: Literal, to: Literal) {
        if self.seen.insert((from, to)) {
            self.successors[from.index()].push(to);
        }
    }

    /// Outgoing edges of `lit`, in insertion order.
    pub fn successors(&self, lit: Literal) -> &[Literal] {
        &self.successors[lit.index()]
    }

    pub fn has_edge(&self, from: Literal, to: Literal) -> bool {
        self.seen.contains(&(from, to))
    }

    /// Mark every literal reachable from `starts`, the starts included.
    /// The result is indexed by [`Literal::index`].
    pub fn reachable_from(&self, starts: &[Literal]) -> Vec<bool> {
        let mut reached = vec![false; self.successors.len()];
        let mut pending: Vec<Literal> = Vec::new();
        for &start in starts {
            if !reached[start.index()] {
                reached[start.index()] = true;
                pending.push(start);
            }
        }
        while let Some(lit) = pending.pop() {
            for &next in self.successors(lit) {
                if !reached[next.index()] {
                    reached[next.index()] = true;
                    pending.push(next);
                }
            }
        }
        reached
    }

    /// Every literal node, by index.
    pub fn literals(&self) -> impl Iterator<Item = Literal> {
        (0..self.successors.len()).map(Literal::from_index)
    }

    /// Every edge, by source index then insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (Literal, Literal)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(index, targets)| {
                let from = Literal::from_index(index);
                targets.iter().map(move |&to| (from, to))
            })
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.seen.len()
    }
}

/// Expand a CNF into its implication graph. The CNF is left untouched.
pub fn build_graph(cnf: &Cnf) -> ImplicationGraph {
    let mut graph = ImplicationGraph::with_literals(cnf.var_count() * 2);
    for (from, to) in cnf.implications() {
        graph.insert_edge(from, to);
        graph.insert_edge(to.negate(), from.negate());
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built implication graph"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::compile_problem;
    use crate::problem::Problem;

    fn graph_for(problem: &Problem, forced: &[&str]) -> ImplicationGraph {
        build_graph(&compile_problem(problem, forced).unwrap())
    }

    #[test]
    fn requires_adds_edge_and_contrapositive() {
        let graph = graph_for(&Problem::new(["Milk", "Lid"]).requires("Milk", "Lid"), &[]);
        let milk = Literal::positive(0);
        let lid = Literal::positive(1);

        assert!(graph.has_edge(milk, lid));
        assert!(graph.has_edge(!lid, !milk));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn conflict_edges_collapse_to_two() {
        // A ⇒ ¬B and B ⇒ ¬A are each other's contrapositive.
        let graph = graph_for(&Problem::new(["A", "B"]).conflicts("A", "B"), &[]);
        assert!(graph.has_edge(Literal::positive(0), Literal::negative(1)));
        assert!(graph.has_edge(Literal::positive(1), Literal::negative(0)));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn forced_component_is_self_contrapositive() {
        let graph = graph_for(&Problem::new(["X"]), &["X"]);
        assert!(graph.has_edge(Literal::negative(0), Literal::positive(0)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn closed_under_contraposition() {
        let problem = Problem::new(["A", "B", "C", "D"])
            .requires("A", "B")
            .requires("B", "C")
            .requires("C", "A")
            .conflicts("A", "D")
            .conflicts("D", "D");
        let graph = graph_for(&problem, &["B"]);

        for (from, to) in graph.edges() {
            assert!(
                graph.has_edge(!to, !from),
                "missing contrapositive of {from} -> {to}"
            );
        }
    }

    #[test]
    fn duplicate_rules_do_not_duplicate_edges() {
        let problem = Problem::new(["A", "B"])
            .requires("A", "B")
            .requires("A", "B");
        let graph = graph_for(&problem, &[]);
        assert_eq!(graph.successors(Literal::positive(0)).len(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn wide_conflict_fan_out_is_deduplicated() {
        let mut problem = Problem::new(["Hub"]);
        for i in 0..5_000 {
            let name = format!("Spoke{i}");
            problem.components.push(name.clone());
            problem = problem.conflicts("Hub", name.clone()).conflicts("Hub", name);
        }
        let graph = graph_for(&problem, &[]);
        assert_eq!(graph.successors(Literal::positive(0)).len(), 5_000);
        assert_eq!(graph.edge_count(), 10_000);
    }

    #[test]
    fn reachability_follows_chains_only_forward() {
        let problem = Problem::new(["A", "B", "C", "D"])
            .requires("A", "B")
            .requires("B", "C");
        let graph = graph_for(&problem, &[]);
        let reached = graph.reachable_from(&[Literal::positive(1)]);

        assert!(!reached[Literal::positive(0).index()]);
        assert!(reached[Literal::positive(1).index()]);
        assert!(reached[Literal::positive(2).index()]);
        assert!(!reached[Literal::positive(3).index()]);
    }

    #[test]
    fn reachability_from_nothing_is_empty() {
        let graph = graph_for(&Problem::new(["A", "B"]).requires("A", "B"), &[]);
        assert!(graph.reachable_from(&[]).iter().all(|r| !r));
    }

    #[test]
    fn self_conflict_is_self_contrapositive() {
        let graph = graph_for(&Problem::new(["A"]).conflicts("A", "A"), &[]);
        assert!(graph.has_edge(Literal::positive(0), Literal::negative(0)));
        assert_eq!(graph.edge_count(), 1);
    }
}
