//! Strongly connected components of the implication graph (Tarjan).
//!
//! The traversal keeps its own frame stack instead of recursing, so the
//! depth of the implication chain (up to `2 * var_count`) never touches
//! the call stack. Membership and emission order match the textbook
//! recursive formulation: for each frame the next unexplored edge is
//! resumed exactly where the recursive call would have returned.
//!
//! Components come out in reverse topological order. Component 0 is the
//! first one completed, and for every edge `u → v` the component index of
//! `u` is greater than or equal to that of `v`.

use tracing::debug;

use crate::graph::ImplicationGraph;
use crate::literal::Literal;

const UNVISITED: usize = usize::MAX;

/// SCC membership for every literal of a graph.
#[derive(Debug, Clone)]
pub struct SccPartition {
    components: Vec<Vec<Literal>>,
    component_of: Vec<usize>,
}

impl SccPartition {
    /// Components in emission (reverse topological) order. Literals inside
    /// a component are listed in the order they were popped.
    pub fn components(&self) -> &[Vec<Literal>] {
        &self.components
    }

    /// Index of the component containing `lit`.
    pub fn component_of(&self, lit: Literal) -> usize {
        self.component_of[lit.index()]
    }

    pub fn same_component(&self, a: Literal, b: Literal) -> bool {
        self.component_of(a) == self.component_of(b)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Per-traversal bookkeeping.
struct Tarjan<'g> {
    graph: &'g ImplicationGraph,
    discovery: Vec<usize>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<Literal>,
    counter: usize,
    components: Vec<Vec<Literal>>,
    component_of: Vec<usize>,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g ImplicationGraph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            discovery: vec![UNVISITED; n],
            lowlink: vec![UNVISITED; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            counter: 0,
            components: Vec::new(),
            component_of: vec![UNVISITED; n],
        }
    }

    fn visited(&self, lit: Literal) -> bool {
        self.discovery[lit.index()] != UNVISITED
    }

    fn enter(&mut self, lit: Literal) {
        let i = lit.index();
        self.discovery[i] = self.counter;
        self.lowlink[i] = self.counter;
        self.counter += 1;
        self.stack.push(lit);
        self.on_stack[i] = true;
    }

    /// Pop the traversal stack down to `root` and record one component.
    fn emit(&mut self, root: Literal) {
        let index = self.components.len();
        let mut component = Vec::new();
        while let Some(lit) = self.stack.pop() {
            self.on_stack[lit.index()] = false;
            self.component_of[lit.index()] = index;
            component.push(lit);
            if lit == root {
                break;
            }
        }
        self.components.push(component);
    }

    fn run(mut self) -> SccPartition {
        // (node, position of the next successor to explore)
        let mut frames: Vec<(Literal, usize)> = Vec::new();

        for root in self.graph.literals() {
            if self.visited(root) {
                continue;
            }
            self.enter(root);
            frames.push((root, 0));

            while let Some(&(v, next)) = frames.last() {
                if let Some(&w) = self.graph.successors(v).get(next) {
                    let top = frames.len() - 1;
                    frames[top].1 += 1;

                    if !self.visited(w) {
                        self.enter(w);
                        frames.push((w, 0));
                    } else if self.on_stack[w.index()] {
                        let low = self.lowlink[v.index()].min(self.discovery[w.index()]);
                        self.lowlink[v.index()] = low;
                    }
                    continue;
                }

                frames.pop();
                if self.lowlink[v.index()] == self.discovery[v.index()] {
                    self.emit(v);
                }
                if let Some(&(parent, _)) = frames.last() {
                    let low = self.lowlink[parent.index()].min(self.lowlink[v.index()]);
                    self.lowlink[parent.index()] = low;
                }
            }
        }

        SccPartition {
            components: self.components,
            component_of: self.component_of,
        }
    }
}

/// Compute the strongly connected components of `graph`.
///
/// Every literal is tried as a root in index order, so disconnected parts
/// of the graph are covered. Self-loops and parallel edges are harmless.
pub fn tarjan(graph: &ImplicationGraph) -> SccPartition {
    let partition = Tarjan::new(graph).run();
    debug!(components = partition.len(), "computed SCCs");
    partition
}
