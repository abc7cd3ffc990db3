//! Feasibility checker: the single entry point composing the pipeline.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, info};

use crate::check::{check_assignment, Violation};
use crate::cnf::{compile_problem, Cnf};
use crate::decide::{decide, Decision};
use crate::error::Result;
use crate::graph::build_graph;
use crate::literal::Literal;
use crate::problem::Problem;

/// Component-level truth values in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: Vec<(String, bool)>,
}

impl Assignment {
    pub(crate) fn from_values(cnf: &Cnf, values: &[bool]) -> Self {
        let entries = cnf
            .symbols()
            .names()
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect();
        Self { entries }
    }

    /// Value of a component, `None` for names outside the problem.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Names of selected components in declaration order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, v)| *v).map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules of `problem` this assignment breaks. Empty for every
    /// assignment produced by [`solve`].
    pub fn violations(&self, problem: &Problem) -> Vec<Violation> {
        check_assignment(problem, self)
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// What a solve call produces for a well-formed problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every rule holds under `assignment`.
    Feasible { assignment: Assignment },
    /// The rules contradict each other. `component` names the first
    /// contradicted component; `implicated` lists all of them.
    Infeasible {
        component: Option<String>,
        implicated: Vec<String>,
    },
}

impl Outcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Outcome::Feasible { .. })
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Outcome::Feasible { assignment } => Some(assignment),
            Outcome::Infeasible { .. } => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Feasible { assignment } => {
                let selected: Vec<&str> = assignment.selected().collect();
                write!(f, "feasible: {{{}}}", selected.join(", "))
            }
            Outcome::Infeasible {
                component: Some(name),
                ..
            } => write!(f, "infeasible: contradiction on '{name}'"),
            Outcome::Infeasible {
                component: None, ..
            } => write!(f, "infeasible"),
        }
    }
}

/// Decide whether `problem` admits a selection with every `forced`
/// component selected, and produce one if it does.
///
/// Configuration errors (duplicate or unknown names) are returned before
/// any graph work. Every call builds its own CNF, graph and tables; nothing
/// is shared between calls.
pub fn solve<S: AsRef<str>>(problem: &Problem, forced: &[S]) -> Result<Outcome> {
    let cnf = compile_problem(problem, forced)?;
    Ok(solve_cnf(&cnf))
}

/// Components that selecting all of `requested` forces on through the
/// rules, excluding the requested ones, in declaration order.
///
/// This follows implications only. A component left selected by the
/// assigner without being forced is not listed.
pub fn implied_components<S: AsRef<str>>(
    problem: &Problem,
    requested: &[S],
) -> Result<Vec<String>> {
    let cnf = compile_problem::<&str>(problem, &[])?;
    let starts = requested
        .iter()
        .map(|name| cnf.symbols().resolve(name.as_ref()).map(Literal::positive))
        .collect::<Result<Vec<_>>>()?;
    let reached = build_graph(&cnf).reachable_from(&starts);

    Ok(cnf
        .vars()
        .filter(|&var| {
            let lit = Literal::positive(var);
            reached[lit.index()] && !starts.contains(&lit)
        })
        .map(|var| cnf.symbols().name(var).to_string())
        .collect())
}

/// Decide an already compiled CNF.
pub fn solve_cnf(cnf: &Cnf) -> Outcome {
    let outcome = match decide(cnf) {
        Decision::Satisfiable(values) => Outcome::Feasible {
            assignment: Assignment::from_values(cnf, &values),
        },
        Decision::Unsatisfiable { contradicted } => {
            let implicated: Vec<String> = contradicted
                .iter()
                .map(|&var| cnf.symbols().name(var).to_string())
                .collect();
            Outcome::Infeasible {
                component: implicated.first().cloned(),
                implicated,
            }
        }
    };

    match &outcome {
        Outcome::Feasible { assignment } => {
            debug!(selected = assignment.selected().count(), "assignment built");
            info!(components = cnf.var_count(), "configuration is feasible");
        }
        Outcome::Infeasible { component, .. } => {
            info!(component = component.as_deref(), "configuration is infeasible");
        }
    }
    outcome
}
