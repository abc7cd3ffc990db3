//! Direct rule checking for a concrete selection.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::problem::Problem;
use crate::solve::Assignment;
use crate::symbols::SymbolTable;

/// A rule broken by a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// `component` is selected but `required` is not.
    MissingRequirement { component: String, required: String },
    /// `first` and `second` are both selected.
    Conflict { first: String, second: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingRequirement {
                component,
                required,
            } => write!(f, "{component} requires {required}, which is not selected"),
            Violation::Conflict { first, second } => {
                write!(f, "{first} conflicts with {second}, both are selected")
            }
        }
    }
}

/// Check the selection "exactly the components in `selected`" against every
/// rule of `problem`.
///
/// Violations come back in rule order, requires before conflicts. Names in
/// `selected` and in the rules must all be declared.
pub fn check_selection<S: AsRef<str>>(problem: &Problem, selected: &[S]) -> Result<Vec<Violation>> {
    let symbols = SymbolTable::from_components(&problem.components)?;
    for (a, b) in problem.requires.iter().chain(&problem.conflicts) {
        symbols.resolve(a)?;
        symbols.resolve(b)?;
    }

    let mut values = vec![false; symbols.len()];
    for name in selected {
        values[symbols.resolve(name.as_ref())? as usize] = true;
    }

    Ok(collect_violations(problem, |name| {
        symbols.id(name).is_some_and(|var| values[var as usize])
    }))
}

/// Rules of `problem` broken by `assignment`.
pub(crate) fn check_assignment(problem: &Problem, assignment: &Assignment) -> Vec<Violation> {
    collect_violations(problem, |name| assignment.is_selected(name))
}

fn collect_violations<F>(problem: &Problem, selected: F) -> Vec<Violation>
where
    F: Fn(&str) -> bool,
{
    let mut violations = Vec::new();
    for (component, required) in &problem.requires {
        if selected(component) && !selected(required) {
            violations.push(Violation::MissingRequirement {
                component: component.clone(),
                required: required.clone(),
            });
        }
    }
    for (first, second) in &problem.conflicts {
        if selected(first) && selected(second) {
            violations.push(Violation::Conflict {
                first: first.clone(),
                second: second.clone(),
            });
        }
    }
    violations
}
