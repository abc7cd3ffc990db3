//! Problem instances: declared components and the binary rules between them.

use std::fmt;

use serde::Serialize;

/// A binary rule between two components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Selecting `component` forces `required` to be selected too.
    Requires { component: String, required: String },
    /// `first` and `second` cannot both be selected.
    Conflicts { first: String, second: String },
}

impl Rule {
    pub fn requires(component: impl Into<String>, required: impl Into<String>) -> Self {
        Rule::Requires {
            component: component.into(),
            required: required.into(),
        }
    }

    pub fn conflicts(first: impl Into<String>, second: impl Into<String>) -> Self {
        Rule::Conflicts {
            first: first.into(),
            second: second.into(),
        }
    }

    /// The two component names the rule refers to, left operand first.
    pub fn operands(&self) -> (&str, &str) {
        match self {
            Rule::Requires {
                component,
                required,
            } => (component, required),
            Rule::Conflicts { first, second } => (first, second),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Requires {
                component,
                required,
            } => write!(f, "{component} REQUIRES {required}"),
            Rule::Conflicts { first, second } => write!(f, "{first} CONFLICTS {second}"),
        }
    }
}

/// An already-parsed configuration problem.
///
/// Component names are case-sensitive exact strings. Nothing is validated
/// here; the rule compiler rejects duplicates and unknown references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Selectable components, in declaration order.
    pub components: Vec<String>,
    /// `(A, B)` pairs meaning "A REQUIRES B".
    pub requires: Vec<(String, String)>,
    /// `(A, B)` pairs meaning "A CONFLICTS B".
    pub conflicts: Vec<(String, String)>,
}

impl Problem {
    /// Create a problem over the given components with no rules.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
            requires: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Builder: add an `a REQUIRES b` rule.
    pub fn requires(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.requires.push((a.into(), b.into()));
        self
    }

    /// Builder: add an `a CONFLICTS b` rule.
    pub fn conflicts(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.conflicts.push((a.into(), b.into()));
        self
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: Rule) {
        match rule {
            Rule::Requires {
                component,
                required,
            } => self.requires.push((component, required)),
            Rule::Conflicts { first, second } => self.conflicts.push((first, second)),
        }
    }

    /// All rules, requires first, each group in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        let requires = self
            .requires
            .iter()
            .map(|(a, b)| Rule::requires(a.as_str(), b.as_str()));
        let conflicts = self
            .conflicts
            .iter()
            .map(|(a, b)| Rule::conflicts(a.as_str(), b.as_str()));
        requires.chain(conflicts)
    }

    pub fn rule_count(&self) -> usize {
        self.requires.len() + self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.rule_count() == 0
    }
}
