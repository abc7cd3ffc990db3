//! Error types for the feasibility core.

/// Configuration errors raised before any graph work starts.
///
/// An unsatisfiable rule set is not an error; it comes back as
/// [`Outcome::Infeasible`](crate::solve::Outcome::Infeasible).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// A rule or a forced selection names a component that was never declared.
    #[error("unknown component '{name}'")]
    UnknownComponent { name: String },

    /// Two declared components share a name.
    #[error("duplicate component '{name}'")]
    DuplicateComponent { name: String },

    /// Brute-force enumeration was asked to cover too many components.
    #[error("cannot enumerate {components} components (limit is {limit})")]
    EnumerationTooLarge { components: usize, limit: usize },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, SolveError>;
