//! Error types for rule files and templates.

use cfgsat_core::SolveError;

/// Errors that can occur while reading, writing, or resolving rule files.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// A line mentions a rule keyword but is not `A KEYWORD B`.
    #[error("line {line}: malformed rule '{text}' (expected 'A REQUIRES B' or 'A CONFLICTS B')")]
    MalformedRule { line: usize, text: String },

    /// No built-in template has this name.
    #[error("unknown template '{name}'")]
    UnknownTemplate { name: String },

    /// The parsed rules do not form a valid problem.
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// I/O error reading or writing a rule file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rule file operations.
pub type Result<T> = std::result::Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RulesError::MalformedRule {
            line: 4,
            text: "A REQUIRES".into(),
        };
        assert!(err.to_string().starts_with("line 4:"));

        let err: RulesError = SolveError::UnknownComponent {
            name: "Ghost".into(),
        }
        .into();
        assert_eq!(err.to_string(), "unknown component 'Ghost'");
    }
}
