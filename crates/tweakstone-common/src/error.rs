//! Error types shared across Tweakstone.

use thiserror::Error;

/// Errors produced while validating or fixing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Namespace contains characters outside `[a-z0-9_.-]` or is empty
    #[error("invalid namespace '{0}': allowed characters are [a-z0-9_.-]")]
    InvalidNamespace(String),

    /// Path contains characters outside `[a-z0-9_./-]` or is empty
    #[error("invalid path '{0}': allowed characters are [a-z0-9_./-]")]
    InvalidPath(String),

    /// Identifier string is not of the form `namespace:path`
    #[error("identifier '{0}' is not of the form namespace:path")]
    MissingSeparator(String),

    /// Nothing legal was left after the fixing pass
    #[error("name '{0}' is empty after fixing")]
    EmptyAfterFixing(String),
}

/// Result type alias for naming operations.
pub type NameResult<T> = Result<T, NameError>;
