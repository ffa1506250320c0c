//! Error taxonomy shared by every session model.

use thiserror::Error;

/// Result alias for session model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the forum, chat and record models.
///
/// All variants are raised synchronously by the operation that detects
/// them and none of them leave a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller supplied empty or blank required input.
    #[error("{field} must not be empty")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A referenced entity does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Entity kind, e.g. `post` or `session`.
        kind: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },
    /// Protocol misuse, e.g. a second pending response.
    #[error("invalid state: {0}")]
    State(String),
    /// The response generator failed.
    #[error("response generator failed: {0}")]
    Generator(String),
}

impl Error {
    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::State(_) => "state",
            Self::Generator(_) => "generator",
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Reject empty or whitespace-only text.
pub(crate) fn require(field: &'static str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::Validation { field });
    }
    Ok(())
}
