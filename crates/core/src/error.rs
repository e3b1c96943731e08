//! Error types for the Shelfmate domain model

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or parsing domain values
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lifecycle state name that does not map to any state
    #[error("Unknown book state: {0}")]
    UnknownState(String),

    /// A book failed validation
    #[error("Invalid book {id}: {}", .errors.join("; "))]
    InvalidBook { id: String, errors: Vec<String> },
}

impl CoreError {
    /// Builds an `InvalidBook` error from validation messages
    pub fn invalid_book(id: impl Into<String>, errors: Vec<String>) -> Self {
        Self::InvalidBook {
            id: id.into(),
            errors,
        }
    }
}
