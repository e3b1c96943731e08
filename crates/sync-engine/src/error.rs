//! Error types for sync operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during synchronization
#[derive(Debug, Error)]
pub enum SyncError {
    /// Another sync is running on the same engine
    #[error("Sync already in progress")]
    InProgress,

    /// The remote store rejected an operation
    #[error("Store error: {0}")]
    Store(String),

    /// A snapshot file could not be read or written
    #[error("Failed to access snapshot at {path}: {source}")]
    Snapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}
