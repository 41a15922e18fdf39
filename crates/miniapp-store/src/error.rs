//! Error types for store operations.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the store's import/export boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The import payload was not a valid project document.
    #[error("Failed to import project: {0}")]
    Import(#[source] serde_json::Error),

    /// The project could not be serialized.
    #[error("Failed to export project: {0}")]
    Export(#[source] serde_json::Error),
}
