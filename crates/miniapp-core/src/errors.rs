//! Error types for the data model.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while loading model data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Palette catalog could not be parsed.
    #[error("Invalid palette data: {0}")]
    InvalidPalette(#[from] serde_json::Error),
}
