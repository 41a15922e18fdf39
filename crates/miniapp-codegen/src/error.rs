//! Error types for code generation output.
//!
//! Generating a bundle never fails; these errors come from laying the bundle
//! out as files (path templates and JSON serialization).

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while emitting generated files.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// A rendered output path was empty or escaped the output root.
    #[error("Invalid output path '{0}'")]
    InvalidPath(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
