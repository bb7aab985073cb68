//! Error types for the template infrastructure layer

use thiserror::Error;

use crate::generation::GenerationError;

/// Errors that can occur in template operations
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template not found at the specified path
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template file is not valid UTF-8
    #[error("Invalid template {path}: {message}")]
    InvalidTemplate { path: String, message: String },

    /// IO error during template operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TemplateError {
    /// Create a new template not found error with path
    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Self::TemplateNotFound(path.into())
    }
}

impl From<TemplateError> for GenerationError {
    fn from(err: TemplateError) -> Self {
        GenerationError::DiscoveryError(err.to_string())
    }
}
