//! Error types for the generation domain

use crate::generation::Target;
use thiserror::Error;

/// Errors that can occur during code generation
///
/// Every variant is fatal for the target being generated: no partial
/// output is produced once one of these is raised.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Unsupported target: {0}")]
    UnsupportedTarget(Target),

    #[error("{first} and {second} both become {identifier}")]
    NameConflict {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("{source_name} becomes {identifier:?}, which is not a valid identifier")]
    InvalidIdentifier {
        source_name: String,
        identifier: String,
    },

    #[error("Shape {shape} is not declared by the service")]
    UnresolvedShape { shape: usize },

    #[error("Template discovery error: {0}")]
    DiscoveryError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Post-processing error: {0}")]
    PostProcessingError(String),

    #[error("Schema error: {0}")]
    SchemaError(#[from] crate::schema::SchemaError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
