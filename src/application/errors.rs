//! Application layer error types

use thiserror::Error;

use crate::generation::Target;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Schema error: {0}")]
    SchemaError(#[from] crate::schema::SchemaError),

    #[error("Generation error: {0}")]
    GenerationError(#[from] crate::generation::GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Validation errors for requests
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Schema source cannot be empty")]
    EmptySchema,

    #[error("At least one target is required")]
    NoTargets,

    #[error("Target {0} requested more than once")]
    DuplicateTarget(Target),
}
