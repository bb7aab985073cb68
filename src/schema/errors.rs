//! Error types for the schema domain

use thiserror::Error;

/// Errors raised while loading or validating a service schema
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Duplicate shape: {0}")]
    DuplicateShape(String),

    #[error("Duplicate field {field} in shape {shape}")]
    DuplicateField { shape: String, field: String },

    #[error("Duplicate method wire name: {0}")]
    DuplicateMethod(String),

    #[error("Reference to undeclared shape #{0}")]
    UnresolvedShape(usize),

    #[error("Field {field} in shape {shape} nests an optional inside an optional")]
    NestedOptional { shape: String, field: String },

    #[error("Unknown type reference {reference} in {location}")]
    UnknownReference { location: String, reference: String },

    #[error("Unknown field type {type_name} in {location}")]
    UnknownType { location: String, type_name: String },

    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),

    #[error("Schema loading error: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
