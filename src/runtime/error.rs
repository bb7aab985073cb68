//! Error types for the reference client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Protocol error built from a response with a non-success status
///
/// `error_type` and `message` are empty when the body was not an error object.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{status_code} {status}: {message}")]
pub struct RpcError {
    pub status: String,
    pub status_code: u16,
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Body of a failure response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

impl RpcError {
    /// Build from a status and the raw response body
    pub fn from_response(status_code: u16, status: impl Into<String>, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        Self {
            status: status.into(),
            status_code,
            error_type: parsed.error_type,
            message: parsed.message,
        }
    }
}

/// A value that does not fit the shape it is encoded or decoded against
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {message}")]
pub struct CodecError {
    /// Dotted wire-name path to the offending value
    pub path: String,
    pub message: String,
}

impl CodecError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`crate::runtime::RpcClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a status of 300 or above
    #[error("RPC error: {0}")]
    Protocol(#[from] RpcError),

    /// No response was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success body did not match the output shape
    #[error("Decode error: {0}")]
    Decode(CodecError),

    /// The input did not match the input shape
    #[error("Encode error: {0}")]
    Encode(CodecError),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}
