//! Reference client runtime
//!
//! A schema-driven client that speaks the same wire protocol as the
//! generated clients. Inputs and outputs are plain JSON objects keyed by wire
//! name, shaped by the service's input and output shapes.

pub mod client;
pub mod codec;
pub mod error;

pub use client::RpcClient;
pub use error::{ClientError, CodecError, RpcError};
