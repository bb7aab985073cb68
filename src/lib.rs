//! rpcgen - statically-typed RPC client generator
//!
//! Reads one service schema and emits idiomatic clients for Kotlin, Swift,
//! Go and TypeScript that speak a small JSON-over-POST protocol. The
//! [`runtime`] module is a schema-driven Rust client for the same protocol.
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod generation;
pub mod infrastructure;
pub mod runtime;
pub mod schema;
