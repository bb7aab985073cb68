//! Schema document loading
//!
//! Documents are JSON or YAML, fetched from a file or an HTTP(S) URL, and
//! parsed into a validated [`crate::schema::Service`].

pub mod composite_loader;
pub mod document;
pub mod file_loader;
pub mod http_loader;
pub mod parser;

pub use composite_loader::CompositeSchemaLoader;
pub use document::{DocumentFormat, SchemaDocument};
pub use file_loader::FileSchemaLoader;
pub use http_loader::HttpSchemaLoader;
pub use parser::SchemaParser;
