//! Port interfaces for the schema domain

use async_trait::async_trait;

use crate::schema::{SchemaError, Service};

/// Loads a schema document from a source (path or URL) into a validated [`Service`]
#[async_trait]
pub trait SchemaLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<Service, SchemaError>;
}
