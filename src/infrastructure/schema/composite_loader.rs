//! Composite schema loader that picks a strategy from the source

use async_trait::async_trait;

use super::http_loader::is_url;
use super::{FileSchemaLoader, HttpSchemaLoader};
use crate::schema::{SchemaError, SchemaLoader, Service};

/// Dispatches URLs to the HTTP loader and everything else to the file loader
pub struct CompositeSchemaLoader {
    http: Box<dyn SchemaLoader>,
    file: Box<dyn SchemaLoader>,
}

impl CompositeSchemaLoader {
    pub fn new() -> Self {
        Self {
            http: Box::new(HttpSchemaLoader::new()),
            file: Box::new(FileSchemaLoader::new()),
        }
    }
}

impl Default for CompositeSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLoader for CompositeSchemaLoader {
    async fn load(&self, source: &str) -> Result<Service, SchemaError> {
        if is_url(source) {
            tracing::debug!("CompositeSchemaLoader: using HTTP loader for {source}");
            self.http.load(source).await
        } else {
            tracing::debug!("CompositeSchemaLoader: using file loader for {source}");
            self.file.load(source).await
        }
    }
}
