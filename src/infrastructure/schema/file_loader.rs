//! File-based schema loader

use async_trait::async_trait;
use std::path::Path;

use super::document::DocumentFormat;
use super::parser::SchemaParser;
use crate::schema::{SchemaError, SchemaLoader, Service};

/// Loads schema documents from the local filesystem
pub struct FileSchemaLoader;

impl FileSchemaLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLoader for FileSchemaLoader {
    async fn load(&self, source: &str) -> Result<Service, SchemaError> {
        let path = Path::new(source);
        if !path.exists() {
            return Err(SchemaError::LoadError(format!(
                "Schema file not found: {source}"
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let value = DocumentFormat::from_source(source).parse(&content)?;
        SchemaParser::new(value).parse()
    }
}
