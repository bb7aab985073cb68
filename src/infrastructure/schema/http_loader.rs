//! HTTP-based schema loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::document::DocumentFormat;
use super::parser::SchemaParser;
use crate::schema::{SchemaError, SchemaLoader, Service};

/// Loads schema documents from HTTP/HTTPS URLs
pub struct HttpSchemaLoader {
    client: Client,
}

impl HttpSchemaLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

impl Default for HttpSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLoader for HttpSchemaLoader {
    async fn load(&self, source: &str) -> Result<Service, SchemaError> {
        if !is_url(source) {
            return Err(SchemaError::LoadError(format!(
                "HttpSchemaLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            SchemaError::LoadError(format!("Failed to fetch schema from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchemaError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response
            .text()
            .await
            .map_err(|e| SchemaError::LoadError(format!("Failed to read response body: {e}")))?;

        let format = if content_type.contains("json") {
            DocumentFormat::Json
        } else if content_type.contains("yaml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::from_source(source)
        };

        SchemaParser::new(format.parse(&content)?).parse()
    }
}

pub(crate) fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
