//! Generation context - the core aggregate for the generation domain

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::generation::{GenerationError, Target};
use crate::schema::Service;

/// The context that flows through the generation workflow for one target
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub target: Target,
    pub service: Arc<Service>,
    pub options: GenerationOptions,
    pub metadata: GenerationMetadata,
}

/// Target-facing knobs supplied by configuration or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Name of the emitted client type; derived from the service name when unset
    pub client_name: Option<String>,
    /// Go package clause, `client` when unset
    pub go_package: Option<String>,
    /// Kotlin package clause, omitted when unset
    pub kotlin_package: Option<String>,
}

/// Metadata about the generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub service_name: String,
    pub generator_version: String,
}

impl GenerationContext {
    /// Create a new generation context
    pub fn new(target: Target, service: Arc<Service>) -> Self {
        let metadata = GenerationMetadata {
            service_name: service.name().to_string(),
            ..Default::default()
        };
        Self {
            target,
            service,
            options: GenerationOptions::default(),
            metadata,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the context has everything a target needs
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.service.name().trim().is_empty() {
            return Err(GenerationError::ValidationError(
                "Service name is required".to_string(),
            ));
        }

        if self.service.methods().is_empty() {
            return Err(GenerationError::ValidationError(format!(
                "Service {} declares no methods",
                self.service.name()
            )));
        }

        if let Some(name) = &self.options.client_name {
            if !is_identifier(name) {
                return Err(GenerationError::ValidationError(format!(
                    "Client name {name:?} is not a valid identifier"
                )));
            }
        }

        if let Some(package) = &self.options.go_package {
            if !is_identifier(package) {
                return Err(GenerationError::ValidationError(format!(
                    "Go package {package:?} is not a valid identifier"
                )));
            }
        }

        if let Some(package) = &self.options.kotlin_package {
            if !package.split('.').all(is_identifier) {
                return Err(GenerationError::ValidationError(format!(
                    "Kotlin package {package:?} is not a valid package name"
                )));
            }
        }

        Ok(())
    }
}

impl Default for GenerationMetadata {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// ASCII letter or underscore, then letters, digits or underscores
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Render context used for template rendering
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, JsonValue>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the render context
    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value);
    }

    /// Check if a variable exists
    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    /// Convert into the context type Tera renders with
    pub fn to_tera_context(&self) -> Result<tera::Context, GenerationError> {
        tera::Context::from_serialize(&self.variables)
            .map_err(|e| GenerationError::RenderError(format!("Invalid render context: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Method, ServiceBuilder};
    use serde_json::json;

    fn service(methods: &[&str]) -> Arc<Service> {
        let mut builder = ServiceBuilder::new("todo");
        for m in methods {
            builder.add_method(Method::new(*m));
        }
        Arc::new(builder.build().unwrap())
    }

    #[test]
    fn test_generation_context_creation() {
        let context = GenerationContext::new(Target::Kotlin, service(&["ping"]));

        assert_eq!(context.target, Target::Kotlin);
        assert_eq!(context.metadata.service_name, "todo");
        assert_eq!(context.metadata.generator_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(context.options, GenerationOptions::default());
        assert!(context.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_service_without_methods() {
        let context = GenerationContext::new(Target::Go, service(&[]));
        assert!(matches!(
            context.validate(),
            Err(GenerationError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let bad_client = GenerationContext::new(Target::Swift, service(&["ping"])).with_options(
            GenerationOptions {
                client_name: Some("My Client".to_string()),
                ..Default::default()
            },
        );
        assert!(bad_client.validate().is_err());

        let bad_package = GenerationContext::new(Target::Go, service(&["ping"])).with_options(
            GenerationOptions {
                go_package: Some("9lives".to_string()),
                ..Default::default()
            },
        );
        assert!(bad_package.validate().is_err());

        let good_kotlin = GenerationContext::new(Target::Kotlin, service(&["ping"])).with_options(
            GenerationOptions {
                kotlin_package: Some("com.example.todo".to_string()),
                ..Default::default()
            },
        );
        assert!(good_kotlin.validate().is_ok());
    }

    #[test]
    fn test_render_context_variables() {
        let mut context = RenderContext::new();
        context.add_variable("client_name", json!("TodoClient"));

        assert!(context.has_variable("client_name"));
        assert!(!context.has_variable("missing"));
        assert_eq!(context.get("client_name"), Some(&json!("TodoClient")));
        assert!(context.to_tera_context().is_ok());
    }
}
