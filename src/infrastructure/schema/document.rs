//! Serde representation of a schema document (JSON or YAML)

use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level schema document
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Named shapes; a map so declaration order is the sorted name order
    #[serde(default)]
    pub types: BTreeMap<String, TypeDefinition>,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeDefinition {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    #[serde(default)]
    pub wire_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Inline input fields, declared as the `<method>_input` shape
    #[serde(default)]
    pub inputs: Option<Vec<FieldDefinition>>,
    /// Inline output fields, declared as the `<method>_output` shape
    #[serde(default)]
    pub outputs: Option<Vec<FieldDefinition>>,
    /// Reference to a named input type
    #[serde(default)]
    pub input: Option<String>,
    /// Reference to a named output type
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub wire_name: Option<String>,
    #[serde(flatten)]
    pub ty: TypeRef,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// A field's type: a primitive or array by `type`, or a named type by `$ref`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeRef {
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub items: Option<Box<TypeRef>>,
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub nullable: bool,
}

/// Serialization format of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// Try JSON first, then YAML
    Unknown,
}

impl DocumentFormat {
    /// Guess the format from a path or URL extension
    pub fn from_source(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.ends_with(".json") {
            DocumentFormat::Json
        } else if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Unknown
        }
    }

    /// Parse raw document text into a JSON value
    pub fn parse(self, content: &str) -> Result<serde_json::Value, crate::schema::SchemaError> {
        use crate::schema::SchemaError;

        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| SchemaError::LoadError(format!("Failed to parse YAML: {e}"))),
            DocumentFormat::Unknown => serde_json::from_str(content)
                .or_else(|_| serde_yaml::from_str(content))
                .map_err(|e| SchemaError::LoadError(format!("Failed to parse schema: {e}"))),
        }
    }
}
