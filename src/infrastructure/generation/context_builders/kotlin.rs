//! Kotlin-specific context builder for code generation

use serde_json::json;

use crate::generation::{
    ContextBuilder, GenerationContext, GenerationError, IdentifierRole, MappedType, NamingPolicy,
    RenderContext, ServiceContext, Target, TypeMapper,
    service_context::shape_name,
    utils::{escape_reserved, to_camel_case, to_proper_case},
};
use crate::schema::{FieldType, Primitive, Service};

/// Hard keywords, which need backticks to be used as identifiers
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Kotlin-specific context builder
///
/// Types are `@Serializable` data classes decoded by kotlinx.serialization;
/// request bodies are written by a generated `toJson()` so read-only fields
/// never reach the wire.
pub struct KotlinContextBuilder;

impl KotlinContextBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KotlinContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingPolicy for KotlinContextBuilder {
    fn identifier(&self, name: &str, role: IdentifierRole) -> String {
        let ident = match role {
            IdentifierRole::Type => to_proper_case(name),
            IdentifierRole::Method | IdentifierRole::Field | IdentifierRole::Parameter => {
                to_camel_case(name)
            }
        };
        escape_reserved(ident, KOTLIN_KEYWORDS, |s| format!("`{s}`"))
    }

    fn reserved_type_names(&self, _client_name: &str) -> Vec<String> {
        vec!["RPCError".to_string(), "ResponseError".to_string()]
    }

    fn client_members(&self) -> &'static [&'static str] {
        &["url", "authToken", "client", "json", "call"]
    }
}

impl TypeMapper for KotlinContextBuilder {
    fn map_type(&self, ty: &FieldType, service: &Service) -> Result<MappedType, GenerationError> {
        Ok(match ty {
            // Timestamps stay ISO-8601 text; kotlinx.serialization has no built-in instant type
            FieldType::Primitive(Primitive::String | Primitive::Timestamp) => {
                MappedType::new("String", "\"\"")
            }
            FieldType::Primitive(Primitive::Int) => MappedType::new("Int", "0"),
            FieldType::Primitive(Primitive::Bool) => MappedType::new("Boolean", "false"),
            FieldType::Array(inner) => MappedType::new(
                format!("List<{}>", self.map_type(inner, service)?.declared),
                "emptyList()",
            ),
            FieldType::Reference(id) => {
                let name = shape_name(self, service, *id)?;
                MappedType::new(name.clone(), format!("{name}()"))
            }
            FieldType::Optional(inner) => MappedType::new(
                format!("{}?", self.map_type(inner, service)?.declared),
                "null",
            ),
        })
    }

    fn encode_expr(
        &self,
        ty: &FieldType,
        value: &str,
        service: &Service,
    ) -> Result<Option<String>, GenerationError> {
        let expr = match ty {
            FieldType::Primitive(_) => format!("JsonPrimitive({value})"),
            FieldType::Array(inner) => format!(
                "JsonArray({value}.map {{ {} }})",
                self.encode_expr(inner, "it", service)?.unwrap_or_default()
            ),
            FieldType::Reference(_) => format!("{value}.toJson()"),
            FieldType::Optional(inner) => format!(
                "{value}?.let {{ {} }} ?: JsonNull",
                self.encode_expr(inner, "it", service)?.unwrap_or_default()
            ),
        };
        Ok(Some(expr))
    }

    fn present_access(&self, _field: &str) -> String {
        // Optional fields are encoded inside `field?.let { ... }`
        "it".to_string()
    }
}

impl ContextBuilder for KotlinContextBuilder {
    fn build(&self, context: &GenerationContext) -> Result<RenderContext, GenerationError> {
        if context.target != Target::Kotlin {
            return Err(GenerationError::ValidationError(format!(
                "KotlinContextBuilder can only build contexts for Kotlin, got {}",
                context.target
            )));
        }

        let service = ServiceContext::build(self, context)?;
        let has_encoders = service.shapes.iter().any(|s| s.is_input);

        let mut render_context = service.into_render_context()?;
        render_context.add_variable("kotlin_package", json!(context.options.kotlin_package));
        render_context.add_variable("has_encoders", json!(has_encoders));

        Ok(render_context)
    }
}
