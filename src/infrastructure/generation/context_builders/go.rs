//! Go-specific context builder for code generation

use serde_json::json;

use crate::generation::{
    ContextBuilder, GenerationContext, GenerationError, IdentifierRole, MappedType, NamingPolicy,
    RenderContext, ServiceContext, Target, TypeMapper,
    service_context::shape_name,
    utils::{escape_reserved, to_go_lower_name, to_go_name},
};
use crate::schema::{FieldType, Primitive, Service};

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Package clause used when none is configured
pub const DEFAULT_GO_PACKAGE: &str = "client";

/// Go-specific context builder
///
/// Types are plain structs with `json` tags. Decoding relies on Go zero
/// values. Input shapes carrying read-only fields or required slices get a
/// `MarshalJSON` that writes only the writable fields, with nil slices as `[]`.
pub struct GoContextBuilder;

impl GoContextBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingPolicy for GoContextBuilder {
    fn identifier(&self, name: &str, role: IdentifierRole) -> String {
        match role {
            IdentifierRole::Type | IdentifierRole::Method | IdentifierRole::Field => to_go_name(name),
            IdentifierRole::Parameter => {
                escape_reserved(to_go_lower_name(name), GO_KEYWORDS, |s| format!("{s}_"))
            }
        }
    }

    fn reserved_type_names(&self, client_name: &str) -> Vec<String> {
        vec![
            "RPCError".to_string(),
            "decodeError".to_string(),
            format!("New{client_name}"),
        ]
    }

    fn client_members(&self) -> &'static [&'static str] {
        &["URL", "AuthToken", "HTTPClient", "call"]
    }
}

impl TypeMapper for GoContextBuilder {
    fn map_type(&self, ty: &FieldType, service: &Service) -> Result<MappedType, GenerationError> {
        Ok(match ty {
            FieldType::Primitive(Primitive::String) => MappedType::new("string", "\"\""),
            FieldType::Primitive(Primitive::Int) => MappedType::new("int", "0"),
            FieldType::Primitive(Primitive::Bool) => MappedType::new("bool", "false"),
            FieldType::Primitive(Primitive::Timestamp) => {
                MappedType::new("time.Time", "time.Time{}")
            }
            FieldType::Array(inner) => MappedType::new(
                format!("[]{}", self.map_type(inner, service)?.declared),
                "nil",
            ),
            FieldType::Reference(id) => {
                let name = shape_name(self, service, *id)?;
                MappedType::new(name.clone(), format!("{name}{{}}"))
            }
            FieldType::Optional(inner) => MappedType::new(
                format!("*{}", self.map_type(inner, service)?.declared),
                "nil",
            ),
        })
    }
}

impl ContextBuilder for GoContextBuilder {
    fn build(&self, context: &GenerationContext) -> Result<RenderContext, GenerationError> {
        if context.target != Target::Go {
            return Err(GenerationError::ValidationError(format!(
                "GoContextBuilder can only build contexts for Go, got {}",
                context.target
            )));
        }

        let mut service = ServiceContext::build(self, context)?;
        let mut needs_json = false;
        for shape in &mut service.shapes {
            // A nil slice marshals as null; the request form wants []
            let nil_slices: Vec<_> = shape
                .fields
                .iter()
                .filter(|f| !f.read_only && !f.optional && f.declared.starts_with("[]"))
                .map(|f| json!({ "name": f.name, "declared": f.declared }))
                .collect();
            let needs_marshaler = shape.is_input && (shape.has_read_only || !nil_slices.is_empty());
            needs_json |= needs_marshaler;
            shape
                .extra
                .insert("needs_marshaler".to_string(), json!(needs_marshaler));
            shape.extra.insert("nil_slices".to_string(), json!(nil_slices));
        }

        // Go rejects unused imports, so the types file imports only what it uses
        let mut imports = Vec::new();
        if needs_json {
            imports.push("encoding/json");
        }
        if service.uses_timestamp {
            imports.push("time");
        }

        let package = context
            .options
            .go_package
            .clone()
            .unwrap_or_else(|| DEFAULT_GO_PACKAGE.to_string());

        let mut render_context = service.into_render_context()?;
        render_context.add_variable("package", json!(package));
        render_context.add_variable("imports", json!(imports));

        Ok(render_context)
    }
}
