//! TypeScript-specific context builder for code generation

use serde_json::json;
use std::collections::BTreeSet;

use crate::generation::{
    ContextBuilder, GenerationContext, GenerationError, IdentifierRole, MappedType, NamingPolicy,
    RenderContext, ServiceContext, Target, TypeMapper,
    sanitizers::escape_string_literal,
    service_context::shape_name,
    utils::{escape_reserved, to_camel_case, to_proper_case},
};
use crate::schema::{FieldType, Primitive, Service};

/// Reserved words that cannot name a parameter in strict mode
const TS_RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// TypeScript-specific context builder
///
/// Types are interfaces with a `newX()` factory. Because JSON has no date
/// type and interfaces carry no runtime information, output shapes get a
/// `decodeX()` and input shapes an `encodeX()` written out field by field.
pub struct TypeScriptContextBuilder;

impl TypeScriptContextBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingPolicy for TypeScriptContextBuilder {
    fn identifier(&self, name: &str, role: IdentifierRole) -> String {
        match role {
            IdentifierRole::Type => to_proper_case(name),
            // Reserved words are legal property and method names
            IdentifierRole::Method | IdentifierRole::Field => to_camel_case(name),
            IdentifierRole::Parameter => {
                escape_reserved(to_camel_case(name), TS_RESERVED, |s| format!("{s}_"))
            }
        }
    }

    fn client_members(&self) -> &'static [&'static str] {
        &["url", "authToken", "call"]
    }
}

impl TypeMapper for TypeScriptContextBuilder {
    fn map_type(&self, ty: &FieldType, service: &Service) -> Result<MappedType, GenerationError> {
        Ok(match ty {
            FieldType::Primitive(Primitive::String) => MappedType::new("string", "\"\""),
            FieldType::Primitive(Primitive::Int) => MappedType::new("number", "0"),
            FieldType::Primitive(Primitive::Bool) => MappedType::new("boolean", "false"),
            FieldType::Primitive(Primitive::Timestamp) => MappedType::new("Date", "new Date(0)"),
            FieldType::Array(inner) => {
                let item = self.map_type(inner, service)?.declared;
                let item = if item.contains(' ') {
                    format!("({item})")
                } else {
                    item
                };
                MappedType::new(format!("{item}[]"), "[]")
            }
            FieldType::Reference(id) => {
                let name = shape_name(self, service, *id)?;
                MappedType::new(name.clone(), format!("new{name}()"))
            }
            FieldType::Optional(inner) => MappedType::new(
                format!("{} | undefined", self.map_type(inner, service)?.declared),
                "undefined",
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
            FieldType::Primitive(Primitive::Timestamp) => format!("{value}.toISOString()"),
            FieldType::Primitive(_) => value.to_string(),
            FieldType::Array(inner) => match self.encode_expr(inner, "x", service)? {
                Some(item) if item != "x" => format!("{value}.map((x) => {item})"),
                _ => value.to_string(),
            },
            FieldType::Reference(id) => {
                format!("encode{}({value})", shape_name(self, service, *id)?)
            }
            FieldType::Optional(inner) => format!(
                "{value} === undefined ? null : {}",
                self.encode_expr(inner, value, service)?.unwrap_or_default()
            ),
        };
        Ok(Some(expr))
    }

    fn decode_expr(
        &self,
        ty: &FieldType,
        value: &str,
        service: &Service,
    ) -> Result<Option<String>, GenerationError> {
        let expr = match ty {
            FieldType::Primitive(Primitive::Timestamp) => format!("new Date({value})"),
            FieldType::Primitive(_) => value.to_string(),
            FieldType::Array(inner) => match self.decode_expr(inner, "x", service)? {
                Some(item) if item != "x" => format!("({value} as any[]).map((x: any) => {item})"),
                _ => value.to_string(),
            },
            FieldType::Reference(id) => {
                format!("decode{}({value})", shape_name(self, service, *id)?)
            }
            FieldType::Optional(inner) => format!(
                "{value} == null ? undefined : {}",
                self.decode_expr(inner, value, service)?.unwrap_or_default()
            ),
        };
        Ok(Some(expr))
    }

    fn field_access(&self, field: &str) -> String {
        format!("v.{field}")
    }

    fn wire_access(&self, wire_name: &str) -> String {
        format!("json[\"{}\"]", escape_string_literal(wire_name))
    }
}

impl ContextBuilder for TypeScriptContextBuilder {
    fn build(&self, context: &GenerationContext) -> Result<RenderContext, GenerationError> {
        if context.target != Target::TypeScript {
            return Err(GenerationError::ValidationError(format!(
                "TypeScriptContextBuilder can only build contexts for TypeScript, got {}",
                context.target
            )));
        }

        let service = ServiceContext::build(self, context)?;

        // The client imports exactly what its methods touch
        let mut type_imports = BTreeSet::new();
        let mut value_imports = BTreeSet::new();
        for method in &service.methods {
            if let Some(input) = &method.input_type {
                type_imports.insert(input.clone());
                value_imports.insert(format!("encode{input}"));
            }
            if let Some(output) = &method.output_type {
                type_imports.insert(output.clone());
                value_imports.insert(format!("decode{output}"));
            }
        }

        let mut render_context = service.into_render_context()?;
        render_context.add_variable("type_imports", json!(type_imports));
        render_context.add_variable("value_imports", json!(value_imports));

        Ok(render_context)
    }
}
