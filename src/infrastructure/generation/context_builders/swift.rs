//! Swift-specific context builder for code generation

use serde_json::json;

use crate::generation::{
    ContextBuilder, GenerationContext, GenerationError, IdentifierRole, MappedType, NamingPolicy,
    RenderContext, ServiceContext, Target, TypeMapper,
    service_context::shape_name,
    utils::{escape_reserved, to_camel_case, to_proper_case},
};
use crate::schema::{FieldType, Primitive, Service};

/// Keywords that need backticks when used as identifiers
const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Self", "as", "associatedtype", "break", "case", "catch", "class", "continue",
    "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough", "false",
    "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout", "internal",
    "is", "let", "nil", "open", "operator", "private", "protocol", "public", "repeat",
    "rethrows", "return", "self", "static", "struct", "subscript", "super", "switch", "throw",
    "throws", "true", "try", "typealias", "var", "where", "while",
];

/// Swift-specific context builder
///
/// Types are structs with explicit `CodingKeys`; `init(from:)` fills absent
/// keys with zero values and `encode(to:)` skips read-only fields.
pub struct SwiftContextBuilder;

impl SwiftContextBuilder {
    pub fn new() -> Self {
        Self
    }

    fn conformance(is_input: bool, is_output: bool) -> &'static str {
        match (is_input, is_output) {
            (true, true) => "Codable",
            (true, false) => "Encodable",
            _ => "Decodable",
        }
    }
}

impl Default for SwiftContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingPolicy for SwiftContextBuilder {
    fn identifier(&self, name: &str, role: IdentifierRole) -> String {
        let ident = match role {
            IdentifierRole::Type => to_proper_case(name),
            IdentifierRole::Method | IdentifierRole::Field | IdentifierRole::Parameter => {
                to_camel_case(name)
            }
        };
        escape_reserved(ident, SWIFT_KEYWORDS, |s| format!("`{s}`"))
    }

    fn reserved_type_names(&self, _client_name: &str) -> Vec<String> {
        vec!["RPCError".to_string(), "ResponseErrorBody".to_string()]
    }

    fn client_members(&self) -> &'static [&'static str] {
        &["url", "authToken", "session", "encoder", "decoder", "call"]
    }
}

impl TypeMapper for SwiftContextBuilder {
    fn map_type(&self, ty: &FieldType, service: &Service) -> Result<MappedType, GenerationError> {
        Ok(match ty {
            FieldType::Primitive(Primitive::String) => MappedType::new("String", "\"\""),
            FieldType::Primitive(Primitive::Int) => MappedType::new("Int", "0"),
            FieldType::Primitive(Primitive::Bool) => MappedType::new("Bool", "false"),
            // Coded through the client's .iso8601 date strategies
            FieldType::Primitive(Primitive::Timestamp) => {
                MappedType::new("Date", "Date(timeIntervalSince1970: 0)")
            }
            FieldType::Array(inner) => MappedType::new(
                format!("[{}]", self.map_type(inner, service)?.declared),
                "[]",
            ),
            FieldType::Reference(id) => {
                let name = shape_name(self, service, *id)?;
                MappedType::new(name.clone(), format!("{name}()"))
            }
            FieldType::Optional(inner) => MappedType::new(
                format!("{}?", self.map_type(inner, service)?.declared),
                "nil",
            ),
        })
    }
}

impl ContextBuilder for SwiftContextBuilder {
    fn build(&self, context: &GenerationContext) -> Result<RenderContext, GenerationError> {
        if context.target != Target::Swift {
            return Err(GenerationError::ValidationError(format!(
                "SwiftContextBuilder can only build contexts for Swift, got {}",
                context.target
            )));
        }

        let mut service = ServiceContext::build(self, context)?;
        for shape in &mut service.shapes {
            shape.extra.insert(
                "conformance".to_string(),
                json!(Self::conformance(shape.is_input, shape.is_output)),
            );
        }

        service.into_render_context()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, Method, ServiceBuilder, Shape};
    use std::sync::Arc;

    #[test]
    fn test_swift_naming() {
        let builder = SwiftContextBuilder::new();
        assert_eq!(builder.identifier("remove_item_input", IdentifierRole::Type), "RemoveItemInput");
        assert_eq!(builder.identifier("remove_item", IdentifierRole::Method), "removeItem");
        assert_eq!(builder.identifier("default", IdentifierRole::Field), "`default`");
        assert_eq!(builder.identifier("self", IdentifierRole::Parameter), "`self`");
    }

    #[test]
    fn test_swift_type_mapping() {
        let mut schema = ServiceBuilder::new("todo");
        let item = schema.add_shape(Shape::new("item", vec![]));
        let service = schema.build().unwrap();
        let builder = SwiftContextBuilder::new();

        let map = |ty: FieldType| builder.map_type(&ty, &service).unwrap();
        assert_eq!(map(FieldType::bool()), MappedType::new("Bool", "false"));
        assert_eq!(
            map(FieldType::timestamp()),
            MappedType::new("Date", "Date(timeIntervalSince1970: 0)")
        );
        assert_eq!(
            map(FieldType::array(FieldType::Reference(item))),
            MappedType::new("[Item]", "[]")
        );
        assert_eq!(
            map(FieldType::optional(FieldType::string())),
            MappedType::new("String?", "nil")
        );
    }

    #[test]
    fn test_swift_conformance_follows_usage() {
        let mut schema = ServiceBuilder::new("todo");
        let item = schema.add_shape(Shape::new("item", vec![Field::new("id", FieldType::int())]));
        let input = schema.add_shape(Shape::new(
            "put_input",
            vec![Field::new("item", FieldType::Reference(item))],
        ));
        let output = schema.add_shape(Shape::new(
            "get_output",
            vec![Field::new("item", FieldType::Reference(item))],
        ));
        schema.add_method(Method::new("put").with_input(input));
        schema.add_method(Method::new("get").with_output(output));
        let context = GenerationContext::new(Target::Swift, Arc::new(schema.build().unwrap()));

        let render = SwiftContextBuilder::new().build(&context).unwrap();
        let shapes = render.get("shapes").unwrap().as_array().unwrap();
        let conformance: Vec<_> = shapes
            .iter()
            .map(|s| (s["name"].as_str().unwrap(), s["conformance"].as_str().unwrap()))
            .collect();
        assert_eq!(
            conformance,
            vec![
                ("Item", "Codable"),
                ("PutInput", "Encodable"),
                ("GetOutput", "Decodable"),
            ]
        );
    }

    #[test]
    fn test_swift_rejects_field_starting_with_digit() {
        let mut schema = ServiceBuilder::new("todo");
        let shape = schema.add_shape(Shape::new(
            "login_input",
            vec![Field::new("2fa", FieldType::bool())],
        ));
        schema.add_method(Method::new("login").with_input(shape));
        let context = GenerationContext::new(Target::Swift, Arc::new(schema.build().unwrap()));

        match SwiftContextBuilder::new().build(&context) {
            Err(GenerationError::InvalidIdentifier { identifier, .. }) => {
                assert_eq!(identifier, "2fa")
            }
            other => panic!("expected an invalid identifier, got {other:?}"),
        }
    }

    #[test]
    fn test_swift_rejects_method_named_like_client_member() {
        let mut schema = ServiceBuilder::new("todo");
        schema.add_method(Method::new("session"));
        let context = GenerationContext::new(Target::Swift, Arc::new(schema.build().unwrap()));

        assert!(matches!(
            SwiftContextBuilder::new().build(&context),
            Err(GenerationError::NameConflict { ref identifier, .. }) if identifier == "session"
        ));
    }
}
