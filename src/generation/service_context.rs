//! Target-neutral render context for a service
//!
//! Walks the schema once per target, applying that target's naming policy and
//! type mapper. Target context builders start from a [`ServiceContext`] and
//! only add what their templates need on top of it.

use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use std::collections::BTreeMap;

use crate::generation::{
    GenerationContext, GenerationError, IdentifierRole, NamingPolicy, RenderContext, TypeMapper,
    context::is_identifier,
    sanitizers::{escape_string_literal, sanitize_comment},
    utils::to_snake_case,
};
use crate::schema::{Field, Service, Shape, ShapeId};

/// One field as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    pub name: String,
    pub wire_name: String,
    pub declared: String,
    /// Declared type with the outer optional removed
    pub inner_declared: String,
    pub zero_value: String,
    pub optional: bool,
    pub required: bool,
    pub read_only: bool,
    pub comment: Option<String>,
    pub encode: Option<String>,
    pub decode: Option<String>,
}

/// One shape as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct ShapeContext {
    pub name: String,
    pub schema_name: String,
    pub comment: String,
    pub is_input: bool,
    pub is_output: bool,
    pub is_empty: bool,
    pub has_read_only: bool,
    pub has_writable: bool,
    pub fields: Vec<FieldContext>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// One method as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct MethodContext {
    pub name: String,
    pub wire_name: String,
    pub comment: String,
    pub input_param: String,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
    #[serde(skip)]
    pub input_shape: Option<ShapeId>,
    #[serde(skip)]
    pub output_shape: Option<ShapeId>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// Everything the types, client and error templates of a target share
#[derive(Debug, Clone, Serialize)]
pub struct ServiceContext {
    pub service_name: String,
    pub service_comment: Option<String>,
    pub client_name: String,
    pub file_stem: String,
    pub uses_timestamp: bool,
    pub shapes: Vec<ShapeContext>,
    pub methods: Vec<MethodContext>,
}

impl ServiceContext {
    /// Build the context for every reachable shape and every method, in schema order
    pub fn build<L>(lang: &L, context: &GenerationContext) -> Result<Self, GenerationError>
    where
        L: NamingPolicy + TypeMapper + ?Sized,
    {
        let service = context.service.as_ref();

        let roots: Vec<ShapeId> = service
            .methods()
            .iter()
            .flat_map(|m| m.input.into_iter().chain(m.output))
            .collect();

        let client_name = match &context.options.client_name {
            Some(name) => name.clone(),
            None => lang.identifier(&format!("{}_client", service.name()), IdentifierRole::Type),
        };

        let mut types = Scope::default();
        types.claim(&client_name, "the client type".to_string())?;
        for reserved in lang.reserved_type_names(&client_name) {
            let owner = format!("the generated {reserved}");
            types.claim(&reserved, owner)?;
        }

        let mut shapes = Vec::new();
        let mut uses_timestamp = false;
        for id in service.reachable_shapes() {
            let shape = lookup(service, id)?;
            uses_timestamp |= shape.fields.iter().any(|f| f.ty.uses_timestamp());
            let built = build_shape(lang, service, id, shape, roots.contains(&id))?;
            types.claim(&built.name, format!("shape {:?}", shape.name))?;
            shapes.push(built);
        }

        let mut members = Scope::default();
        for member in lang.client_members() {
            members.claim(member, format!("client member {member}"))?;
        }

        let input_param = lang.identifier("input", IdentifierRole::Parameter);
        let mut methods = Vec::with_capacity(service.methods().len());
        for method in service.methods() {
            let name = lang.identifier(&method.name, IdentifierRole::Method);
            members.claim(&name, format!("method {:?}", method.name))?;
            let comment = match &method.description {
                Some(desc) => sanitize_comment(&format!("{name} {desc}")),
                None => format!("{name} calls the {} method.", method.wire_name),
            };
            methods.push(MethodContext {
                wire_name: escape_string_literal(&method.wire_name),
                comment,
                input_param: input_param.clone(),
                input_type: type_name(lang, service, method.input)?,
                output_type: type_name(lang, service, method.output)?,
                input_shape: method.input,
                output_shape: method.output,
                name,
                extra: BTreeMap::new(),
            });
        }

        let service_comment = service.description().map(sanitize_comment);

        Ok(Self {
            service_name: service.name().to_string(),
            service_comment,
            client_name,
            file_stem: to_snake_case(service.name()),
            uses_timestamp,
            shapes,
            methods,
        })
    }

    /// Flatten into the variables every template receives
    pub fn into_render_context(self) -> Result<RenderContext, GenerationError> {
        let mut render_context = RenderContext::new();
        render_context.add_variable("service_name", json!(self.service_name));
        render_context.add_variable("service_comment", json!(self.service_comment));
        render_context.add_variable("client_name", json!(self.client_name));
        render_context.add_variable("file_stem", json!(self.file_stem));
        render_context.add_variable("uses_timestamp", json!(self.uses_timestamp));
        render_context.add_variable("shapes", serde_json::to_value(&self.shapes)?);
        render_context.add_variable("methods", serde_json::to_value(&self.methods)?);
        Ok(render_context)
    }
}

fn lookup(service: &Service, id: ShapeId) -> Result<&Shape, GenerationError> {
    service
        .shape(id)
        .ok_or(GenerationError::UnresolvedShape { shape: id.index() })
}

/// Identifiers declared in one namespace of the emitted code, with what declared them
#[derive(Default)]
struct Scope {
    declared: BTreeMap<String, String>,
}

impl Scope {
    /// Declare `identifier` on behalf of `owner`
    fn claim(&mut self, identifier: &str, owner: String) -> Result<(), GenerationError> {
        if !is_identifier(identifier.trim_matches('`')) {
            return Err(GenerationError::InvalidIdentifier {
                source_name: owner,
                identifier: identifier.to_string(),
            });
        }
        match self.declared.get(identifier) {
            Some(first) => Err(GenerationError::NameConflict {
                identifier: identifier.to_string(),
                first: first.clone(),
                second: owner,
            }),
            None => {
                self.declared.insert(identifier.to_string(), owner);
                Ok(())
            }
        }
    }
}

/// In-language type name of a referenced shape
pub fn shape_name<L>(lang: &L, service: &Service, id: ShapeId) -> Result<String, GenerationError>
where
    L: NamingPolicy + ?Sized,
{
    lookup(service, id).map(|shape| lang.identifier(&shape.name, IdentifierRole::Type))
}

fn type_name<L>(
    lang: &L,
    service: &Service,
    id: Option<ShapeId>,
) -> Result<Option<String>, GenerationError>
where
    L: NamingPolicy + ?Sized,
{
    id.map(|id| shape_name(lang, service, id)).transpose()
}

fn build_shape<L>(
    lang: &L,
    service: &Service,
    id: ShapeId,
    shape: &Shape,
    is_root: bool,
) -> Result<ShapeContext, GenerationError>
where
    L: NamingPolicy + TypeMapper + ?Sized,
{
    let name = lang.identifier(&shape.name, IdentifierRole::Type);
    let usage = service.usage(id);
    let comment = match &shape.description {
        Some(desc) => sanitize_comment(&format!("{name} {desc}")),
        None if is_root => format!("{name} params."),
        None => format!("{name} record."),
    };

    let mut declared = Scope::default();
    let mut fields = Vec::with_capacity(shape.fields.len());
    for field in &shape.fields {
        let built = build_field(lang, service, field)?;
        declared.claim(
            &built.name,
            format!("field {:?} of shape {:?}", field.name, shape.name),
        )?;
        fields.push(built);
    }

    Ok(ShapeContext {
        schema_name: shape.name.clone(),
        comment,
        is_input: usage.input,
        is_output: usage.output,
        is_empty: shape.fields.is_empty(),
        has_read_only: shape.has_read_only(),
        has_writable: shape.writable_fields().next().is_some(),
        fields,
        name,
        extra: BTreeMap::new(),
    })
}

fn build_field<L>(lang: &L, service: &Service, field: &Field) -> Result<FieldContext, GenerationError>
where
    L: NamingPolicy + TypeMapper + ?Sized,
{
    let name = lang.identifier(&field.name, IdentifierRole::Field);
    let mapped = lang.map_type(&field.ty, service)?;
    let inner = field.ty.unwrap_optional();
    let optional = field.ty.is_optional();
    let inner_declared = if optional {
        lang.map_type(inner, service)?.declared
    } else {
        mapped.declared.clone()
    };

    let encode = if field.read_only {
        None
    } else if optional {
        lang.encode_expr(inner, &lang.present_access(&name), service)?
    } else {
        lang.encode_expr(&field.ty, &lang.field_access(&name), service)?
    };
    let decode = lang.decode_expr(inner, &lang.wire_access(&field.wire_name), service)?;

    Ok(FieldContext {
        comment: field_comment(&name, field),
        wire_name: escape_string_literal(&field.wire_name),
        declared: mapped.declared,
        inner_declared,
        zero_value: mapped.zero_value,
        optional,
        required: field.required,
        read_only: field.read_only,
        encode,
        decode,
        name,
    })
}

fn field_comment(name: &str, field: &Field) -> Option<String> {
    let mut extra = String::new();
    if field.required {
        extra.push_str(" This field is required.");
    }
    if field.read_only {
        extra.push_str(" This field is read-only.");
    }

    match &field.description {
        Some(desc) => Some(sanitize_comment(&format!("{name} is {desc}{extra}"))),
        None if extra.is_empty() => None,
        None => Some(sanitize_comment(&format!(
            "{name} is the {} field.{extra}",
            field.wire_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        GenerationOptions, MappedType, Target,
        utils::{to_camel_case, to_proper_case},
    };
    use crate::schema::{FieldType, Method, ServiceBuilder};
    use std::sync::Arc;

    /// Minimal target: camel-case fields, types spelled after the semantic type
    struct Plain;

    impl NamingPolicy for Plain {
        fn identifier(&self, name: &str, role: IdentifierRole) -> String {
            match role {
                IdentifierRole::Type => to_proper_case(name),
                IdentifierRole::Field => to_camel_case(name),
                _ => name.to_string(),
            }
        }

        fn client_members(&self) -> &'static [&'static str] {
            &["call", "url"]
        }
    }

    impl TypeMapper for Plain {
        fn map_type(
            &self,
            ty: &FieldType,
            service: &Service,
        ) -> Result<MappedType, GenerationError> {
            Ok(match ty {
                FieldType::Primitive(p) => MappedType::new(p.as_str(), "zero"),
                FieldType::Array(inner) => {
                    MappedType::new(format!("list<{}>", self.map_type(inner, service)?.declared), "[]")
                }
                FieldType::Reference(id) => MappedType::new(shape_name(self, service, *id)?, "new"),
                FieldType::Optional(inner) => {
                    MappedType::new(format!("{}?", self.map_type(inner, service)?.declared), "none")
                }
            })
        }

        fn encode_expr(
            &self,
            _ty: &FieldType,
            value: &str,
            _service: &Service,
        ) -> Result<Option<String>, GenerationError> {
            Ok(Some(format!("enc({value})")))
        }
    }

    fn todo_context() -> GenerationContext {
        let mut builder = ServiceBuilder::new("todo").description("manages a to-do list.");
        let item = builder.add_shape(
            Shape::new(
                "item",
                vec![
                    Field::new("created_at", FieldType::timestamp()),
                    Field::new("id", FieldType::int())
                        .read_only()
                        .with_description("the id of the item."),
                    Field::new("text", FieldType::string()).required(),
                ],
            )
            .with_description("is a to-do item."),
        );
        let input = builder.add_shape(Shape::new(
            "add_item_input",
            vec![
                Field::new("item", FieldType::string()).required(),
                Field::new("note", FieldType::optional(FieldType::string())),
            ],
        ));
        let output = builder.add_shape(Shape::new(
            "get_items_output",
            vec![Field::new("items", FieldType::array(FieldType::Reference(item)))],
        ));
        builder.add_method(
            Method::new("add_item")
                .with_input(input)
                .with_description("adds an item to the list."),
        );
        builder.add_method(Method::new("get_items").with_output(output));
        GenerationContext::new(Target::Go, Arc::new(builder.build().unwrap()))
    }

    #[test]
    fn test_shapes_follow_schema_order_and_usage() {
        let ctx = ServiceContext::build(&Plain, &todo_context()).unwrap();

        let names: Vec<_> = ctx.shapes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Item", "AddItemInput", "GetItemsOutput"]);

        let item = &ctx.shapes[0];
        assert!(item.is_output && !item.is_input);
        assert!(item.has_read_only);
        assert_eq!(item.comment, "Item is a to-do item.");

        let input = &ctx.shapes[1];
        assert!(input.is_input && !input.is_output);
        assert_eq!(input.comment, "AddItemInput params.");
    }

    #[test]
    fn test_field_context() {
        let ctx = ServiceContext::build(&Plain, &todo_context()).unwrap();
        let item = &ctx.shapes[0];

        let id = &item.fields[1];
        assert_eq!(id.wire_name, "id");
        assert_eq!(id.declared, "int");
        assert!(id.read_only);
        assert!(id.encode.is_none(), "read-only fields never get an encoder");
        assert_eq!(
            id.comment.as_deref(),
            Some("id is the id of the item. This field is read-only.")
        );

        let text = &item.fields[2];
        assert_eq!(text.encode.as_deref(), Some("enc(text)"));
        assert_eq!(
            text.comment.as_deref(),
            Some("text is the text field. This field is required.")
        );
        assert!(item.fields[0].comment.is_none());

        let note = &ctx.shapes[1].fields[1];
        assert!(note.optional);
        assert_eq!(note.declared, "string?");
        assert_eq!(note.inner_declared, "string");
        assert_eq!(note.zero_value, "none");
    }

    #[test]
    fn test_method_context() {
        let ctx = ServiceContext::build(&Plain, &todo_context()).unwrap();

        let add = &ctx.methods[0];
        assert_eq!(add.wire_name, "add_item");
        assert_eq!(add.comment, "add_item adds an item to the list.");
        assert_eq!(add.input_type.as_deref(), Some("AddItemInput"));
        assert!(add.output_type.is_none());

        let get = &ctx.methods[1];
        assert_eq!(get.comment, "get_items calls the get_items method.");
        assert!(get.input_type.is_none());
        assert_eq!(get.output_type.as_deref(), Some("GetItemsOutput"));
    }

    #[test]
    fn test_service_level_variables() {
        let ctx = ServiceContext::build(&Plain, &todo_context()).unwrap();
        assert_eq!(ctx.client_name, "TodoClient");
        assert_eq!(ctx.file_stem, "todo");
        assert!(ctx.uses_timestamp);

        let named = ServiceContext::build(
            &Plain,
            &todo_context().with_options(GenerationOptions {
                client_name: Some("RPC".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();
        assert_eq!(named.client_name, "RPC");

        let render = named.into_render_context().unwrap();
        assert_eq!(render.get("client_name"), Some(&json!("RPC")));
        assert_eq!(render.get("shapes").unwrap().as_array().unwrap().len(), 3);
    }

    /// Service whose methods reach every given shape
    fn service_with(shapes: Vec<Shape>, methods: &[&str]) -> GenerationContext {
        let mut builder = ServiceBuilder::new("todo");
        let ids: Vec<_> = shapes.into_iter().map(|s| builder.add_shape(s)).collect();
        for (i, id) in ids.into_iter().enumerate() {
            builder.add_method(Method::new(format!("use_{i}")).with_input(id));
        }
        for name in methods {
            builder.add_method(Method::new(*name));
        }
        GenerationContext::new(Target::Go, Arc::new(builder.build().unwrap()))
    }

    #[test]
    fn test_shapes_with_same_type_name_are_rejected() {
        let context = service_with(
            vec![Shape::new("todo_item", vec![]), Shape::new("TodoItem", vec![])],
            &[],
        );
        match ServiceContext::build(&Plain, &context) {
            Err(GenerationError::NameConflict { identifier, first, second }) => {
                assert_eq!(identifier, "TodoItem");
                assert_eq!(first, "shape \"todo_item\"");
                assert_eq!(second, "shape \"TodoItem\"");
            }
            other => panic!("expected a name conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_named_like_client_is_rejected() {
        let context = service_with(vec![Shape::new("todo_client", vec![])], &[]);
        assert!(matches!(
            ServiceContext::build(&Plain, &context),
            Err(GenerationError::NameConflict { ref identifier, .. }) if identifier == "TodoClient"
        ));
    }

    #[test]
    fn test_fields_with_same_name_are_rejected() {
        let context = service_with(
            vec![Shape::new(
                "item",
                vec![
                    Field::new("created_at", FieldType::timestamp()),
                    Field::new("createdAt", FieldType::timestamp()),
                ],
            )],
            &[],
        );
        match ServiceContext::build(&Plain, &context) {
            Err(GenerationError::NameConflict { identifier, second, .. }) => {
                assert_eq!(identifier, "createdAt");
                assert_eq!(second, "field \"createdAt\" of shape \"item\"");
            }
            other => panic!("expected a name conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_methods_with_same_name_are_rejected() {
        let mut builder = ServiceBuilder::new("todo");
        builder.add_method(Method::new("get_items"));
        // Distinct wire names, same in-language name
        builder.add_method(Method::new("get_items").with_wire_name("items"));
        let context = GenerationContext::new(Target::Go, Arc::new(builder.build().unwrap()));
        assert!(matches!(
            ServiceContext::build(&Plain, &context),
            Err(GenerationError::NameConflict { ref identifier, .. }) if identifier == "get_items"
        ));
    }

    #[test]
    fn test_method_named_like_client_member_is_rejected() {
        let context = service_with(vec![], &["call"]);
        match ServiceContext::build(&Plain, &context) {
            Err(GenerationError::NameConflict { first, second, .. }) => {
                assert_eq!(first, "client member call");
                assert_eq!(second, "method \"call\"");
            }
            other => panic!("expected a name conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_identifier_starting_with_digit_is_rejected() {
        let context = service_with(
            vec![Shape::new("login", vec![Field::new("2fa", FieldType::bool())])],
            &[],
        );
        match ServiceContext::build(&Plain, &context) {
            Err(GenerationError::InvalidIdentifier { source_name, identifier }) => {
                assert_eq!(identifier, "2fa");
                assert_eq!(source_name, "field \"2fa\" of shape \"login\"");
            }
            other => panic!("expected an invalid identifier, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        let context = service_with(vec![Shape::new("__", vec![])], &[]);
        assert!(matches!(
            ServiceContext::build(&Plain, &context),
            Err(GenerationError::InvalidIdentifier { ref identifier, .. }) if identifier.is_empty()
        ));
    }

    #[test]
    fn test_escaped_keywords_are_valid_identifiers() {
        let mut scope = Scope::default();
        assert!(scope.claim("`default`", "field \"default\"".to_string()).is_ok());
        assert!(scope.claim("default_", "field \"default_\"".to_string()).is_ok());
    }
}
