//! Schema document parser
//!
//! Turns a parsed JSON/YAML value into a validated [`Service`]. Named types
//! are declared first in name order, then inline method shapes in method
//! order, so the same document always yields the same shape order.

use serde_json::Value as JsonValue;
use std::collections::HashMap;

use super::document::{FieldDefinition, SchemaDocument, TypeRef};
use crate::schema::{
    Field, FieldType, Method, Primitive, SchemaError, Service, ServiceBuilder, Shape, ShapeId,
};

const TYPE_REF_PREFIX: &str = "#/types/";

/// Parser for schema documents
pub struct SchemaParser {
    value: JsonValue,
}

impl SchemaParser {
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// Parse and validate the document
    pub fn parse(self) -> Result<Service, SchemaError> {
        let document: SchemaDocument = serde_json::from_value(self.value)?;
        if document.name.trim().is_empty() {
            return Err(SchemaError::InvalidDocument(
                "schema name must not be empty".to_string(),
            ));
        }

        let mut builder = ServiceBuilder::new(&document.name);
        if let Some(description) = &document.description {
            builder = builder.description(description);
        }

        // Declare named types up front so any field may reference any of them
        let mut named = HashMap::new();
        for (name, definition) in &document.types {
            let mut shape = Shape::new(name, Vec::new());
            if let Some(description) = &definition.description {
                shape = shape.with_description(description);
            }
            named.insert(name.as_str(), builder.add_shape(shape));
        }

        for method_def in &document.methods {
            let mut method = Method::new(&method_def.name);
            if let Some(wire_name) = &method_def.wire_name {
                method = method.with_wire_name(wire_name);
            }
            if let Some(description) = &method_def.description {
                method = method.with_description(description);
            }

            let input = method_shape(
                &mut builder,
                &named,
                &method_def.name,
                "input",
                method_def.inputs.as_deref(),
                method_def.input.as_deref(),
            )?;
            if let Some(id) = input {
                method = method.with_input(id);
            }

            let output = method_shape(
                &mut builder,
                &named,
                &method_def.name,
                "output",
                method_def.outputs.as_deref(),
                method_def.output.as_deref(),
            )?;
            if let Some(id) = output {
                method = method.with_output(id);
            }

            builder.add_method(method);
        }

        for (name, definition) in &document.types {
            let fields = resolve_fields(&named, name, &definition.properties)?;
            builder.set_fields(named[name.as_str()], fields)?;
        }

        builder.build()
    }
}

fn method_shape(
    builder: &mut ServiceBuilder,
    named: &HashMap<&str, ShapeId>,
    method: &str,
    direction: &str,
    inline: Option<&[FieldDefinition]>,
    reference: Option<&str>,
) -> Result<Option<ShapeId>, SchemaError> {
    match (inline, reference) {
        (Some(_), Some(_)) => Err(SchemaError::InvalidDocument(format!(
            "method {method} declares both inline {direction}s and a named {direction}"
        ))),
        (Some(fields), None) => {
            let name = format!("{method}_{direction}");
            let fields = resolve_fields(named, &name, fields)?;
            Ok(Some(builder.add_shape(Shape::new(name, fields))))
        }
        (None, Some(reference)) => {
            resolve_reference(named, &format!("method {method}"), reference).map(Some)
        }
        (None, None) => Ok(None),
    }
}

fn resolve_fields(
    named: &HashMap<&str, ShapeId>,
    shape: &str,
    definitions: &[FieldDefinition],
) -> Result<Vec<Field>, SchemaError> {
    definitions
        .iter()
        .map(|definition| {
            if definition.name.trim().is_empty() {
                return Err(SchemaError::InvalidDocument(format!(
                    "field without a name in {shape}"
                )));
            }
            let location = format!("{shape}.{}", definition.name);
            let ty = resolve_type(named, &location, &definition.ty)?;

            let mut field = Field::new(&definition.name, ty);
            if let Some(wire_name) = &definition.wire_name {
                field = field.with_wire_name(wire_name);
            }
            if definition.required {
                field = field.required();
            }
            if definition.read_only {
                field = field.read_only();
            }
            if let Some(description) = &definition.description {
                field = field.with_description(description);
            }
            Ok(field)
        })
        .collect()
}

fn resolve_type(
    named: &HashMap<&str, ShapeId>,
    location: &str,
    ty: &TypeRef,
) -> Result<FieldType, SchemaError> {
    let resolved = match (&ty.reference, ty.type_name.as_deref()) {
        (Some(reference), _) => FieldType::Reference(resolve_reference(named, location, reference)?),
        (None, Some("string")) => FieldType::Primitive(Primitive::String),
        (None, Some("int" | "integer")) => FieldType::Primitive(Primitive::Int),
        (None, Some("bool" | "boolean")) => FieldType::Primitive(Primitive::Bool),
        (None, Some("timestamp")) => FieldType::Primitive(Primitive::Timestamp),
        (None, Some("array")) => {
            let items = ty.items.as_deref().ok_or_else(|| {
                SchemaError::InvalidDocument(format!("array {location} has no items"))
            })?;
            FieldType::array(resolve_type(named, location, items)?)
        }
        (None, Some(other)) => {
            return Err(SchemaError::UnknownType {
                location: location.to_string(),
                type_name: other.to_string(),
            });
        }
        (None, None) => {
            return Err(SchemaError::InvalidDocument(format!(
                "{location} has neither a type nor a $ref"
            )));
        }
    };

    Ok(if ty.nullable {
        FieldType::optional(resolved)
    } else {
        resolved
    })
}

fn resolve_reference(
    named: &HashMap<&str, ShapeId>,
    location: &str,
    reference: &str,
) -> Result<ShapeId, SchemaError> {
    let name = reference.strip_prefix(TYPE_REF_PREFIX).unwrap_or(reference);
    named
        .get(name)
        .copied()
        .ok_or_else(|| SchemaError::UnknownReference {
            location: location.to_string(),
            reference: reference.to_string(),
        })
}
