//! Shape-directed JSON codec
//!
//! Encoding writes only writable fields, keyed by wire name. Decoding reads
//! every field and fills absent or null ones with their zero value. Unknown
//! keys are ignored both ways. Timestamps travel as RFC 3339 strings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::error::CodecError;
use crate::schema::{FieldType, Primitive, Service, Shape, ShapeId};

/// Nesting limit for zero values of shapes that reference themselves
const MAX_DEPTH: usize = 64;

/// Zero timestamp, the Unix epoch
pub const ZERO_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// Encode `input` as the request body for shape `id`
///
/// `None` and `null` are treated as an empty object.
pub fn encode(service: &Service, id: ShapeId, input: Option<&Value>) -> Result<Value, CodecError> {
    let empty = Map::new();
    let object = match input {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(CodecError::new("$", format!("expected object, got {}", kind(other))));
        }
    };
    Codec { service }.encode_shape(id, object, "$", 0)
}

/// Decode a response body against shape `id`
pub fn decode(service: &Service, id: ShapeId, body: &Value) -> Result<Value, CodecError> {
    Codec { service }.decode_value(&FieldType::Reference(id), body, "$", 0)
}

struct Codec<'a> {
    service: &'a Service,
}

impl Codec<'_> {
    fn shape(&self, id: ShapeId, path: &str) -> Result<&Shape, CodecError> {
        self.service
            .shape(id)
            .ok_or_else(|| CodecError::new(path, format!("undeclared shape {id}")))
    }

    fn encode_shape(
        &self,
        id: ShapeId,
        object: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<Value, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::new(path, "shape nesting too deep"));
        }
        let shape = self.shape(id, path)?;

        let mut out = Map::new();
        for field in shape.writable_fields() {
            let field_path = format!("{path}.{}", field.wire_name);
            match object.get(&field.wire_name) {
                None | Some(Value::Null) if field.ty.is_optional() => {}
                None | Some(Value::Null) => {
                    out.insert(
                        field.wire_name.clone(),
                        self.zero_value(&field.ty, &field_path, depth)?,
                    );
                }
                Some(value) => {
                    out.insert(
                        field.wire_name.clone(),
                        self.encode_value(&field.ty, value, &field_path, depth)?,
                    );
                }
            }
        }
        Ok(Value::Object(out))
    }

    fn encode_value(
        &self,
        ty: &FieldType,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Value, CodecError> {
        match ty {
            FieldType::Primitive(p) => primitive(*p, value, path),
            FieldType::Optional(inner) => match value {
                Value::Null => Ok(Value::Null),
                value => self.encode_value(inner, value, path, depth),
            },
            FieldType::Array(inner) => match value {
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.encode_value(inner, item, &format!("{path}[{i}]"), depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                other => Err(mismatch(path, "array", other)),
            },
            FieldType::Reference(id) => match value {
                Value::Object(object) => self.encode_shape(*id, object, path, depth + 1),
                other => Err(mismatch(path, "object", other)),
            },
        }
    }

    fn decode_shape(
        &self,
        id: ShapeId,
        object: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<Value, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::new(path, "shape nesting too deep"));
        }
        let shape = self.shape(id, path)?;

        let mut out = Map::new();
        for field in &shape.fields {
            let field_path = format!("{path}.{}", field.wire_name);
            let value = match object.get(&field.wire_name) {
                None | Some(Value::Null) => self.zero_value(&field.ty, &field_path, depth)?,
                Some(value) => self.decode_value(&field.ty, value, &field_path, depth)?,
            };
            out.insert(field.wire_name.clone(), value);
        }
        Ok(Value::Object(out))
    }

    fn decode_value(
        &self,
        ty: &FieldType,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Value, CodecError> {
        match ty {
            FieldType::Primitive(p) => primitive(*p, value, path),
            FieldType::Optional(inner) => match value {
                Value::Null => Ok(Value::Null),
                value => self.decode_value(inner, value, path, depth),
            },
            FieldType::Array(inner) => match value {
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.decode_value(inner, item, &format!("{path}[{i}]"), depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                other => Err(mismatch(path, "array", other)),
            },
            FieldType::Reference(id) => match value {
                Value::Object(object) => self.decode_shape(*id, object, path, depth + 1),
                other => Err(mismatch(path, "object", other)),
            },
        }
    }

    /// Value a field takes when it is absent
    fn zero_value(&self, ty: &FieldType, path: &str, depth: usize) -> Result<Value, CodecError> {
        Ok(match ty {
            FieldType::Primitive(Primitive::String) => Value::String(String::new()),
            FieldType::Primitive(Primitive::Int) => Value::from(0),
            FieldType::Primitive(Primitive::Bool) => Value::Bool(false),
            FieldType::Primitive(Primitive::Timestamp) => Value::String(ZERO_TIMESTAMP.to_string()),
            FieldType::Array(_) => Value::Array(Vec::new()),
            FieldType::Optional(_) => Value::Null,
            FieldType::Reference(id) => self.decode_shape(*id, &Map::new(), path, depth + 1)?,
        })
    }
}

fn primitive(p: Primitive, value: &Value, path: &str) -> Result<Value, CodecError> {
    match (p, value) {
        (Primitive::String, Value::String(_)) | (Primitive::Bool, Value::Bool(_)) => {
            Ok(value.clone())
        }
        (Primitive::Int, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        (Primitive::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|t| {
                Value::String(
                    t.with_timezone(&Utc)
                        .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                )
            })
            .map_err(|e| CodecError::new(path, format!("invalid RFC 3339 timestamp {s:?}: {e}"))),
        (p, other) => Err(mismatch(path, p.as_str(), other)),
    }
}

fn mismatch(path: &str, expected: &str, got: &Value) -> CodecError {
    CodecError::new(path, format!("expected {expected}, got {}", kind(got)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
