//! Language-neutral service model
//!
//! A [`Service`] is built once per run through [`ServiceBuilder`] and is
//! read-only afterwards, so every target emitter can share it behind an `Arc`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::schema::SchemaError;

/// Index of a [`Shape`] inside its [`Service`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scalar field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Int,
    Bool,
    Timestamp,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Int => "int",
            Primitive::Bool => "bool",
            Primitive::Timestamp => "timestamp",
        }
    }
}

/// Semantic type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    Primitive(Primitive),
    Array(Box<FieldType>),
    Reference(ShapeId),
    Optional(Box<FieldType>),
}

impl FieldType {
    pub fn string() -> Self {
        FieldType::Primitive(Primitive::String)
    }

    pub fn int() -> Self {
        FieldType::Primitive(Primitive::Int)
    }

    pub fn bool() -> Self {
        FieldType::Primitive(Primitive::Bool)
    }

    pub fn timestamp() -> Self {
        FieldType::Primitive(Primitive::Timestamp)
    }

    pub fn array(item: FieldType) -> Self {
        FieldType::Array(Box::new(item))
    }

    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    /// Whether the outermost type is `Optional`
    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// The type with one level of `Optional` removed
    pub fn unwrap_optional(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner,
            other => other,
        }
    }

    /// Whether any part of this type is a timestamp
    pub fn uses_timestamp(&self) -> bool {
        match self {
            FieldType::Primitive(p) => *p == Primitive::Timestamp,
            FieldType::Array(inner) | FieldType::Optional(inner) => inner.uses_timestamp(),
            FieldType::Reference(_) => false,
        }
    }

    fn collect_references(&self, out: &mut Vec<ShapeId>) {
        match self {
            FieldType::Primitive(_) => {}
            FieldType::Array(inner) | FieldType::Optional(inner) => inner.collect_references(out),
            FieldType::Reference(id) => out.push(*id),
        }
    }
}

/// A single field of a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub wire_name: String,
    pub ty: FieldType,
    pub required: bool,
    pub read_only: bool,
    pub description: Option<String>,
}

impl Field {
    /// Create a field whose wire name equals its schema name
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        Self {
            wire_name: name.clone(),
            name,
            ty,
            required: false,
            read_only: false,
            description: None,
        }
    }

    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A named record type with ordered fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

impl Shape {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_read_only(&self) -> bool {
        self.fields.iter().any(|f| f.read_only)
    }

    /// Fields written when the shape is encoded as a request
    pub fn writable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.read_only)
    }
}

/// An RPC method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub wire_name: String,
    pub description: Option<String>,
    pub input: Option<ShapeId>,
    pub output: Option<ShapeId>,
}

impl Method {
    /// Create a method whose wire name equals its schema name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            wire_name: name.clone(),
            name,
            description: None,
            input: None,
            output: None,
        }
    }

    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    pub fn with_input(mut self, input: ShapeId) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: ShapeId) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How a shape is reached from the service's methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeUsage {
    pub input: bool,
    pub output: bool,
}

/// An immutable, validated service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    name: String,
    description: Option<String>,
    shapes: Vec<Shape>,
    methods: Vec<Method>,
}

impl Service {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Look up a method by the name used in its URL path segment
    pub fn method_by_wire_name(&self, wire_name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.wire_name == wire_name)
    }

    /// Shapes reachable from any method, each once, in declaration order
    pub fn reachable_shapes(&self) -> Vec<ShapeId> {
        let mut seen = vec![false; self.shapes.len()];
        let roots = self
            .methods
            .iter()
            .flat_map(|m| m.input.into_iter().chain(m.output));
        self.mark_reachable(roots, &mut seen);

        seen.iter()
            .enumerate()
            .filter(|(_, reached)| **reached)
            .map(|(i, _)| ShapeId(i))
            .collect()
    }

    /// Whether a shape takes part in request encoding, response decoding or both
    pub fn usage(&self, id: ShapeId) -> ShapeUsage {
        let mut from_inputs = vec![false; self.shapes.len()];
        let mut from_outputs = vec![false; self.shapes.len()];
        self.mark_reachable(self.methods.iter().filter_map(|m| m.input), &mut from_inputs);
        self.mark_reachable(self.methods.iter().filter_map(|m| m.output), &mut from_outputs);

        ShapeUsage {
            input: from_inputs.get(id.0).copied().unwrap_or(false),
            output: from_outputs.get(id.0).copied().unwrap_or(false),
        }
    }

    fn mark_reachable(&self, roots: impl Iterator<Item = ShapeId>, seen: &mut [bool]) {
        let mut stack: Vec<ShapeId> = roots.collect();
        while let Some(id) = stack.pop() {
            if seen[id.0] {
                continue;
            }
            seen[id.0] = true;
            for field in &self.shapes[id.0].fields {
                field.ty.collect_references(&mut stack);
            }
        }
    }
}

/// Collects shapes and methods, then validates them into a [`Service`]
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    name: String,
    description: Option<String>,
    shapes: Vec<Shape>,
    methods: Vec<Method>,
}

impl ServiceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a shape; its fields may only reference shapes declared by this builder
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    /// Replace the fields of an already declared shape
    ///
    /// Lets self-referencing or mutually referencing shapes be declared first
    /// and filled in once every id is known.
    pub fn set_fields(&mut self, id: ShapeId, fields: Vec<Field>) -> Result<(), SchemaError> {
        let shape = self
            .shapes
            .get_mut(id.0)
            .ok_or(SchemaError::UnresolvedShape(id.0))?;
        shape.fields = fields;
        Ok(())
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn build(self) -> Result<Service, SchemaError> {
        let mut shape_names = HashSet::new();
        for shape in &self.shapes {
            if !shape_names.insert(shape.name.as_str()) {
                return Err(SchemaError::DuplicateShape(shape.name.clone()));
            }

            let mut wire_names = HashSet::new();
            for field in &shape.fields {
                if !wire_names.insert(field.wire_name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        shape: shape.name.clone(),
                        field: field.wire_name.clone(),
                    });
                }
                self.check_type(&shape.name, &field.name, &field.ty)?;
            }
        }

        let mut method_names = HashSet::new();
        for method in &self.methods {
            if !method_names.insert(method.wire_name.as_str()) {
                return Err(SchemaError::DuplicateMethod(method.wire_name.clone()));
            }
            for id in method.input.iter().chain(method.output.iter()) {
                if id.0 >= self.shapes.len() {
                    return Err(SchemaError::UnresolvedShape(id.0));
                }
            }
        }

        Ok(Service {
            name: self.name,
            description: self.description,
            shapes: self.shapes,
            methods: self.methods,
        })
    }

    fn check_type(&self, shape: &str, field: &str, ty: &FieldType) -> Result<(), SchemaError> {
        match ty {
            FieldType::Primitive(_) => Ok(()),
            FieldType::Array(inner) => self.check_type(shape, field, inner),
            FieldType::Reference(id) if id.0 < self.shapes.len() => Ok(()),
            FieldType::Reference(id) => Err(SchemaError::UnresolvedShape(id.0)),
            FieldType::Optional(inner) if inner.is_optional() => Err(SchemaError::NestedOptional {
                shape: shape.to_string(),
                field: field.to_string(),
            }),
            FieldType::Optional(inner) => self.check_type(shape, field, inner),
        }
    }
}
