//! Port interfaces for the generation domain

use crate::generation::{
    Artifact, GenerationContext, GenerationError, IdentifierRole, MappedType, RenderContext,
    Target,
};
use crate::infrastructure::templates::TemplateSet;
use crate::schema::{FieldType, Service};
use async_trait::async_trait;

/// Maps schema identifiers to a target's idiomatic identifiers
///
/// Implementations are pure: the same `(name, role)` always yields the same
/// identifier. Wire names never pass through a naming policy.
pub trait NamingPolicy: Send + Sync {
    fn identifier(&self, name: &str, role: IdentifierRole) -> String;

    /// Top-level names the client and error templates declare next to the
    /// client type itself
    fn reserved_type_names(&self, _client_name: &str) -> Vec<String> {
        vec!["RPCError".to_string()]
    }

    /// Members the client template declares on the client type
    fn client_members(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Maps semantic field types to a target's declared types and zero values
pub trait TypeMapper: Send + Sync {
    /// Declared type and zero-value expression for `ty`
    fn map_type(&self, ty: &FieldType, service: &Service) -> Result<MappedType, GenerationError>;

    /// Expression that converts `value` of type `ty` to its wire form, for
    /// targets that write request encoders by hand
    fn encode_expr(
        &self,
        _ty: &FieldType,
        _value: &str,
        _service: &Service,
    ) -> Result<Option<String>, GenerationError> {
        Ok(None)
    }

    /// Expression that converts wire `value` to an in-language value of type `ty`,
    /// for targets that write response decoders by hand
    fn decode_expr(
        &self,
        _ty: &FieldType,
        _value: &str,
        _service: &Service,
    ) -> Result<Option<String>, GenerationError> {
        Ok(None)
    }

    /// How an encoder reads a field holding a present value
    fn field_access(&self, field: &str) -> String {
        field.to_string()
    }

    /// How an encoder reads the unwrapped value of a present optional field
    fn present_access(&self, field: &str) -> String {
        self.field_access(field)
    }

    /// How a decoder reads the wire value stored under `wire_name`
    fn wire_access(&self, wire_name: &str) -> String {
        wire_name.to_string()
    }
}

/// Builds render context from generation context
pub trait ContextBuilder: Send + Sync {
    /// Build a render context for template rendering
    fn build(&self, context: &GenerationContext) -> Result<RenderContext, GenerationError>;
}

/// Finds the template set for a target
#[async_trait]
pub trait TemplateDiscovery: Send + Sync {
    async fn discover(&self, target: Target) -> Result<TemplateSet, GenerationError>;
}

/// Renders a template set into artifacts
pub trait TemplateRenderer: Send + Sync {
    fn render(
        &self,
        templates: &TemplateSet,
        context: &RenderContext,
        generation_context: &GenerationContext,
    ) -> Result<Vec<Artifact>, GenerationError>;
}

/// Post-processes generated artifacts
pub trait PostProcessor: Send + Sync {
    fn process(
        &self,
        artifacts: Vec<Artifact>,
        context: &GenerationContext,
    ) -> Result<Vec<Artifact>, GenerationError>;
}
