//! Tera-based template renderer implementation

use std::path::PathBuf;
use tera::Tera;

use crate::generation::{
    Artifact, FileKind, GenerationContext, GenerationError, RenderContext, TemplateRenderer,
    utils::to_snake_case,
};
use crate::infrastructure::templates::TemplateSet;

/// Tera-based template renderer
///
/// Registers every file of the set under its template name, so the client
/// template can include the error model, then renders one artifact per
/// emitted file kind.
pub struct TeraTemplateRenderer;

impl TeraTemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Output path of an emitted file, relative to the output directory
    pub fn artifact_path(context: &GenerationContext, kind: FileKind) -> PathBuf {
        let target = context.target;
        PathBuf::from(target.to_string()).join(format!(
            "{}_{}.{}",
            to_snake_case(context.service.name()),
            kind.as_str(),
            target.file_extension()
        ))
    }

    fn build_tera(templates: &TemplateSet) -> Result<Tera, GenerationError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.files.iter().map(|file| {
            (
                TemplateSet::template_name(templates.target, file.kind),
                file.content.as_str(),
            )
        }))
        .map_err(|e| GenerationError::RenderError(format!("Failed to add template: {}", e)))?;
        Ok(tera)
    }
}

impl Default for TeraTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(
        &self,
        templates: &TemplateSet,
        context: &RenderContext,
        generation_context: &GenerationContext,
    ) -> Result<Vec<Artifact>, GenerationError> {
        let tera = Self::build_tera(templates)?;
        let tera_context = context.to_tera_context()?;

        let mut artifacts = Vec::new();
        for kind in FileKind::emitted() {
            let name = TemplateSet::template_name(templates.target, kind);
            if templates.file(kind).is_none() {
                return Err(GenerationError::RenderError(format!(
                    "Template {name} is missing"
                )));
            }

            let content = tera.render(&name, &tera_context).map_err(|e| {
                // Tera keeps the useful part of the message in the source chain
                let mut message = e.to_string();
                let mut source = std::error::Error::source(&e);
                while let Some(cause) = source {
                    message.push_str(&format!(": {cause}"));
                    source = cause.source();
                }
                GenerationError::RenderError(format!("Failed to render {name}: {message}"))
            })?;

            tracing::debug!(template = %name, bytes = content.len(), "Rendered template");
            artifacts.push(Artifact {
                path: Self::artifact_path(generation_context, kind),
                content,
            });
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Target;
    use crate::infrastructure::templates::{TemplateFile, TemplateSource};
    use crate::schema::{Method, ServiceBuilder};
    use std::sync::Arc;

    fn file(kind: FileKind, content: &str) -> TemplateFile {
        TemplateFile {
            kind,
            content: content.to_string(),
            source: TemplateSource::Embedded,
        }
    }

    fn generation_context(target: Target) -> GenerationContext {
        let mut builder = ServiceBuilder::new("TodoList");
        builder.add_method(Method::new("ping"));
        GenerationContext::new(target, Arc::new(builder.build().unwrap()))
    }

    #[test]
    fn test_renders_types_and_client_with_include() {
        let templates = TemplateSet {
            target: Target::Go,
            files: vec![
                file(FileKind::Error, "type Error struct{}"),
                file(FileKind::Types, "// {{ service_name }} types"),
                file(FileKind::Client, "{% include \"go/error\" %}\n// {{ client_name }}"),
            ],
        };
        let mut context = RenderContext::new();
        context.add_variable("service_name", serde_json::json!("TodoList"));
        context.add_variable("client_name", serde_json::json!("Client"));

        let artifacts = TeraTemplateRenderer::new()
            .render(&templates, &context, &generation_context(Target::Go))
            .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].path, PathBuf::from("go/todo_list_types.go"));
        assert_eq!(artifacts[0].content, "// TodoList types");
        assert_eq!(artifacts[1].path, PathBuf::from("go/todo_list_client.go"));
        assert_eq!(artifacts[1].content, "type Error struct{}\n// Client");
    }

    #[test]
    fn test_missing_variable_is_a_render_error() {
        let templates = TemplateSet {
            target: Target::Swift,
            files: vec![
                file(FileKind::Error, ""),
                file(FileKind::Types, "{{ nope }}"),
                file(FileKind::Client, ""),
            ],
        };

        let result = TeraTemplateRenderer::new().render(
            &templates,
            &RenderContext::new(),
            &generation_context(Target::Swift),
        );
        assert!(matches!(result, Err(GenerationError::RenderError(_))));
    }
}
