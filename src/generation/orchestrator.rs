//! Generation orchestration - coordinates the generation workflow

use crate::generation::{
    ContextBuilder, GenerationContext, GenerationError, GenerationResult, PostProcessor,
    TemplateDiscovery, TemplateRenderer,
};
use std::sync::Arc;

/// Orchestrates the code generation workflow for one target at a time
pub struct GenerationOrchestrator {
    template_discovery: Arc<dyn TemplateDiscovery>,
    context_builder: Arc<dyn ContextBuilder>,
    template_renderer: Arc<dyn TemplateRenderer>,
    post_processor: Arc<dyn PostProcessor>,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(
        template_discovery: Arc<dyn TemplateDiscovery>,
        context_builder: Arc<dyn ContextBuilder>,
        template_renderer: Arc<dyn TemplateRenderer>,
        post_processor: Arc<dyn PostProcessor>,
    ) -> Self {
        Self {
            template_discovery,
            context_builder,
            template_renderer,
            post_processor,
        }
    }

    /// Execute the generation workflow
    pub async fn generate(
        &self,
        context: GenerationContext,
    ) -> Result<GenerationResult, GenerationError> {
        // 1. Validate context
        context.validate()?;

        tracing::debug!(
            target_lang = %context.target,
            methods = context.service.methods().len(),
            shapes = context.service.shapes().len(),
            "Orchestrator starting generation"
        );

        // 2. Discover templates for the target
        let templates = self.template_discovery.discover(context.target).await?;

        // 3. Build render context from generation context
        let render_context = self.context_builder.build(&context)?;

        // 4. Render templates to artifacts
        let artifacts = self
            .template_renderer
            .render(&templates, &render_context, &context)?;

        // 5. Post-process artifacts
        let artifacts = self.post_processor.process(artifacts, &context)?;

        tracing::debug!(
            target_lang = %context.target,
            artifacts = artifacts.len(),
            "Orchestrator finished generation"
        );

        Ok(GenerationResult {
            target: context.target,
            artifacts,
            metadata: context.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Artifact, RenderContext, Target};
    use crate::infrastructure::templates::TemplateSet;
    use crate::schema::{Method, ServiceBuilder};
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct MockTemplateDiscovery;
    struct MockContextBuilder;
    struct MockTemplateRenderer;

    /// Records the order the pipeline reaches it in
    struct RecordingPostProcessor {
        seen: Mutex<Vec<PathBuf>>,
    }

    #[async_trait::async_trait]
    impl TemplateDiscovery for MockTemplateDiscovery {
        async fn discover(&self, target: Target) -> Result<TemplateSet, GenerationError> {
            Ok(TemplateSet {
                target,
                files: Vec::new(),
            })
        }
    }

    impl ContextBuilder for MockContextBuilder {
        fn build(&self, _context: &GenerationContext) -> Result<RenderContext, GenerationError> {
            Ok(RenderContext::default())
        }
    }

    impl TemplateRenderer for MockTemplateRenderer {
        fn render(
            &self,
            _templates: &TemplateSet,
            _context: &RenderContext,
            generation_context: &GenerationContext,
        ) -> Result<Vec<Artifact>, GenerationError> {
            Ok(vec![Artifact {
                path: PathBuf::from(generation_context.target.to_string()),
                content: String::new(),
            }])
        }
    }

    impl PostProcessor for RecordingPostProcessor {
        fn process(
            &self,
            artifacts: Vec<Artifact>,
            _context: &GenerationContext,
        ) -> Result<Vec<Artifact>, GenerationError> {
            let mut seen = self.seen.lock().unwrap();
            seen.extend(artifacts.iter().map(|a| a.path.clone()));
            Ok(artifacts)
        }
    }

    fn orchestrator(post: Arc<RecordingPostProcessor>) -> GenerationOrchestrator {
        GenerationOrchestrator::new(
            Arc::new(MockTemplateDiscovery),
            Arc::new(MockContextBuilder),
            Arc::new(MockTemplateRenderer),
            post,
        )
    }

    #[tokio::test]
    async fn test_generation_orchestrator_workflow() {
        let post = Arc::new(RecordingPostProcessor {
            seen: Mutex::new(Vec::new()),
        });
        let mut builder = ServiceBuilder::new("todo");
        builder.add_method(Method::new("ping"));
        let context = GenerationContext::new(Target::Swift, Arc::new(builder.build().unwrap()));

        let result = orchestrator(post.clone()).generate(context).await.unwrap();

        assert_eq!(result.target, Target::Swift);
        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.metadata.service_name, "todo");
        assert_eq!(*post.seen.lock().unwrap(), vec![PathBuf::from("swift")]);
    }

    #[tokio::test]
    async fn test_invalid_context_stops_before_rendering() {
        let post = Arc::new(RecordingPostProcessor {
            seen: Mutex::new(Vec::new()),
        });
        let service = ServiceBuilder::new("empty").build().unwrap();
        let context = GenerationContext::new(Target::Go, Arc::new(service));

        let result = orchestrator(post.clone()).generate(context).await;

        assert!(matches!(result, Err(GenerationError::ValidationError(_))));
        assert!(post.seen.lock().unwrap().is_empty());
    }
}
