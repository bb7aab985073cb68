//! Generation infrastructure implementations

pub mod context_builders;
pub mod post_processor;
pub mod template_renderer;

pub use context_builders::{CompositeContextBuilder, ContextBuilderRegistry};
pub use post_processor::CompositePostProcessor;
pub use template_renderer::TeraTemplateRenderer;

use std::path::PathBuf;
use std::sync::Arc;

use crate::generation::{GenerationOrchestrator, TemplateDiscovery};
use crate::infrastructure::templates::{EmbeddedTemplateRepository, FileSystemTemplateDiscovery};

/// Orchestrator wired with every built-in target
///
/// Templates come from `template_dir` when given, with embedded fallback.
pub fn default_orchestrator(template_dir: Option<PathBuf>) -> GenerationOrchestrator {
    let discovery: Arc<dyn TemplateDiscovery> = match template_dir {
        Some(dir) => Arc::new(FileSystemTemplateDiscovery::new(dir)),
        None => Arc::new(EmbeddedTemplateRepository::new()),
    };
    GenerationOrchestrator::new(
        discovery,
        Arc::new(CompositeContextBuilder::default()),
        Arc::new(TeraTemplateRenderer::new()),
        Arc::new(CompositePostProcessor::new()),
    )
}
