//! Registry for target-specific context builders

use std::collections::HashMap;
use std::sync::Arc;

use crate::generation::{
    ContextBuilder, GenerationContext, GenerationError, RenderContext, Target,
};

/// Registry that manages target-specific context builders
pub struct ContextBuilderRegistry {
    builders: HashMap<Target, Arc<dyn ContextBuilder>>,
}

impl ContextBuilderRegistry {
    /// Create a new registry with default builders
    pub fn new() -> Self {
        let mut builders = HashMap::new();

        // Register default builders
        builders.insert(
            Target::Kotlin,
            Arc::new(super::KotlinContextBuilder::new()) as Arc<dyn ContextBuilder>,
        );
        builders.insert(
            Target::Swift,
            Arc::new(super::SwiftContextBuilder::new()) as Arc<dyn ContextBuilder>,
        );
        builders.insert(
            Target::Go,
            Arc::new(super::GoContextBuilder::new()) as Arc<dyn ContextBuilder>,
        );
        builders.insert(
            Target::TypeScript,
            Arc::new(super::TypeScriptContextBuilder::new()) as Arc<dyn ContextBuilder>,
        );

        Self { builders }
    }

    /// Register a custom builder for a target
    pub fn register(&mut self, target: Target, builder: Arc<dyn ContextBuilder>) {
        self.builders.insert(target, builder);
    }

    /// Get a builder for a specific target
    pub fn get(&self, target: Target) -> Result<Arc<dyn ContextBuilder>, GenerationError> {
        self.builders
            .get(&target)
            .cloned()
            .ok_or(GenerationError::UnsupportedTarget(target))
    }

    /// Check if a target has a registered builder
    pub fn has_builder(&self, target: Target) -> bool {
        self.builders.contains_key(&target)
    }

    /// Get all supported targets, sorted
    pub fn supported_targets(&self) -> Vec<Target> {
        let mut targets: Vec<Target> = self.builders.keys().copied().collect();
        targets.sort();
        targets
    }
}

impl Default for ContextBuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite context builder that delegates to target-specific builders
pub struct CompositeContextBuilder {
    registry: Arc<ContextBuilderRegistry>,
}

impl CompositeContextBuilder {
    pub fn new(registry: Arc<ContextBuilderRegistry>) -> Self {
        Self { registry }
    }
}

impl Default for CompositeContextBuilder {
    fn default() -> Self {
        Self::new(Arc::new(ContextBuilderRegistry::default()))
    }
}

impl ContextBuilder for CompositeContextBuilder {
    fn build(&self, context: &GenerationContext) -> Result<RenderContext, GenerationError> {
        tracing::debug!(
            target_lang = %context.target,
            methods = context.service.methods().len(),
            "CompositeContextBuilder selecting builder"
        );
        let builder = self.registry.get(context.target)?;
        builder.build(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Method, ServiceBuilder};

    #[test]
    fn test_registry_default_builders() {
        let registry = ContextBuilderRegistry::new();

        for target in Target::all() {
            assert!(registry.has_builder(target), "{target}");
        }
        assert_eq!(registry.supported_targets(), Target::all());
    }

    #[test]
    fn test_composite_builder_dispatches_on_target() {
        let composite = CompositeContextBuilder::default();

        let mut schema = ServiceBuilder::new("todo");
        schema.add_method(Method::new("ping"));
        let service = Arc::new(schema.build().unwrap());

        for target in Target::all() {
            let context = GenerationContext::new(target, service.clone());
            let render = composite.build(&context).unwrap();
            assert!(render.has_variable("methods"), "{target}");
        }
    }

    #[test]
    fn test_unregistered_target() {
        let registry = ContextBuilderRegistry {
            builders: HashMap::new(),
        };
        assert!(matches!(
            registry.get(Target::Go),
            Err(GenerationError::UnsupportedTarget(Target::Go))
        ));
    }
}
