//! Use case for generating clients for several targets from one schema

use futures::future::try_join_all;
use std::sync::Arc;

use crate::application::{
    ApplicationError, GenerateRequest, GenerateResponse, OutputService, TargetSummary,
};
use crate::generation::{GenerationContext, GenerationOrchestrator};
use crate::schema::SchemaLoader;

/// Loads the schema once and runs every requested target against it
pub struct GenerateClientsUseCase {
    schema_loader: Arc<dyn SchemaLoader>,
    generation_orchestrator: Arc<GenerationOrchestrator>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateClientsUseCase {
    pub fn new(
        schema_loader: Arc<dyn SchemaLoader>,
        generation_orchestrator: Arc<GenerationOrchestrator>,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            schema_loader,
            generation_orchestrator,
            output_service,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, ApplicationError> {
        request.validate()?;

        let service = Arc::new(self.schema_loader.load(&request.schema).await?);
        tracing::debug!(
            service = service.name(),
            targets = request.targets.len(),
            "Loaded schema"
        );

        // Targets share the immutable service and run concurrently; the first
        // failure aborts the whole request before anything is written.
        let runs = request.targets.iter().map(|target| {
            let context = GenerationContext::new(*target, Arc::clone(&service))
                .with_options(request.options.clone());
            self.generation_orchestrator.generate(context)
        });
        let results = try_join_all(runs).await?;

        self.output_service
            .ensure_directory(&request.output_dir)
            .await?;

        let mut summaries = Vec::with_capacity(results.len());
        for result in results {
            let mut artifacts = result.artifacts;
            for artifact in &mut artifacts {
                artifact.path = request.output_dir.join(&artifact.path);
            }
            self.output_service.write_artifacts(&artifacts).await?;

            summaries.push(TargetSummary {
                target: result.target,
                paths: artifacts.into_iter().map(|a| a.path).collect(),
            });
        }

        Ok(GenerateResponse {
            service_name: service.name().to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            targets: summaries,
            output_path: request.output_dir,
        })
    }
}
