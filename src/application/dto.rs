//! Request and response types for the application use cases

use std::collections::HashSet;
use std::path::PathBuf;

use crate::application::ValidationError;
use crate::generation::{GenerationOptions, Target};

/// Generate clients for one or more targets from a schema
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Schema file path or HTTP(S) URL
    pub schema: String,
    /// Targets in the order results are reported
    pub targets: Vec<Target>,
    pub output_dir: PathBuf,
    pub options: GenerationOptions,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema.trim().is_empty() {
            return Err(ValidationError::EmptySchema);
        }

        if self.targets.is_empty() {
            return Err(ValidationError::NoTargets);
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(*target) {
                return Err(ValidationError::DuplicateTarget(*target));
            }
        }

        Ok(())
    }
}

/// What one target produced
#[derive(Debug, Clone)]
pub struct TargetSummary {
    pub target: Target,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub service_name: String,
    pub generator_version: String,
    /// One entry per requested target, in request order
    pub targets: Vec<TargetSummary>,
    pub output_path: PathBuf,
}

impl GenerateResponse {
    pub fn artifacts_count(&self) -> usize {
        self.targets.iter().map(|t| t.paths.len()).sum()
    }
}
