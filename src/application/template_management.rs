//! Template management use cases

use std::collections::BTreeMap;
use std::path::Path;

use crate::application::ApplicationError;
use crate::infrastructure::templates::{EmbeddedTemplateExporter, EmbeddedTemplateRepository};

/// Use case for listing the embedded templates, grouped by target
pub struct ListTemplatesUseCase {
    repository: EmbeddedTemplateRepository,
}

impl ListTemplatesUseCase {
    pub fn new(repository: EmbeddedTemplateRepository) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> String {
        let mut by_target: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for path in self.repository.list() {
            let (target, file) = path.split_once('/').unwrap_or(("", path.as_str()));
            by_target
                .entry(target.to_string())
                .or_default()
                .push(file.to_string());
        }

        let mut output = String::from("Available embedded templates:\n");
        for (target, files) in by_target {
            output.push_str(&format!("\n{target}:\n"));
            for file in files {
                output.push_str(&format!("  {file}\n"));
            }
        }
        output.push_str("\nUse 'rpcgen templates export <dir>' to customize them");
        output
    }
}

/// Use case for exporting the embedded templates to a directory
pub struct ExportTemplatesUseCase {
    exporter: EmbeddedTemplateExporter,
}

impl ExportTemplatesUseCase {
    pub fn new(exporter: EmbeddedTemplateExporter) -> Self {
        Self { exporter }
    }

    pub fn execute(&self, output_dir: &Path) -> Result<usize, ApplicationError> {
        Ok(self.exporter.export_all_templates(output_dir)?)
    }
}
