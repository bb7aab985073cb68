//! Embedded template repository implementation

use async_trait::async_trait;
use rust_embed::RustEmbed;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use super::{TEMPLATE_KINDS, TemplateError, TemplateFile, TemplateSet, TemplateSource};
use crate::generation::{FileKind, GenerationError, Target, TemplateDiscovery};

/// Container for all templates embedded at compile time
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Template repository backed by embedded templates
pub struct EmbeddedTemplateRepository;

impl EmbeddedTemplateRepository {
    pub fn new() -> Self {
        Self
    }

    /// Load the embedded template for one kind of a target
    pub fn load_file(&self, target: Target, kind: FileKind) -> Result<TemplateFile, TemplateError> {
        let path = TemplateSet::relative_path(target, kind);
        let key = path.to_string_lossy().replace('\\', "/");

        let file = EmbeddedTemplates::get(&key).ok_or_else(|| TemplateError::not_found(&key))?;
        let content = String::from_utf8(file.data.into_owned()).map_err(|e| {
            TemplateError::InvalidTemplate {
                path: key.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(TemplateFile {
            kind,
            content,
            source: TemplateSource::Embedded,
        })
    }

    /// Load the full embedded template set of a target
    pub fn load(&self, target: Target) -> Result<TemplateSet, TemplateError> {
        let files = TEMPLATE_KINDS
            .iter()
            .map(|kind| self.load_file(target, *kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TemplateSet { target, files })
    }

    /// Relative paths of every embedded template, sorted
    pub fn list(&self) -> Vec<String> {
        let mut paths: Vec<String> = EmbeddedTemplates::iter()
            .filter(|p| p.ends_with(".tera"))
            .map(|p| p.into_owned())
            .collect();
        paths.sort();
        paths
    }
}

impl Default for EmbeddedTemplateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateDiscovery for EmbeddedTemplateRepository {
    async fn discover(&self, target: Target) -> Result<TemplateSet, GenerationError> {
        debug!(target_lang = %target, "Loading embedded templates");
        Ok(self.load(target)?)
    }
}

/// Writes the embedded templates to disk so they can be customized and
/// passed back through `--template-dir`
pub struct EmbeddedTemplateExporter {
    repository: EmbeddedTemplateRepository,
}

impl EmbeddedTemplateExporter {
    pub fn new() -> Self {
        Self {
            repository: EmbeddedTemplateRepository::new(),
        }
    }

    /// Export every embedded template below `output_dir`, returning the file count
    pub fn export_all_templates(&self, output_dir: &Path) -> io::Result<usize> {
        let paths = self.repository.list();

        info!(
            output_dir = %output_dir.display(),
            template_count = paths.len(),
            "Exporting all templates"
        );

        for relative in &paths {
            let Some(file) = EmbeddedTemplates::get(relative) else {
                continue;
            };
            let file_path = output_dir.join(relative);

            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&file_path, file.data.as_ref())?;

            debug!(file = %file_path.display(), "Exported template file");
        }

        Ok(paths.len())
    }
}

impl Default for EmbeddedTemplateExporter {
    fn default() -> Self {
        Self::new()
    }
}
