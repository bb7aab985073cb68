//! Filesystem-based template discovery
//!
//! Loads a target's templates from a directory laid out like the embedded
//! set, typically given via `--template-dir`. Any file the directory does not
//! provide falls back to its embedded counterpart.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::{
    EmbeddedTemplateRepository, TEMPLATE_KINDS, TemplateError, TemplateFile, TemplateSet,
    TemplateSource,
};
use crate::generation::{GenerationError, Target, TemplateDiscovery};

/// Template discovery rooted at a directory on disk
pub struct FileSystemTemplateDiscovery {
    root: PathBuf,
    fallback: EmbeddedTemplateRepository,
}

impl FileSystemTemplateDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: EmbeddedTemplateRepository::new(),
        }
    }

    async fn load(&self, target: Target) -> Result<TemplateSet, TemplateError> {
        if !self.root.is_dir() {
            return Err(TemplateError::not_found(self.root.to_string_lossy()));
        }

        let mut files = Vec::with_capacity(TEMPLATE_KINDS.len());
        for kind in TEMPLATE_KINDS {
            let path = self.root.join(TemplateSet::relative_path(target, kind));
            if fs::try_exists(&path).await? {
                debug!(file = %path.display(), "Using template override");
                files.push(TemplateFile {
                    kind,
                    content: fs::read_to_string(&path).await?,
                    source: TemplateSource::FileSystem(path),
                });
            } else {
                files.push(self.fallback.load_file(target, kind)?);
            }
        }

        Ok(TemplateSet { target, files })
    }
}

#[async_trait]
impl TemplateDiscovery for FileSystemTemplateDiscovery {
    async fn discover(&self, target: Target) -> Result<TemplateSet, GenerationError> {
        Ok(self.load(target).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::FileKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_override_and_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let go_dir = temp_dir.path().join("go");
        fs::create_dir_all(&go_dir).await.unwrap();
        fs::write(go_dir.join("client.go.tera"), "package {{ package }}\n")
            .await
            .unwrap();

        let discovery = FileSystemTemplateDiscovery::new(temp_dir.path());
        let set = discovery.discover(Target::Go).await.unwrap();

        let client = set.file(FileKind::Client).unwrap();
        assert_eq!(client.content, "package {{ package }}\n");
        assert!(matches!(client.source, TemplateSource::FileSystem(_)));

        let types = set.file(FileKind::Types).unwrap();
        assert_eq!(types.source, TemplateSource::Embedded);
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let discovery = FileSystemTemplateDiscovery::new("/definitely/not/here");
        let result = discovery.discover(Target::Swift).await;
        assert!(matches!(result, Err(GenerationError::DiscoveryError(_))));
    }
}
