//! Output service that prints artifacts instead of writing them

use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::application::{ApplicationError, OutputService};
use crate::generation::Artifact;

/// Prints every artifact to stdout, each preceded by a path banner
pub struct StdoutOutputService;

impl StdoutOutputService {
    pub fn new() -> Self {
        Self
    }

    /// The exact text written for `artifacts`
    pub fn format_artifacts(artifacts: &[Artifact]) -> String {
        artifacts
            .iter()
            .map(|artifact| format!("// ==> {} <==\n{}", artifact.path.display(), artifact.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for StdoutOutputService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for StdoutOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), ApplicationError> {
        let text = Self::format_artifacts(artifacts);
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(text.as_bytes())
            .await
            .map_err(|e| ApplicationError::OutputError(format!("Failed to write stdout: {e}")))?;
        stdout
            .flush()
            .await
            .map_err(|e| ApplicationError::OutputError(format!("Failed to flush stdout: {e}")))
    }

    async fn ensure_directory(&self, _path: &Path) -> Result<(), ApplicationError> {
        Ok(())
    }
}
