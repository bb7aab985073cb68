//! Generator configuration file (`rpcgen.toml`)
//!
//! Every key is optional; command-line flags override whatever the file sets.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generation::{GenerationOptions, Target};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "rpcgen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub schema: Option<String>,
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub targets: Vec<Target>,
    pub client_name: Option<String>,
    pub go_package: Option<String>,
    pub kotlin_package: Option<String>,
    pub template_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `explicit` when given, else `rpcgen.toml` in `dir` if it exists
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default = dir.join(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            tracing::debug!(path = %default.display(), "Using config file");
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// Generation options from this config, each overridden by `overrides` when set
    pub fn options(&self, overrides: GenerationOptions) -> GenerationOptions {
        GenerationOptions {
            client_name: overrides.client_name.or_else(|| self.client_name.clone()),
            go_package: overrides.go_package.or_else(|| self.go_package.clone()),
            kotlin_package: overrides
                .kotlin_package
                .or_else(|| self.kotlin_package.clone()),
        }
    }
}
