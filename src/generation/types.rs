//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported client targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Kotlin,
    Swift,
    Go,
    TypeScript,
}

impl Target {
    /// Get the display name for this target
    pub fn display_name(&self) -> &'static str {
        match self {
            Target::Kotlin => "Kotlin",
            Target::Swift => "Swift",
            Target::Go => "Go",
            Target::TypeScript => "TypeScript",
        }
    }

    /// Get the file extension for this target
    pub fn file_extension(&self) -> &'static str {
        match self {
            Target::Kotlin => "kt",
            Target::Swift => "swift",
            Target::Go => "go",
            Target::TypeScript => "ts",
        }
    }

    /// Get all supported targets
    pub fn all() -> Vec<Target> {
        vec![Target::Kotlin, Target::Swift, Target::Go, Target::TypeScript]
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Kotlin => write!(f, "kotlin"),
            Target::Swift => write!(f, "swift"),
            Target::Go => write!(f, "go"),
            Target::TypeScript => write!(f, "typescript"),
        }
    }
}

impl FromStr for Target {
    type Err = crate::generation::GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kotlin" | "kt" => Ok(Target::Kotlin),
            "swift" => Ok(Target::Swift),
            "go" | "golang" => Ok(Target::Go),
            "typescript" | "ts" => Ok(Target::TypeScript),
            _ => Err(crate::generation::GenerationError::InvalidTarget(
                s.to_string(),
            )),
        }
    }
}

/// The role an identifier plays in emitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierRole {
    Type,
    Method,
    Field,
    Parameter,
}

/// A target type declaration and the expression for its zero value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedType {
    pub declared: String,
    pub zero_value: String,
}

impl MappedType {
    pub fn new(declared: impl Into<String>, zero_value: impl Into<String>) -> Self {
        Self {
            declared: declared.into(),
            zero_value: zero_value.into(),
        }
    }
}

/// Logical output units of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Types,
    Client,
    /// Error model, included by the client template rather than written on its own
    Error,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Types => "types",
            FileKind::Client => "client",
            FileKind::Error => "error",
        }
    }

    /// Kinds that become files of their own
    pub fn emitted() -> [FileKind; 2] {
        [FileKind::Types, FileKind::Client]
    }
}

/// Generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Result of generating one target
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub target: Target,
    pub artifacts: Vec<Artifact>,
    pub metadata: crate::generation::GenerationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_target_from_str() {
        // Test exact matches
        assert_eq!(Target::from_str("kotlin").unwrap(), Target::Kotlin);
        assert_eq!(Target::from_str("swift").unwrap(), Target::Swift);
        assert_eq!(Target::from_str("go").unwrap(), Target::Go);
        assert_eq!(
            Target::from_str("typescript").unwrap(),
            Target::TypeScript
        );

        // Test aliases
        assert_eq!(Target::from_str("kt").unwrap(), Target::Kotlin);
        assert_eq!(Target::from_str("golang").unwrap(), Target::Go);
        assert_eq!(Target::from_str("ts").unwrap(), Target::TypeScript);

        // Test case insensitivity
        assert_eq!(Target::from_str("SWIFT").unwrap(), Target::Swift);
        assert_eq!(Target::from_str("TypeScript").unwrap(), Target::TypeScript);

        // Test invalid input
        assert!(Target::from_str("rust").is_err());
        assert!(Target::from_str("").is_err());
    }

    #[test]
    fn test_target_display_round_trips() {
        for target in Target::all() {
            assert_eq!(Target::from_str(&target.to_string()).unwrap(), target);
        }
    }

    #[test]
    fn test_target_file_extension() {
        assert_eq!(Target::Kotlin.file_extension(), "kt");
        assert_eq!(Target::Swift.file_extension(), "swift");
        assert_eq!(Target::Go.file_extension(), "go");
        assert_eq!(Target::TypeScript.file_extension(), "ts");
    }

    #[test]
    fn test_target_display_name() {
        assert_eq!(Target::TypeScript.display_name(), "TypeScript");
        assert_eq!(Target::Go.display_name(), "Go");
    }

    #[test]
    fn test_emitted_kinds_exclude_error() {
        assert!(!FileKind::emitted().contains(&FileKind::Error));
    }
}
