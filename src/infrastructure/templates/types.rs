//! Core template types for the infrastructure layer
//!
//! These types are storage-agnostic: an embedded set and one loaded from a
//! template directory look the same to the renderer.

use std::path::PathBuf;

use crate::generation::{FileKind, Target};

/// Where a template file was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    FileSystem(PathBuf),
}

/// A single template file of a target
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub kind: FileKind,
    pub content: String,
    pub source: TemplateSource,
}

/// Every template a target needs: types, client and the error model
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub target: Target,
    pub files: Vec<TemplateFile>,
}

impl TemplateSet {
    /// Look up the file for a kind
    pub fn file(&self, kind: FileKind) -> Option<&TemplateFile> {
        self.files.iter().find(|f| f.kind == kind)
    }

    /// Name the renderer registers a template under, and the name other
    /// templates include it by (`kotlin/error`)
    pub fn template_name(target: Target, kind: FileKind) -> String {
        format!("{target}/{}", kind.as_str())
    }

    /// Relative path of a template file inside a template directory
    pub fn relative_path(target: Target, kind: FileKind) -> PathBuf {
        PathBuf::from(target.to_string()).join(format!(
            "{}.{}.tera",
            kind.as_str(),
            target.file_extension()
        ))
    }
}

/// Kinds every template set carries, in render order
pub const TEMPLATE_KINDS: [FileKind; 3] = [FileKind::Error, FileKind::Types, FileKind::Client];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_naming() {
        assert_eq!(
            TemplateSet::template_name(Target::Kotlin, FileKind::Error),
            "kotlin/error"
        );
        assert_eq!(
            TemplateSet::relative_path(Target::TypeScript, FileKind::Client),
            PathBuf::from("typescript/client.ts.tera")
        );
        assert_eq!(
            TemplateSet::relative_path(Target::Go, FileKind::Types),
            PathBuf::from("go/types.go.tera")
        );
    }
}
