//! Post-processors applied to rendered artifacts

use crate::generation::{Artifact, GenerationContext, GenerationError, PostProcessor};

/// Post-processor that prepends the generated-code marker
///
/// All four targets accept `//` line comments, and Go tooling recognizes
/// this exact shape as a generated file.
pub struct HeaderPostProcessor;

impl HeaderPostProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn header(context: &GenerationContext) -> String {
        format!(
            "// Code generated by rpcgen {}. DO NOT EDIT.",
            context.metadata.generator_version
        )
    }
}

impl PostProcessor for HeaderPostProcessor {
    fn process(
        &self,
        mut artifacts: Vec<Artifact>,
        context: &GenerationContext,
    ) -> Result<Vec<Artifact>, GenerationError> {
        let header = Self::header(context);
        for artifact in &mut artifacts {
            if !artifact.content.starts_with(&header) {
                artifact.content = format!("{header}\n\n{}", artifact.content);
            }
        }
        Ok(artifacts)
    }
}

/// Post-processor that normalizes whitespace left behind by template tags
///
/// Strips trailing spaces, collapses runs of blank lines into one, drops
/// leading blank lines and ends the file with exactly one newline.
pub struct WhitespacePostProcessor;

impl WhitespacePostProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut blank_run = false;

        for line in content.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run = true;
                continue;
            }
            if blank_run && !out.is_empty() {
                out.push('\n');
            }
            blank_run = false;
            out.push_str(line);
            out.push('\n');
        }

        out
    }
}

impl PostProcessor for WhitespacePostProcessor {
    fn process(
        &self,
        mut artifacts: Vec<Artifact>,
        _context: &GenerationContext,
    ) -> Result<Vec<Artifact>, GenerationError> {
        for artifact in &mut artifacts {
            artifact.content = Self::normalize(&artifact.content);
        }
        Ok(artifacts)
    }
}

/// Composite post-processor that runs multiple processors in sequence
pub struct CompositePostProcessor {
    processors: Vec<Box<dyn PostProcessor>>,
}

impl CompositePostProcessor {
    pub fn new() -> Self {
        Self::with_processors(vec![
            Box::new(HeaderPostProcessor::new()),
            Box::new(WhitespacePostProcessor::new()),
        ])
    }

    pub fn with_processors(processors: Vec<Box<dyn PostProcessor>>) -> Self {
        Self { processors }
    }
}

impl Default for CompositePostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor for CompositePostProcessor {
    fn process(
        &self,
        mut artifacts: Vec<Artifact>,
        context: &GenerationContext,
    ) -> Result<Vec<Artifact>, GenerationError> {
        for processor in &self.processors {
            artifacts = processor.process(artifacts, context)?;
        }
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Target;
    use crate::schema::{Method, ServiceBuilder};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn context() -> GenerationContext {
        let mut builder = ServiceBuilder::new("todo");
        builder.add_method(Method::new("ping"));
        GenerationContext::new(Target::Go, Arc::new(builder.build().unwrap()))
    }

    fn artifact(content: &str) -> Artifact {
        Artifact {
            path: PathBuf::from("go/todo_types.go"),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_whitespace_normalization() {
        let normalized =
            WhitespacePostProcessor::normalize("\n\npackage client  \n\n\n\ntype A struct{}\n\n\n");
        assert_eq!(normalized, "package client\n\ntype A struct{}\n");

        assert_eq!(WhitespacePostProcessor::normalize("a\nb"), "a\nb\n");
        assert_eq!(WhitespacePostProcessor::normalize(""), "");
    }

    #[test]
    fn test_header_post_processor() {
        let context = context();
        let result = HeaderPostProcessor::new()
            .process(vec![artifact("package client\n")], &context)
            .unwrap();

        let expected = format!(
            "// Code generated by rpcgen {}. DO NOT EDIT.\n\npackage client\n",
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(result[0].content, expected);

        // Running twice does not stack headers
        let again = HeaderPostProcessor::new().process(result, &context).unwrap();
        assert_eq!(again[0].content, expected);
    }

    #[test]
    fn test_composite_post_processor() {
        let result = CompositePostProcessor::new()
            .process(vec![artifact("\n\npackage client\n\n\n\nfunc A() {}  ")], &context())
            .unwrap();

        let lines: Vec<&str> = result[0].content.lines().collect();
        assert!(lines[0].starts_with("// Code generated by rpcgen"));
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "package client");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "func A() {}");
        assert!(result[0].content.ends_with("{}\n"));
    }
}
