//! Target-specific context builders

pub mod go;
pub mod kotlin;
pub mod registry;
pub mod swift;
pub mod typescript;

pub use go::GoContextBuilder;
pub use kotlin::KotlinContextBuilder;
pub use registry::{CompositeContextBuilder, ContextBuilderRegistry};
pub use swift::SwiftContextBuilder;
pub use typescript::TypeScriptContextBuilder;
