//! Generation domain module - orchestrates code generation workflow
//!
//! This module implements the core code generation logic, taking a validated
//! service and transforming it into per-target source artifacts through
//! template discovery, context building, rendering, and post-processing.

pub mod context;
pub mod errors;
pub mod orchestrator;
pub mod sanitizers;
pub mod service_context;
pub mod traits;
pub mod types;
pub mod utils;

pub use context::*;
pub use errors::*;
pub use orchestrator::*;
pub use service_context::{FieldContext, MethodContext, ServiceContext, ShapeContext};
pub use traits::*;
pub use types::*;
