//! Schema domain module - the language-neutral description of a service
//!
//! The model is built once from an already-validated schema and is never
//! mutated afterwards. Loading schema documents from files or URLs lives in
//! `infrastructure::schema`.

pub mod errors;
pub mod model;
pub mod traits;

pub use errors::*;
pub use model::*;
pub use traits::*;
