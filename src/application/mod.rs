//! Application layer - orchestrates use cases and coordinates between domains

pub mod dto;
pub mod errors;
pub mod generate;
pub mod template_management;
pub mod traits;

pub use dto::*;
pub use errors::*;
pub use generate::*;
pub use template_management::*;
pub use traits::*;
