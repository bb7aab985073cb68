//! Output service implementations

pub mod filesystem_output;
pub mod stdout_output;

pub use filesystem_output::*;
pub use stdout_output::*;
