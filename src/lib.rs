// Export modules for library usage
pub mod cli;
pub mod config;
pub mod driver;
pub mod eligibility;
pub mod errors;
pub mod render;
pub mod signature;
pub mod typename;
pub mod walker;

// Re-export commonly used types
pub use crate::config::{GeneratorConfig, OutputTarget};
pub use crate::driver::{run, RunSummary};
pub use crate::errors::GeneratorError;
pub use crate::signature::{Candidate, FreeFunction, Method, Param, Receiver, ReturnValue};
pub use crate::typename::{display_name, UnsupportedType};
