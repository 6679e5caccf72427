//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod check;
pub mod convert;
pub mod models;

// Re-export main command functions
pub use check::{execute_check, CheckReport};
pub use convert::execute_convert;
pub use models::{CheckArgs, ConvertArgs, OutputFormat, RunSummary};
