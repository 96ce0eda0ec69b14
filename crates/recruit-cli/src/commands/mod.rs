//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod import;
pub mod preview;
pub mod reset;
pub mod status;
