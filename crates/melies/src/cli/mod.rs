//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the melies binary.

mod commands;
mod generate;
mod script;
mod serve;

pub use commands::{Cli, Commands};
pub use generate::generate_video;
pub use script::{inspect_script, sanitize_script};
pub use serve::run_server;
