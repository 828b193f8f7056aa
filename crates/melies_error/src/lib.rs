//! Error types for Méliès.
//!
//! This crate provides the foundation error types used throughout the Méliès workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Errors that can end a pipeline attempt also expose a `diagnostic()` string.
//! That string carries no location suffix because it is shown to users and fed
//! back to the script generator as repair context.
//!
//! # Examples
//!
//! ```
//! use melies_error::{MeliesResult, ConfigError};
//!
//! fn load() -> MeliesResult<String> {
//!     Err(ConfigError::new("max_attempts must be at least 1"))?
//! }
//!
//! match load() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod generation;
mod pipeline;
mod render;
mod script;
mod server;
mod error;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use script::{ScriptError, ScriptErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use error::{MeliesError, MeliesErrorKind, MeliesResult};
