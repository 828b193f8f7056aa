//! Trait definitions for Méliès.
//!
//! This crate provides the seams between the repair loop and its external
//! collaborators, so each one can be replaced by a test double.

mod traits;
mod types;

pub use traits::{CredentialSelector, Renderer, ScriptGenerator, TextProvider};
pub use types::CompletionRequest;
