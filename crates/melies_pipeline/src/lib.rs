//! The Méliès repair loop.
//!
//! A request moves through generation, sanitization, inspection and
//! rendering. Any failure along the way is turned into a diagnostic and fed
//! back to the generator, up to a fixed number of attempts.
//!
//! - [`PromptedGenerator`] assembles fresh and repair prompts for a
//!   [`TextProvider`](melies_interface::TextProvider).
//! - [`RepairLoop`] drives the attempts and returns a
//!   [`RunReport`](melies_core::RunReport).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod prompts;
mod repair;

pub use generator::PromptedGenerator;
pub use prompts::{DEFAULT_FRESH_INSTRUCTIONS, DEFAULT_REPAIR_INSTRUCTIONS, PromptSet};
pub use repair::RepairLoop;
