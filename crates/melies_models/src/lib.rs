//! Text provider integrations for Méliès.
//!
//! - [`GeminiClient`] implements [`TextProvider`](melies_interface::TextProvider)
//!   on top of the Google Gemini REST API.
//! - [`RandomSelector`] and [`RoundRobinSelector`] pick which API key each
//!   provider call uses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod selector;

pub use gemini::GeminiClient;
pub use selector::{RandomSelector, RoundRobinSelector, selector_for};
