//! Script utilities for Méliès.
//!
//! Generated scripts pass through three stages before they reach the renderer:
//!
//! - [`sanitize`] strips the code fences and stray backticks a language model
//!   tends to wrap its answer in.
//! - [`SceneInspector`] finds the scene class the renderer should run.
//! - [`ScriptWorkspace`] gives each request its own directory for attempt
//!   scripts and renderer output. [`WorkspaceGuard`] removes it when a
//!   request is abandoned.
//!
//! # Example
//!
//! ```
//! use melies_script::{sanitize, SceneInspector};
//!
//! let raw = "```python\nclass Intro(VoiceoverScene):\n    pass\n```";
//! let script = sanitize(raw);
//! let inspector = SceneInspector::new("VoiceoverScene").unwrap();
//! assert_eq!(inspector.find_entry_point(&script).unwrap().as_str(), "Intro");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod inspector;
mod sanitizer;
mod workspace;

pub use inspector::SceneInspector;
pub use sanitizer::{sanitize, sanitize_file};
pub use workspace::{ScriptWorkspace, WorkspaceGuard};
