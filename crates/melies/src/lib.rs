//! Méliès - prompt to narrated Manim video
//!
//! Méliès asks a language model for a Manim script, cleans it up, finds its
//! scene, renders it with the `manim` command line tool, and when anything
//! goes wrong feeds the failure back to the model for a corrected script.
//!
//! # Quick Start
//!
//! ```no_run
//! use melies::{MeliesConfig, build_repair_loop};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MeliesConfig::load()?;
//! let repair_loop = build_repair_loop(&config)?;
//!
//! let workspace = repair_loop.create_workspace().await?;
//! let report = repair_loop.run(&workspace, "how binary search works").await;
//! if let Some(video) = report.artifact() {
//!     std::fs::copy(video, "render.mp4")?;
//! }
//! workspace.cleanup().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `melies_error` - Error types
//! - `melies_core` - Requests, attempt records, reports and configuration
//! - `melies_interface` - Provider, generator, renderer and selector traits
//! - `melies_script` - Sanitizer, scene inspector, request working files
//! - `melies_models` - Gemini provider
//! - `melies_render` - Manim subprocess renderer
//! - `melies_pipeline` - Prompt assembly and the repair loop
//! - `melies_server` - HTTP surface
//!
//! This crate re-exports everything for convenience.

pub use melies_core::*;
pub use melies_error::*;
pub use melies_interface::*;
pub use melies_models::{GeminiClient, RandomSelector, RoundRobinSelector, selector_for};
pub use melies_pipeline::{
    DEFAULT_FRESH_INSTRUCTIONS, DEFAULT_REPAIR_INSTRUCTIONS, PromptSet, PromptedGenerator,
    RepairLoop,
};
pub use melies_render::{ManimRenderer, artifact_path, extract_traceback};
pub use melies_script::{
    SceneInspector, ScriptWorkspace, WorkspaceGuard, sanitize, sanitize_file,
};
pub use melies_server::{AppState, GenerateBody, build_cors_layer, build_router, serve};

mod logging;
mod wiring;

pub use logging::{LoggingConfig, init_logging};
pub use wiring::{build_repair_loop, build_repair_loop_with_pool};
