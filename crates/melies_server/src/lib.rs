//! HTTP surface for Méliès.
//!
//! Two routes wrap the repair loop:
//!
//! - `POST /generate` takes `{ "prompt": "..." }` and answers with the
//!   rendered video as an `mp4` attachment, or a JSON error.
//! - `GET /wake-up` answers `{ "msg": "ok" }` after a short delay, for hosts
//!   that put idle services to sleep.
//!
//! # Example
//!
//! ```no_run
//! use melies_core::MeliesConfig;
//! use melies_pipeline::RepairLoop;
//! use melies_server::{AppState, serve};
//! use std::sync::Arc;
//!
//! # async fn run(config: MeliesConfig, repair_loop: RepairLoop) -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(Arc::new(repair_loop), config.server().clone());
//! serve(state).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod router;
mod routes;
mod state;

pub use router::{build_cors_layer, build_router, serve};
pub use routes::GenerateBody;
pub use state::AppState;
