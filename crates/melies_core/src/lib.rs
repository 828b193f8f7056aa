//! Core data types for Méliès.
//!
//! This crate provides the request-scoped entities shared by every stage of the
//! generate-validate-render-repair loop, plus the layered configuration that
//! wires those stages together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attempt;
mod config;
mod credentials;
mod entry_point;
mod quality;
mod report;
mod request;
mod state;

pub use attempt::{AttemptFailure, AttemptOutcome, AttemptRecord, FailureKind};
pub use config::{
    GenerationSettings, MeliesConfig, PipelineSettings, PromptOverrides, RenderSettings,
    ServerSettings,
};
pub use credentials::{ApiKey, CredentialPool, SelectionStrategy};
pub use entry_point::EntryPoint;
pub use quality::RenderQuality;
pub use report::{RunOutcome, RunReport};
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use state::PipelineState;
