//! Trait definitions for the pipeline's external collaborators.

use crate::CompletionRequest;
use async_trait::async_trait;
use melies_core::{ApiKey, CredentialPool, EntryPoint, GenerationRequest};
use melies_error::{GenerationError, RenderError};
use std::path::{Path, PathBuf};

/// A generative text provider: prompt in, text out.
///
/// Implementations make exactly one provider call per invocation and do not
/// retry; retrying is the repair loop's job.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send the request and return the raw response text.
    async fn complete(&self, req: &CompletionRequest) -> Result<String, GenerationError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.0-flash").
    fn model_name(&self) -> &str;
}

/// Produces raw script text for a generation request.
///
/// Chooses between fresh and repair prompting from the request's prior fields.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Generate a script. The result may still contain code fences.
    async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Turns a script file into a rendered video.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render `entry_point` from `script`, writing output under `output_dir`.
    ///
    /// On success the returned path exists on disk.
    async fn render(
        &self,
        script: &Path,
        entry_point: &EntryPoint,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError>;
}

/// Strategy for picking a credential for each provider call.
pub trait CredentialSelector: Send + Sync {
    /// Next credential from the pool.
    fn next_credential<'a>(&self, pool: &'a CredentialPool) -> Option<&'a ApiKey>;
}
