//! Prompt assembly on top of a text provider.

use crate::PromptSet;
use async_trait::async_trait;
use melies_core::{GenerationRequest, GenerationSettings};
use melies_error::{GenerationError, GenerationErrorKind};
use melies_interface::{CompletionRequest, ScriptGenerator, TextProvider};
use tracing::{debug, instrument};

/// Script generator that turns requests into provider prompts.
///
/// Fresh requests send the fresh instructions and the topic. Requests that
/// carry both a prior script and a prior error send the repair instructions,
/// the topic, and the failed script with its error. Each call makes exactly
/// one provider call.
///
/// # Example
///
/// ```no_run
/// use melies_core::{CredentialPool, GenerationRequest};
/// use melies_interface::ScriptGenerator;
/// use melies_models::GeminiClient;
/// use melies_pipeline::{PromptSet, PromptedGenerator};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = CredentialPool::from_env_value("key")?;
/// let generator = PromptedGenerator::new(GeminiClient::new(pool, "gemini-2.0-flash"), PromptSet::default());
/// let script = generator.generate(&GenerationRequest::fresh("binary search")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PromptedGenerator<P> {
    provider: P,
    prompts: PromptSet,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl<P: TextProvider> PromptedGenerator<P> {
    /// Wrap a provider with the given instructions.
    pub fn new(provider: P, prompts: PromptSet) -> Self {
        Self {
            provider,
            prompts,
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Apply sampling settings from configuration.
    pub fn with_settings(mut self, settings: &GenerationSettings) -> Self {
        self.temperature = *settings.temperature();
        self.max_output_tokens = *settings.max_output_tokens();
        self
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the provider request for a generation request.
    pub fn completion_request(&self, req: &GenerationRequest) -> CompletionRequest {
        let mut completion = match (req.prior_script(), req.prior_error()) {
            (Some(script), Some(error)) => {
                CompletionRequest::new(self.prompts.repair(), req.prompt())
                    .with_part(PromptSet::repair_context(script, error))
            }
            _ => CompletionRequest::new(self.prompts.fresh(), req.prompt()),
        };
        completion.temperature = self.temperature;
        completion.max_output_tokens = self.max_output_tokens;
        completion
    }
}

#[async_trait]
impl<P: TextProvider> ScriptGenerator for PromptedGenerator<P> {
    #[instrument(
        skip(self, req),
        fields(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            repair = req.is_repair(),
        )
    )]
    async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        let completion = self.completion_request(req);
        let text = self.provider.complete(&completion).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
        }
        debug!(len = text.len(), "Generated script");
        Ok(text)
    }
}
