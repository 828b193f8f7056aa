//! Google Gemini text provider.
//!
//! The client holds a [`CredentialPool`] and a [`CredentialSelector`]. Every
//! call draws a key from the pool, builds a Gemini client for the configured
//! model and sends exactly one request. There is no retry here: a failed call
//! becomes a [`GenerationError`] and the repair loop decides what to do next.
//!
//! # Example
//!
//! ```no_run
//! use melies_core::CredentialPool;
//! use melies_interface::{CompletionRequest, TextProvider};
//! use melies_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = CredentialPool::from_env_value("key-a,key-b")?;
//! let client = GeminiClient::new(pool, "gemini-2.0-flash");
//!
//! let request = CompletionRequest::new("You write Manim scripts.", "Explain sorting.");
//! let script = client.complete(&request).await?;
//! # Ok(())
//! # }
//! ```

use crate::RandomSelector;
use crate::selector::selector_for;
use async_trait::async_trait;
use gemini_rust::{Gemini, client::Model};
use melies_core::{CredentialPool, GenerationSettings};
use melies_error::{GenerationError, GenerationErrorKind};
use melies_interface::{CompletionRequest, CredentialSelector, TextProvider};
use tracing::{debug, instrument, warn};

/// Gemini REST client drawing a key from a pool on every call.
pub struct GeminiClient {
    pool: CredentialPool,
    selector: Box<dyn CredentialSelector>,
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("keys", &self.pool.len())
            .finish()
    }
}

impl GeminiClient {
    /// Create a client with uniformly random key selection.
    pub fn new(pool: CredentialPool, model_name: impl Into<String>) -> Self {
        Self {
            pool,
            selector: Box::new(RandomSelector),
            model_name: model_name.into(),
        }
    }

    /// Create a client from configured settings and an already resolved pool.
    pub fn from_settings(settings: &GenerationSettings, pool: CredentialPool) -> Self {
        Self {
            pool,
            selector: selector_for(*settings.selection()),
            model_name: settings.model().clone(),
        }
    }

    /// Replace the key selection strategy.
    pub fn with_selector(mut self, selector: Box<dyn CredentialSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Keys available to this client.
    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    /// Convert a model name into the SDK's model identifier.
    ///
    /// Names without the `models/` prefix get it added, as the API requires.
    pub(crate) fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Convert SDK errors into generation errors, keeping HTTP status codes.
    pub(crate) fn parse_gemini_error(err: impl std::fmt::Display) -> GenerationError {
        let message = err.to_string();

        // Example: "bad response from server; code 503; description: ..."
        match Self::extract_status_code(&message) {
            Some(status_code) => GenerationError::new(GenerationErrorKind::HttpError {
                status_code,
                message,
            }),
            None => GenerationError::new(GenerationErrorKind::ApiRequest(message)),
        }
    }

    fn extract_status_code(message: &str) -> Option<u16> {
        let start = message.find("code ")? + 5;
        let digits: String = message[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[async_trait]
impl TextProvider for GeminiClient {
    #[instrument(
        skip(self, req),
        fields(model = %self.model_name, parts = req.user_parts.len())
    )]
    async fn complete(&self, req: &CompletionRequest) -> Result<String, GenerationError> {
        let key = self
            .selector
            .next_credential(&self.pool)
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingCredential))?;

        let client = Gemini::with_model(key.expose(), Self::model_name_to_enum(&self.model_name))
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ClientCreation(e.to_string()))
            })?;

        let mut builder = client.generate_content();
        if !req.system.trim().is_empty() {
            builder = builder.with_system_prompt(&req.system);
        }
        for part in &req.user_parts {
            builder = builder.with_user_message(part);
        }
        if let Some(temperature) = req.temperature {
            builder = builder.with_temperature(temperature);
        }
        if let Some(max_tokens) = req.max_output_tokens {
            builder = builder.with_max_output_tokens(max_tokens as i32);
        }

        let response = builder.execute().await.map_err(|e| {
            warn!(error = %e, "Gemini request failed");
            Self::parse_gemini_error(e)
        })?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
        }

        debug!(len = text.len(), "Received completion");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
