//! Generation requests.

use serde::{Deserialize, Serialize};

/// Input to one script generation call.
///
/// The prior fields are populated only after a failed attempt, and only from
/// the most recent failure.
///
/// # Examples
///
/// ```
/// use melies_core::GenerationRequest;
///
/// let fresh = GenerationRequest::fresh("explain the Pythagorean theorem");
/// assert!(!fresh.is_repair());
///
/// let repair = GenerationRequest::builder()
///     .prompt("explain the Pythagorean theorem")
///     .prior_script(Some("class Broken(VoiceoverScene): ...".to_string()))
///     .prior_error(Some("NameError: name 'Foo' is not defined".to_string()))
///     .build()
///     .unwrap();
/// assert!(repair.is_repair());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// The user's topic prompt
    prompt: String,
    /// Script snapshot from the last failed attempt
    #[builder(default)]
    prior_script: Option<String>,
    /// Diagnostic from the last failed attempt
    #[builder(default)]
    prior_error: Option<String>,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// A first-attempt request with no prior context.
    pub fn fresh(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            prior_script: None,
            prior_error: None,
        }
    }

    /// A request carrying the context of the previous failure.
    pub fn with_context(
        prompt: impl Into<String>,
        prior_script: Option<String>,
        prior_error: Option<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            prior_script,
            prior_error,
        }
    }

    /// Whether both a prior script and a prior error are present.
    ///
    /// Repair prompting needs both; with only one the request falls back to a
    /// fresh prompt.
    pub fn is_repair(&self) -> bool {
        self.prior_script.is_some() && self.prior_error.is_some()
    }
}
