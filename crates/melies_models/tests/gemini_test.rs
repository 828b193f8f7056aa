//! Tests for the Gemini provider.

use melies_core::{ApiKey, CredentialPool, MeliesConfig};
use melies_interface::{CompletionRequest, CredentialSelector, TextProvider};
use melies_models::GeminiClient;

/// Selector that never yields a key.
struct NoKeys;

impl CredentialSelector for NoKeys {
    fn next_credential<'a>(&self, _pool: &'a CredentialPool) -> Option<&'a ApiKey> {
        None
    }
}

#[test]
fn test_client_metadata() {
    let pool = CredentialPool::from_env_value("test-key").unwrap();
    let client = GeminiClient::new(pool, "gemini-2.0-flash");
    assert_eq!(client.provider_name(), "gemini");
    assert_eq!(client.model_name(), "gemini-2.0-flash");
}

#[test]
fn test_client_from_settings() {
    let config = MeliesConfig::default();
    let pool = CredentialPool::new(["a", "b"]).unwrap();
    let client = GeminiClient::from_settings(config.generation(), pool);
    assert_eq!(client.model_name(), config.generation().model());
    assert_eq!(client.pool().len(), 2);
}

#[test]
fn test_debug_output_hides_keys() {
    let pool = CredentialPool::from_env_value("super-secret").unwrap();
    let client = GeminiClient::new(pool, "gemini-2.0-flash");
    assert!(!format!("{:?}", client).contains("super-secret"));
}

#[tokio::test]
async fn test_missing_credential_is_generation_error() {
    let pool = CredentialPool::from_env_value("unused").unwrap();
    let client = GeminiClient::new(pool, "gemini-2.0-flash").with_selector(Box::new(NoKeys));

    let err = client
        .complete(&CompletionRequest::new("system", "user"))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        melies_error::GenerationErrorKind::MissingCredential
    );
    assert!(err.diagnostic().starts_with("Script generation failed"));
}

/// Live call against the Gemini API. Consumes tokens.
///
/// Run with: `GENAI_API_KEY=... cargo test -p melies_models --features api`
#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)] // Requires GENAI_API_KEY
async fn test_real_api_call() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = MeliesConfig::default();
    let pool = config.generation().credential_pool_from_env()?;
    let client = GeminiClient::from_settings(config.generation(), pool);

    let mut request = CompletionRequest::new("Answer with a single word.", "Say 'ok'");
    request.max_output_tokens = Some(10);
    let text = client.complete(&request).await?;
    assert!(!text.trim().is_empty());
    Ok(())
}
