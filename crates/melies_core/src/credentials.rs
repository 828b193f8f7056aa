//! Provider credentials.

use melies_error::ConfigError;
use serde::{Deserialize, Serialize};

/// A single provider API key.
///
/// The key is redacted in `Debug` output so it never reaches logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for handing to the provider client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

/// Ordered set of API keys a provider may draw from.
///
/// # Examples
///
/// ```
/// use melies_core::CredentialPool;
///
/// let pool = CredentialPool::from_env_value(" key-a, ,key-b ").unwrap();
/// assert_eq!(pool.len(), 2);
/// assert_eq!(pool.get(1).unwrap().expose(), "key-b");
/// assert!(CredentialPool::from_env_value(" , ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPool {
    keys: Vec<ApiKey>,
}

impl CredentialPool {
    /// Build a pool from explicit keys, dropping blank entries.
    ///
    /// # Errors
    ///
    /// Returns an error if no non-blank key remains.
    #[track_caller]
    pub fn new(keys: impl IntoIterator<Item = impl Into<String>>) -> Result<Self, ConfigError> {
        let keys: Vec<ApiKey> = keys
            .into_iter()
            .map(|key| {
                let key: String = key.into();
                key.trim().to_string()
            })
            .filter(|key| !key.is_empty())
            .map(ApiKey::new)
            .collect();

        if keys.is_empty() {
            return Err(ConfigError::new("Credential pool must contain at least one key"));
        }
        Ok(Self { keys })
    }

    /// Parse a comma-separated list of keys, as stored in an environment variable.
    #[track_caller]
    pub fn from_env_value(value: &str) -> Result<Self, ConfigError> {
        Self::new(value.split(','))
    }

    /// Number of keys in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the pool is empty. Always false for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ApiKey> {
        self.keys.get(index)
    }

    /// All keys in order.
    pub fn keys(&self) -> &[ApiKey] {
        &self.keys
    }
}

/// How a provider picks a key for each call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SelectionStrategy {
    /// Uniformly random key per call
    #[default]
    Random,
    /// Keys in rotation
    RoundRobin,
}
