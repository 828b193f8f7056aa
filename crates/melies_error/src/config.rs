//! Configuration error types.

use std::fmt;

/// Configuration error with source location.
///
/// Errors raised while validating a loaded configuration name the offending
/// key in dotted form (`pipeline.max_attempts`), matching the TOML tables and
/// the `MELIES__PIPELINE__MAX_ATTEMPTS` environment override.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Dotted configuration key at fault, if one is known
    pub key: Option<&'static str>,
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create an error that is not tied to a single key.
    ///
    /// # Examples
    ///
    /// ```
    /// use melies_error::ConfigError;
    ///
    /// let err = ConfigError::new("GENAI_API_KEY is empty");
    /// assert!(err.message.contains("GENAI_API_KEY"));
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::located(None, message.into())
    }

    /// Create an error for one configuration key.
    ///
    /// # Examples
    ///
    /// ```
    /// use melies_error::ConfigError;
    ///
    /// let err = ConfigError::for_key("render.timeout_secs", "must be at least 1");
    /// assert_eq!(err.key, Some("render.timeout_secs"));
    /// assert_eq!(err.diagnostic(), "render.timeout_secs must be at least 1");
    /// ```
    #[track_caller]
    pub fn for_key(key: &'static str, message: impl Into<String>) -> Self {
        Self::located(Some(key), message.into())
    }

    #[track_caller]
    fn located(key: Option<&'static str>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            key,
            message,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Message with its key and without the source location.
    pub fn diagnostic(&self) -> String {
        match self.key {
            Some(key) => format!("{} {}", key, self.message),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configuration Error: {} at line {} in {}",
            self.diagnostic(),
            self.line,
            self.file
        )
    }
}
