//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, PipelineError, RenderError, ScriptError, ServerError};

/// Every error condition the workspace can report.
///
/// # Examples
///
/// ```
/// use melies_error::{MeliesError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: MeliesError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MeliesErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text provider error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Script sanitization or inspection error
    #[from(ScriptError)]
    Script(ScriptError),
    /// Renderer error
    #[from(RenderError)]
    Render(RenderError),
    /// Repair loop error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Méliès error with kind discrimination.
///
/// # Examples
///
/// ```
/// use melies_error::{MeliesResult, ConfigError};
///
/// fn might_fail() -> MeliesResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Melies Error: {}", _0)]
pub struct MeliesError(Box<MeliesErrorKind>);

impl MeliesError {
    /// Create a new error from a kind.
    pub fn new(kind: MeliesErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MeliesErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MeliesErrorKind
impl<T> From<T> for MeliesError
where
    T: Into<MeliesErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Méliès operations.
pub type MeliesResult<T> = std::result::Result<T, MeliesError>;
