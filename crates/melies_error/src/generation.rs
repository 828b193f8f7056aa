//! Script generation error types.

/// Conditions under which the text provider failed to produce a script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No credential could be drawn from the pool
    #[display("No API credential available for the generation provider")]
    MissingCredential,
    /// Failed to create the provider client
    #[display("Failed to create provider client: {}", _0)]
    ClientCreation(String),
    /// Provider request failed before returning a response
    #[display("Provider request failed: {}", _0)]
    ApiRequest(String),
    /// Provider answered with a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider returned no text
    #[display("Provider returned an empty response")]
    EmptyResponse,
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use melies_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyResponse);
/// assert!(err.diagnostic().starts_with("Script generation failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Text describing the failure, prefixed so it cannot be mistaken for a
    /// renderer diagnostic.
    pub fn diagnostic(&self) -> String {
        format!("Script generation failed: {}", self.kind)
    }
}
