//! Repair loop error types.

/// Terminal conditions of the repair loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Every attempt failed
    #[display("Generation failed after {} attempts: {}", attempts, last_error)]
    AttemptsExhausted {
        /// Number of attempts performed
        attempts: u32,
        /// Diagnostic of the final failed attempt
        last_error: String,
    },
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use melies_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::AttemptsExhausted {
///     attempts: 3,
///     last_error: "boom".to_string(),
/// });
/// assert!(format!("{}", err).contains("3 attempts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
