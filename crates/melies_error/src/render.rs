//! Renderer error types.

/// Ways a render invocation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// Renderer executable is not on the search path
    #[display("{} executable not found in PATH", _0)]
    RendererUnavailable(String),
    /// Renderer process could not be started or awaited
    #[display("Failed to run renderer: {}", _0)]
    Spawn(String),
    /// Renderer exited with a non-zero status
    #[display("{}", diagnostic)]
    Failed {
        /// Exit code, if the process exited normally
        exit_code: Option<i32>,
        /// Traceback region of the renderer's error stream
        diagnostic: String,
    },
    /// Renderer exceeded its wall-clock budget and was killed
    #[display("Renderer timed out after {} seconds", seconds)]
    TimedOut {
        /// Budget in seconds
        seconds: u64,
    },
    /// Renderer reported success but produced no video at the expected path
    #[display("Rendered video not found at {}", _0)]
    ArtifactMissing(String),
}

/// Render error with location tracking.
///
/// # Examples
///
/// ```
/// use melies_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::Failed {
///     exit_code: Some(1),
///     diagnostic: "Traceback (most recent call last): ZeroDivisionError".to_string(),
/// });
/// assert!(err.diagnostic().starts_with("Traceback"));
/// assert!(err.is_render_failure());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The kind of error that occurred
    pub kind: RenderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenderError {
    /// Create a new render error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the renderer ran and failed, including timeouts and spawn errors.
    pub fn is_render_failure(&self) -> bool {
        matches!(
            self.kind,
            RenderErrorKind::Failed { .. } | RenderErrorKind::TimedOut { .. } | RenderErrorKind::Spawn(_)
        )
    }

    /// Text describing the failure without location information.
    pub fn diagnostic(&self) -> String {
        self.kind.to_string()
    }
}
