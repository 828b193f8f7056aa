//! Script handling error types.

/// Kinds of script handling errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScriptErrorKind {
    /// Script does not declare a scene class deriving from the required base
    #[display("No {} class found in script.", base)]
    MissingEntryPoint {
        /// Base class the entry point must derive from
        base: String,
    },
    /// Failed to create a working directory
    #[display("Failed to create working directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a script file
    #[display("Failed to write script: {}", _0)]
    FileWrite(String),
    /// Failed to read a script file
    #[display("Failed to read script: {}", _0)]
    FileRead(String),
}

/// Script error with location tracking.
///
/// # Examples
///
/// ```
/// use melies_error::{ScriptError, ScriptErrorKind};
///
/// let err = ScriptError::new(ScriptErrorKind::MissingEntryPoint {
///     base: "VoiceoverScene".to_string(),
/// });
/// assert_eq!(err.diagnostic(), "No VoiceoverScene class found in script.");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The kind of error that occurred
    pub kind: ScriptErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new script error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the script was readable but lacked an entry point.
    pub fn is_missing_entry_point(&self) -> bool {
        matches!(self.kind, ScriptErrorKind::MissingEntryPoint { .. })
    }

    /// Text describing the failure without location information.
    pub fn diagnostic(&self) -> String {
        self.kind.to_string()
    }
}
