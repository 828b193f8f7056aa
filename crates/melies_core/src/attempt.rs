//! Attempt records and failure classification.

use melies_error::{GenerationError, RenderError, RenderErrorKind, ScriptError};
use serde::{Deserialize, Serialize};

/// Coarse outcome of a single attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AttemptOutcome {
    /// The renderer produced an artifact
    Success,
    /// The provider failed to return a script
    GenerationFailure,
    /// The script was unusable before rendering
    ValidationFailure,
    /// The renderer failed or misbehaved
    RenderFailure,
}

/// Precise reason an attempt failed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum FailureKind {
    /// Provider call errored or returned nothing
    GenerationFailure,
    /// Script has no scene class deriving from the required base
    MissingEntryPoint,
    /// Renderer executable is not installed
    RendererUnavailable,
    /// Renderer exited non-zero, timed out, or could not be run
    RenderFailure,
    /// Renderer exited zero without producing the expected file
    ArtifactMissing,
}

impl FailureKind {
    /// Outcome bucket this failure belongs to.
    pub fn outcome(&self) -> AttemptOutcome {
        match self {
            FailureKind::GenerationFailure => AttemptOutcome::GenerationFailure,
            FailureKind::MissingEntryPoint => AttemptOutcome::ValidationFailure,
            FailureKind::RendererUnavailable
            | FailureKind::RenderFailure
            | FailureKind::ArtifactMissing => AttemptOutcome::RenderFailure,
        }
    }
}

/// Any failure that ends an attempt.
///
/// The repair loop converts every stage error into this type at the attempt
/// boundary so it can classify the failure and extract the diagnostic.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum AttemptFailure {
    /// Provider failure
    #[from]
    Generation(GenerationError),
    /// Script I/O or validation failure
    #[from]
    Script(ScriptError),
    /// Renderer failure
    #[from]
    Render(RenderError),
}

impl AttemptFailure {
    /// Classify the failure.
    ///
    /// Script I/O errors other than a missing entry point are counted as
    /// generation failures: the attempt could not produce a usable script file.
    pub fn kind(&self) -> FailureKind {
        match self {
            AttemptFailure::Generation(_) => FailureKind::GenerationFailure,
            AttemptFailure::Script(err) if err.is_missing_entry_point() => {
                FailureKind::MissingEntryPoint
            }
            AttemptFailure::Script(_) => FailureKind::GenerationFailure,
            AttemptFailure::Render(err) => match err.kind {
                RenderErrorKind::RendererUnavailable(_) => FailureKind::RendererUnavailable,
                RenderErrorKind::ArtifactMissing(_) => FailureKind::ArtifactMissing,
                RenderErrorKind::Failed { .. }
                | RenderErrorKind::TimedOut { .. }
                | RenderErrorKind::Spawn(_) => FailureKind::RenderFailure,
            },
        }
    }

    /// Diagnostic text for users and for the next repair prompt.
    ///
    /// Never empty: a blank diagnostic is replaced by the failure kind name.
    pub fn diagnostic(&self) -> String {
        let text = match self {
            AttemptFailure::Generation(err) => err.diagnostic(),
            AttemptFailure::Script(err) => err.diagnostic(),
            AttemptFailure::Render(err) => err.diagnostic(),
        };
        if text.trim().is_empty() {
            format!("{} with no diagnostic output", self.kind())
        } else {
            text
        }
    }
}

/// Record of one attempt within a run.
///
/// # Examples
///
/// ```
/// use melies_core::{AttemptOutcome, AttemptRecord};
/// use std::path::PathBuf;
///
/// let record = AttemptRecord::success(1, Some("class A(VoiceoverScene): pass\n".into()), PathBuf::from("a.mp4"));
/// assert_eq!(*record.outcome(), AttemptOutcome::Success);
/// assert!(record.diagnostic().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AttemptRecord {
    /// One-based attempt index
    attempt: u32,
    /// Coarse outcome
    outcome: AttemptOutcome,
    /// Precise failure reason, absent on success
    failure: Option<FailureKind>,
    /// Failure diagnostic, empty on success
    diagnostic: String,
    /// Script text last written to disk during the attempt
    script: Option<String>,
    /// Rendered artifact, present on success
    artifact: Option<std::path::PathBuf>,
}

impl AttemptRecord {
    /// Record a successful attempt.
    pub fn success(attempt: u32, script: Option<String>, artifact: std::path::PathBuf) -> Self {
        Self {
            attempt,
            outcome: AttemptOutcome::Success,
            failure: None,
            diagnostic: String::new(),
            script,
            artifact: Some(artifact),
        }
    }

    /// Record a failed attempt.
    pub fn failed(attempt: u32, failure: &AttemptFailure, script: Option<String>) -> Self {
        let kind = failure.kind();
        Self {
            attempt,
            outcome: kind.outcome(),
            failure: Some(kind),
            diagnostic: failure.diagnostic(),
            script,
            artifact: None,
        }
    }

    /// Whether the attempt produced an artifact.
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Success
    }
}
