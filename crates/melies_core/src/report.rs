//! Run reports.

use crate::AttemptRecord;
use melies_error::{PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// An artifact exists at the given path
    Succeeded {
        /// Rendered video
        artifact: PathBuf,
    },
    /// Every attempt failed
    Failed {
        /// Attempts performed
        attempts: u32,
        /// Diagnostic of the final attempt
        last_error: String,
    },
}

/// Outcome of a run plus the history of its attempts.
///
/// The history is kept for reporting. The script generator only ever sees the
/// most recent failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RunReport {
    /// Terminal result
    outcome: RunOutcome,
    /// Every attempt in order
    attempts: Vec<AttemptRecord>,
}

impl RunReport {
    /// Assemble a report.
    pub fn new(outcome: RunOutcome, attempts: Vec<AttemptRecord>) -> Self {
        Self { outcome, attempts }
    }

    /// Number of attempts performed.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Rendered artifact, if the run succeeded.
    pub fn artifact(&self) -> Option<&PathBuf> {
        match &self.outcome {
            RunOutcome::Succeeded { artifact } => Some(artifact),
            RunOutcome::Failed { .. } => None,
        }
    }

    /// Diagnostic of the final attempt, if the run failed.
    pub fn last_error(&self) -> Option<&str> {
        match &self.outcome {
            RunOutcome::Succeeded { .. } => None,
            RunOutcome::Failed { last_error, .. } => Some(last_error),
        }
    }

    /// Convert into the artifact path, or an exhaustion error.
    pub fn into_result(self) -> Result<PathBuf, PipelineError> {
        match self.outcome {
            RunOutcome::Succeeded { artifact } => Ok(artifact),
            RunOutcome::Failed {
                attempts,
                last_error,
            } => Err(PipelineError::new(PipelineErrorKind::AttemptsExhausted {
                attempts,
                last_error,
            })),
        }
    }
}
