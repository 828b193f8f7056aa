//! Repair loop states.

use serde::{Deserialize, Serialize};

/// Position of a request within the repair loop.
///
/// A request moves `Idle → Generating → Sanitizing → Inspecting → Rendering`
/// and ends in `Succeeded`, or returns to `Generating` after a failed stage.
/// `Failed` is only reached once the attempt budget is spent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum PipelineState {
    /// No attempt has started
    Idle,
    /// Waiting on the text provider
    Generating,
    /// Stripping wrapping artifacts from the script
    Sanitizing,
    /// Looking for the scene entry point
    Inspecting,
    /// Waiting on the renderer subprocess
    Rendering,
    /// An artifact was produced
    Succeeded,
    /// The attempt budget is exhausted
    Failed,
}

impl PipelineState {
    /// Whether no further transitions can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed)
    }
}
