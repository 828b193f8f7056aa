//! Instruction text for the script generator.

use melies_core::PromptOverrides;

/// Instructions for a first attempt.
pub const DEFAULT_FRESH_INSTRUCTIONS: &str = include_str!("../prompts/fresh.md");

/// Instructions for an attempt that repairs a failed script.
pub const DEFAULT_REPAIR_INSTRUCTIONS: &str = include_str!("../prompts/repair.md");

/// The pair of instruction texts a generator uses.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PromptSet {
    /// System instructions for fresh mode
    fresh: String,
    /// System instructions for repair mode
    repair: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            fresh: DEFAULT_FRESH_INSTRUCTIONS.to_string(),
            repair: DEFAULT_REPAIR_INSTRUCTIONS.to_string(),
        }
    }
}

impl PromptSet {
    /// Explicit instruction texts.
    pub fn new(fresh: impl Into<String>, repair: impl Into<String>) -> Self {
        Self {
            fresh: fresh.into(),
            repair: repair.into(),
        }
    }

    /// Bundled instructions with any configured replacements applied.
    pub fn from_overrides(overrides: &PromptOverrides) -> Self {
        let defaults = Self::default();
        Self {
            fresh: overrides.fresh().clone().unwrap_or(defaults.fresh),
            repair: overrides.repair().clone().unwrap_or(defaults.repair),
        }
    }

    /// User message carrying the failed script and its error.
    pub(crate) fn repair_context(prior_script: &str, prior_error: &str) -> String {
        format!(
            "The previous script failed.\n\nScript:\n{}\n\nError:\n{}",
            prior_script.trim_end(),
            prior_error.trim_end()
        )
    }
}
