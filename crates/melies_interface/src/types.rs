//! Types shared across trait boundaries.

use serde::{Deserialize, Serialize};

/// A fully assembled prompt for the text provider.
///
/// # Examples
///
/// ```
/// use melies_interface::CompletionRequest;
///
/// let request = CompletionRequest::new("You write Manim scripts.", "Explain sorting.");
/// assert_eq!(request.system, "You write Manim scripts.");
/// assert_eq!(request.user_parts, vec!["Explain sorting.".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompletionRequest {
    /// System instructions
    pub system: String,
    /// User message parts, sent in order
    pub user_parts: Vec<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    /// A request with a system instruction and one user part.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user_parts: vec![user.into()],
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Append a user message part.
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.user_parts.push(part.into());
        self
    }
}
