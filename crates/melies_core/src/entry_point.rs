//! Entry point names.

use serde::{Deserialize, Serialize};

/// Name of the scene class the renderer instantiates.
///
/// # Examples
///
/// ```
/// use melies_core::EntryPoint;
///
/// let entry = EntryPoint::new("PythagoreanTheorem");
/// assert_eq!(entry.as_str(), "PythagoreanTheorem");
/// assert_eq!(entry.to_string(), "PythagoreanTheorem");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct EntryPoint(String);

impl EntryPoint {
    /// Wrap a class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The class name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntryPoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
