//! Entry point discovery.

use melies_core::EntryPoint;
use melies_error::{ConfigError, ScriptError, ScriptErrorKind};
use regex::Regex;
use std::path::Path;
use tracing::{debug, instrument};

/// Finds the scene class a script asks the renderer to run.
///
/// A scene is a `class <Name>(<Base>):` declaration, with any amount of
/// whitespace around the punctuation. The first such declaration wins.
#[derive(Debug, Clone)]
pub struct SceneInspector {
    base: String,
    pattern: Regex,
}

impl SceneInspector {
    /// Create an inspector for scenes deriving from `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is blank.
    #[track_caller]
    pub fn new(base: impl Into<String>) -> Result<Self, ConfigError> {
        let base = base.into().trim().to_string();
        if base.is_empty() {
            return Err(ConfigError::new("Scene base class must not be empty"));
        }

        let pattern = Regex::new(&format!(
            r"class\s+(\w+)\s*\(\s*{}\s*\)\s*:",
            regex::escape(&base)
        ))
        .map_err(|e| ConfigError::new(format!("Invalid scene base '{}': {}", base, e)))?;

        Ok(Self { base, pattern })
    }

    /// Base class this inspector looks for.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Extract the entry point from script text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptErrorKind::MissingEntryPoint`] if no declaration matches.
    #[track_caller]
    pub fn find_entry_point(&self, script: &str) -> Result<EntryPoint, ScriptError> {
        self.pattern
            .captures(script)
            .and_then(|caps| caps.get(1))
            .map(|name| EntryPoint::new(name.as_str()))
            .ok_or_else(|| {
                ScriptError::new(ScriptErrorKind::MissingEntryPoint {
                    base: self.base.clone(),
                })
            })
    }

    /// Read a script file and extract its entry point.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), base = %self.base))]
    pub async fn inspect_file(&self, path: impl AsRef<Path>) -> Result<EntryPoint, ScriptError> {
        let path = path.as_ref();
        let script = tokio::fs::read_to_string(path).await.map_err(|e| {
            ScriptError::new(ScriptErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let entry_point = self.find_entry_point(&script)?;
        debug!(entry_point = %entry_point, "Found entry point");
        Ok(entry_point)
    }
}
