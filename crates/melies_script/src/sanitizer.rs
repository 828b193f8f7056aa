//! Removal of code fences and stray backticks from generated scripts.

use melies_error::{ScriptError, ScriptErrorKind};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, instrument};

/// Opening fence line, optionally tagged with a language name.
fn leading_fence() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| {
        Regex::new(r"(?i)\A\s*```[ \t]*[\w+.-]*[ \t]*(?:\r?\n|\z)").expect("Valid leading fence regex")
    })
}

/// Closing fence line at the very end of the text.
fn trailing_fence() -> &'static Regex {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    TRAILING.get_or_init(|| {
        Regex::new(r"(?:\A|\r?\n)[ \t]*```\s*\z").expect("Valid trailing fence regex")
    })
}

/// Turn raw generator output into a directly executable script.
///
/// Removes one leading fence line (```` ``` ```` or ```` ```python ````, any
/// case) and one trailing fence line if present, drops every remaining
/// backtick, trims surrounding whitespace and ends the text with exactly one
/// newline. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use melies_script::sanitize;
///
/// let raw = "```Python\nprint(`hi`)\n```\n";
/// assert_eq!(sanitize(raw), "print(hi)\n");
/// assert_eq!(sanitize(&sanitize(raw)), sanitize(raw));
/// ```
pub fn sanitize(raw: &str) -> String {
    let text = leading_fence().replace(raw, "");
    let text = trailing_fence().replace(&text, "");
    let text = text.replace('`', "");
    let mut script = text.trim().to_string();
    script.push('\n');
    script
}

/// Sanitize a script file in place and return the sanitized text.
///
/// # Errors
///
/// Returns an error if the file cannot be read or rewritten.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub async fn sanitize_file(path: impl AsRef<Path>) -> Result<String, ScriptError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        ScriptError::new(ScriptErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    let script = sanitize(&raw);
    tokio::fs::write(path, &script).await.map_err(|e| {
        ScriptError::new(ScriptErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    debug!(
        before = raw.len(),
        after = script.len(),
        "Sanitized script file"
    );
    Ok(script)
}
