//! Script debugging command handlers.

use melies::{MeliesResult, SceneInspector, sanitize_file};
use std::path::Path;

/// Handle the `sanitize` command
pub async fn sanitize_script(file: &Path) -> MeliesResult<()> {
    let script = sanitize_file(file).await?;
    tracing::info!(path = %file.display(), lines = script.lines().count(), "Sanitized script");
    print!("{}", script);
    Ok(())
}

/// Handle the `inspect` command
pub async fn inspect_script(file: &Path, base: &str) -> MeliesResult<()> {
    let inspector = SceneInspector::new(base)?;
    let entry_point = inspector.inspect_file(file).await?;
    println!("{}", entry_point);
    Ok(())
}
