//! Tests for per-request working directories.

use melies_script::{ScriptWorkspace, WorkspaceGuard};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_workspaces_are_unique() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let first = ScriptWorkspace::create(temp_dir.path()).await?;
    let second = ScriptWorkspace::create(temp_dir.path()).await?;

    assert_ne!(first.id(), second.id());
    assert_ne!(first.dir(), second.dir());
    assert!(first.dir().is_dir());
    assert!(second.dir().is_dir());
    Ok(())
}

#[tokio::test]
async fn test_write_and_read_attempt() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let workspace = ScriptWorkspace::create(temp_dir.path()).await?;

    let path = workspace.write_attempt(2, "x = 1\n").await?;
    assert_eq!(path, workspace.dir().join("attempt-2.py"));
    assert_eq!(workspace.read_attempt(2).await?, "x = 1\n");

    workspace.write_attempt(2, "x = 2\n").await?;
    assert_eq!(workspace.read_attempt(2).await?, "x = 2\n");
    Ok(())
}

#[tokio::test]
async fn test_cleanup_removes_everything() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let workspace = ScriptWorkspace::create(temp_dir.path()).await?;
    workspace.write_attempt(1, "x = 1\n").await?;
    let nested = workspace.dir().join("videos/attempt-1/480p15");
    tokio::fs::create_dir_all(&nested).await?;
    tokio::fs::write(nested.join("Intro.mp4"), b"mp4").await?;

    workspace.cleanup().await?;
    assert!(!workspace.dir().exists());

    // Second cleanup is a no-op
    workspace.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn test_creates_missing_work_dir() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("nested/work");
    let workspace = ScriptWorkspace::create(&root).await?;
    assert!(workspace.dir().starts_with(&root));
    Ok(())
}

/// Poll until `path` disappears or the deadline passes.
async fn wait_until_removed(path: &Path) -> bool {
    for _ in 0..100 {
        if !path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    !path.exists()
}

#[tokio::test]
async fn test_dropped_guard_removes_workspace() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let guard = WorkspaceGuard::new(ScriptWorkspace::create(temp_dir.path()).await?);
    guard.write_attempt(1, "x = 1\n").await?;
    let dir = guard.dir().to_path_buf();

    drop(guard);

    assert!(wait_until_removed(&dir).await);
    Ok(())
}

#[test]
fn test_dropped_guard_outside_runtime_removes_workspace() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let guard = runtime.block_on(async {
        ScriptWorkspace::create(temp_dir.path())
            .await
            .map(WorkspaceGuard::new)
    })?;
    let dir = guard.dir().to_path_buf();

    drop(guard);

    assert!(!dir.exists());
    Ok(())
}

#[tokio::test]
async fn test_guard_cleanup_removes_inline() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let guard = WorkspaceGuard::new(ScriptWorkspace::create(temp_dir.path()).await?);
    let dir = guard.dir().to_path_buf();

    guard.cleanup().await?;

    assert!(!dir.exists());
    Ok(())
}
