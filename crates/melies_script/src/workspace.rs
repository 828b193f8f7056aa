//! Per-request working directories.

use melies_error::{ScriptError, ScriptErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Directory holding one request's attempt scripts and renderer output.
///
/// Layout: `<work_dir>/<uuid>/attempt-<n>.py`. The renderer writes its media
/// tree into the same directory, so removing it with [`cleanup`] removes
/// everything the request produced.
///
/// [`cleanup`]: ScriptWorkspace::cleanup
#[derive(Debug, Clone)]
pub struct ScriptWorkspace {
    id: Uuid,
    dir: PathBuf,
}

impl ScriptWorkspace {
    /// Create a fresh, uniquely named directory under `work_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip(work_dir), fields(work_dir = %work_dir.as_ref().display()))]
    pub async fn create(work_dir: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let id = Uuid::new_v4();
        let dir = work_dir.as_ref().join(id.to_string());

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            ScriptError::new(ScriptErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        debug!(request_id = %id, path = %dir.display(), "Created request workspace");
        Ok(Self { id, dir })
    }

    /// Request identifier, also the directory name.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The request directory. Also used as the renderer's media directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the script file for a one-based attempt index.
    pub fn script_path(&self, attempt: u32) -> PathBuf {
        self.dir.join(format!("attempt-{}.py", attempt))
    }

    /// Write an attempt's script, replacing any earlier content.
    #[instrument(skip(self, script), fields(request_id = %self.id, len = script.len()))]
    pub async fn write_attempt(&self, attempt: u32, script: &str) -> Result<PathBuf, ScriptError> {
        let path = self.script_path(attempt);
        tokio::fs::write(&path, script).await.map_err(|e| {
            ScriptError::new(ScriptErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(path)
    }

    /// Read an attempt's script back.
    pub async fn read_attempt(&self, attempt: u32) -> Result<String, ScriptError> {
        let path = self.script_path(attempt);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            ScriptError::new(ScriptErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })
    }

    /// Remove the request directory and everything in it.
    ///
    /// A directory that is already gone is not an error.
    #[instrument(skip(self), fields(request_id = %self.id))]
    pub async fn cleanup(&self) -> Result<(), ScriptError> {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => {
                info!(path = %self.dir.display(), "Removed request workspace");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(path = %self.dir.display(), error = %e, "Failed to remove request workspace");
                Err(ScriptError::new(ScriptErrorKind::FileWrite(format!(
                    "remove {}: {}",
                    self.dir.display(),
                    e
                ))))
            }
        }
    }
}

/// Owns a [`ScriptWorkspace`] and removes it when dropped.
///
/// An abandoned request (a client disconnect drops the handler future, for
/// instance) still removes its files. Call [`WorkspaceGuard::cleanup`] on the
/// normal path to remove them inline and observe the result.
#[derive(Debug)]
pub struct WorkspaceGuard {
    workspace: ScriptWorkspace,
    armed: bool,
}

impl WorkspaceGuard {
    /// Take ownership of a workspace's lifetime.
    pub fn new(workspace: ScriptWorkspace) -> Self {
        Self {
            workspace,
            armed: true,
        }
    }

    /// Remove the workspace now instead of on drop.
    pub async fn cleanup(mut self) -> Result<(), ScriptError> {
        self.armed = false;
        self.workspace.cleanup().await
    }
}

impl std::ops::Deref for WorkspaceGuard {
    type Target = ScriptWorkspace;

    fn deref(&self) -> &ScriptWorkspace {
        &self.workspace
    }
}

impl Drop for WorkspaceGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let id = self.workspace.id;
        let dir = self.workspace.dir.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    match tokio::fs::remove_dir_all(&dir).await {
                        Ok(()) => info!(request_id = %id, "Removed abandoned request workspace"),
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                        Err(e) => {
                            warn!(request_id = %id, error = %e, "Failed to remove abandoned request workspace")
                        }
                    }
                });
            }
            Err(_) => match std::fs::remove_dir_all(&dir) {
                Ok(()) => info!(request_id = %id, "Removed abandoned request workspace"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(request_id = %id, error = %e, "Failed to remove abandoned request workspace")
                }
            },
        }
    }
}
