//! Manim subprocess invocation.

use crate::{artifact_path, extract_traceback};
use async_trait::async_trait;
use melies_core::{EntryPoint, RenderQuality, RenderSettings};
use melies_error::{RenderError, RenderErrorKind};
use melies_interface::Renderer;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Maximum bytes kept from the end of each output stream.
const MAX_OUTPUT_BYTES: usize = 4 * 1024 * 1024;

/// Read size for draining output streams.
const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Renders scenes by running `manim` as a child process.
///
/// # Example
///
/// ```no_run
/// use melies_core::{EntryPoint, MeliesConfig};
/// use melies_interface::Renderer;
/// use melies_render::ManimRenderer;
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MeliesConfig::load()?;
/// let renderer = ManimRenderer::from_settings(config.render());
/// let video = renderer
///     .render(Path::new("temp/scene.py"), &EntryPoint::new("Intro"), Path::new("temp"))
///     .await?;
/// println!("Rendered {}", video.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ManimRenderer {
    executable: String,
    quality: RenderQuality,
    timeout: Duration,
}

impl ManimRenderer {
    /// Create a renderer for `executable` with low quality and a five minute budget.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            quality: RenderQuality::Low,
            timeout: Duration::from_secs(300),
        }
    }

    /// Create a renderer from configured settings.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            executable: settings.executable().clone(),
            quality: *settings.quality(),
            timeout: Duration::from_secs(*settings.timeout_secs()),
        }
    }

    /// Set the quality tier.
    pub fn with_quality(mut self, quality: RenderQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the wall-clock budget for one render.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured quality tier.
    pub fn quality(&self) -> RenderQuality {
        self.quality
    }

    /// Resolve the executable on `PATH`, or check an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`RenderErrorKind::RendererUnavailable`] if nothing executable is found.
    #[track_caller]
    pub fn locate(&self) -> Result<PathBuf, RenderError> {
        which::which(&self.executable).map_err(|_| {
            RenderError::new(RenderErrorKind::RendererUnavailable(self.executable.clone()))
        })
    }

    /// Spawn the renderer and wait for it within the time budget.
    ///
    /// Returns the exit status and the captured error stream.
    async fn run(
        &self,
        program: &Path,
        script: &Path,
        entry_point: &EntryPoint,
        output_dir: &Path,
    ) -> Result<(std::process::ExitStatus, String), RenderError> {
        let mut cmd = Command::new(program);
        cmd.arg(self.quality.flag())
            .arg(script)
            .arg(entry_point.as_str())
            .arg("--media_dir")
            .arg(output_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|e| RenderError::new(RenderErrorKind::Spawn(e.to_string())))?;

        // Drain both pipes concurrently so a chatty renderer never blocks on a full pipe.
        let mut stdout_task = tokio::spawn(read_stream(child.stdout.take()));
        let mut stderr_task = tokio::spawn(read_stream(child.stderr.take()));

        // Exit and pipe drain share one budget. A grandchild holding the
        // pipes open must not outlive the timeout.
        let waited = tokio::time::timeout(self.timeout, async {
            let status = child.wait().await?;
            let _ = (&mut stdout_task).await;
            let stderr = (&mut stderr_task).await.unwrap_or_default();
            Ok::<_, std::io::Error>((status, stderr))
        })
        .await;
        match waited {
            Ok(Ok((status, stderr))) => {
                debug!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    exit_code = ?status.code(),
                    stderr_bytes = stderr.len(),
                    "Renderer exited"
                );
                Ok((status, String::from_utf8_lossy(&stderr).into_owned()))
            }
            Ok(Err(e)) => Err(RenderError::new(RenderErrorKind::Spawn(e.to_string()))),
            Err(_elapsed) => {
                // The renderer may already have exited with its pipes still held open.
                if !matches!(child.try_wait(), Ok(Some(_))) {
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "Failed to kill timed out renderer");
                    }
                }
                stdout_task.abort();
                stderr_task.abort();
                Err(RenderError::new(RenderErrorKind::TimedOut {
                    seconds: self.timeout.as_secs(),
                }))
            }
        }
    }
}

#[async_trait]
impl Renderer for ManimRenderer {
    #[instrument(
        skip(self, script, output_dir),
        fields(
            script = %script.display(),
            entry_point = %entry_point,
            quality = %self.quality,
        )
    )]
    async fn render(
        &self,
        script: &Path,
        entry_point: &EntryPoint,
        output_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let program = self.locate()?;
        let (status, stderr) = self.run(&program, script, entry_point, output_dir).await?;

        if !status.success() {
            let diagnostic = extract_traceback(&stderr);
            warn!(exit_code = ?status.code(), "Renderer failed");
            return Err(RenderError::new(RenderErrorKind::Failed {
                exit_code: status.code(),
                diagnostic,
            }));
        }

        let artifact = artifact_path(output_dir, script, entry_point, self.quality);
        if !tokio::fs::try_exists(&artifact).await.unwrap_or(false) {
            return Err(RenderError::new(RenderErrorKind::ArtifactMissing(
                artifact.display().to_string(),
            )));
        }

        info!(artifact = %artifact.display(), "Rendered video");
        Ok(artifact)
    }
}

/// Read a stream to the end, keeping at most the last [`MAX_OUTPUT_BYTES`].
///
/// Tracebacks come last, so the head of the stream is what gets dropped.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut tail = Vec::new();
    let Some(mut handle) = handle else {
        return tail;
    };

    let mut chunk = vec![0u8; READ_CHUNK_BYTES];
    loop {
        match handle.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                tail.extend_from_slice(&chunk[..n]);
                // Trim in batches to keep the copy cost linear.
                if tail.len() >= 2 * MAX_OUTPUT_BYTES {
                    tail.drain(..tail.len() - MAX_OUTPUT_BYTES);
                }
            }
            Err(e) => {
                debug!(error = %e, "Stopped reading renderer output");
                break;
            }
        }
    }

    if tail.len() > MAX_OUTPUT_BYTES {
        tail.drain(..tail.len() - MAX_OUTPUT_BYTES);
    }
    tail
}
