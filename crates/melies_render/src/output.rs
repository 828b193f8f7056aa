//! Interpreting what the renderer leaves behind.

use melies_core::{EntryPoint, RenderQuality};
use std::path::{Path, PathBuf};

/// Marker opening a Python traceback in the renderer's error stream.
const TRACEBACK_MARKER: &str = "Traceback";

/// Where Manim writes the video for a scene.
///
/// Layout: `<media_dir>/videos/<script stem>/<quality folder>/<EntryPoint>.mp4`.
///
/// # Examples
///
/// ```
/// use melies_core::{EntryPoint, RenderQuality};
/// use melies_render::artifact_path;
/// use std::path::{Path, PathBuf};
///
/// let path = artifact_path(
///     Path::new("temp/req"),
///     Path::new("temp/req/attempt-1.py"),
///     &EntryPoint::new("Intro"),
///     RenderQuality::Low,
/// );
/// assert_eq!(path, PathBuf::from("temp/req/videos/attempt-1/480p15/Intro.mp4"));
/// ```
pub fn artifact_path(
    media_dir: &Path,
    script: &Path,
    entry_point: &EntryPoint,
    quality: RenderQuality,
) -> PathBuf {
    let stem = script
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    media_dir
        .join("videos")
        .join(stem)
        .join(quality.folder())
        .join(format!("{}.mp4", entry_point))
}

/// Reduce the renderer's error stream to its useful part.
///
/// Returns everything from the first `Traceback` marker on, or the whole
/// stream when there is no marker, trimmed either way. Manim prints progress
/// bars and log lines to stderr before the traceback; those are dropped.
pub fn extract_traceback(stderr: &str) -> String {
    match stderr.find(TRACEBACK_MARKER) {
        Some(start) => stderr[start..].trim().to_string(),
        None => stderr.trim().to_string(),
    }
}
