//! Test utilities for renderer tests.
//!
//! Fake renderer executables are small shell scripts written into a temp
//! directory. They accept the same arguments as `manim`:
//! `<quality flag> <script> <EntryPoint> --media_dir <dir>`.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Writes a video where the real renderer would.
pub const SUCCEEDS: &str = r#"#!/bin/sh
stem=$(basename "$2" .py)
case "$1" in
  -ql) folder=480p15 ;;
  -qm) folder=720p30 ;;
  -qh) folder=1080p60 ;;
esac
mkdir -p "$5/videos/$stem/$folder"
printf 'fake mp4' > "$5/videos/$stem/$folder/$3.mp4"
echo "File ready at $5/videos/$stem/$folder/$3.mp4"
"#;

/// Prints progress noise and a traceback, then exits non-zero.
pub const FAILS_WITH_TRACEBACK: &str = r#"#!/bin/sh
echo "Manim Community v0.19.0" >&2
echo "Animation 0: Create(Circle)" >&2
echo "Traceback (most recent call last):" >&2
echo "ZeroDivisionError: division by zero" >&2
exit 1
"#;

/// Floods stderr with progress output before the traceback, then exits non-zero.
pub const FAILS_AFTER_FLOOD: &str = r#"#!/bin/sh
head -c 5000000 /dev/zero | tr '\0' 'x' >&2
echo "" >&2
echo "Traceback (most recent call last):" >&2
echo "ZeroDivisionError: division by zero" >&2
exit 1
"#;

/// Exits zero while a background child keeps the output pipes open.
pub const EXITS_LEAVING_PIPES_OPEN: &str = r#"#!/bin/sh
sleep 30 &
exit 0
"#;

/// Exits non-zero without a traceback.
pub const FAILS_PLAIN: &str = r#"#!/bin/sh
echo "Error: no such option: --bogus" >&2
exit 2
"#;

/// Exits zero without writing anything.
pub const SUCCEEDS_WITHOUT_OUTPUT: &str = r#"#!/bin/sh
exit 0
"#;

/// Never finishes on its own.
pub const HANGS: &str = r#"#!/bin/sh
exec sleep 30
"#;

/// Write an executable shell script named `name` into `dir`.
pub fn fake_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("Failed to write fake executable");
    let mut permissions = std::fs::metadata(&path)
        .expect("Failed to stat fake executable")
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("Failed to chmod fake executable");
    path
}

/// Write a placeholder script file the renderer will be pointed at.
pub fn script_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "class Intro(VoiceoverScene):\n    pass\n")
        .expect("Failed to write script");
    path
}
