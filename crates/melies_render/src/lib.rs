//! Manim renderer for Méliès.
//!
//! [`ManimRenderer`] runs the `manim` command line tool as a subprocess and
//! reports either the path of the rendered video or a structured
//! [`RenderError`](melies_error::RenderError) carrying the traceback.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod manim;
mod output;

pub use manim::ManimRenderer;
pub use output::{artifact_path, extract_traceback};
