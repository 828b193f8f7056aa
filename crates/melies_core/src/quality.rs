//! Render quality tiers.

use serde::{Deserialize, Serialize};

/// Quality profile passed to the renderer.
///
/// Each tier maps to a command-line flag and to the folder name the renderer
/// writes videos into, which is needed to locate the artifact afterwards.
///
/// # Examples
///
/// ```
/// use melies_core::RenderQuality;
///
/// let quality = RenderQuality::default();
/// assert_eq!(quality.flag(), "-ql");
/// assert_eq!(quality.folder(), "480p15");
/// assert_eq!("high".parse::<RenderQuality>().unwrap(), RenderQuality::High);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RenderQuality {
    /// 854x480 at 15 fps, used for fast previews
    #[default]
    Low,
    /// 1280x720 at 30 fps
    Medium,
    /// 1920x1080 at 60 fps
    High,
}

impl RenderQuality {
    /// Command-line flag selecting this tier.
    pub fn flag(&self) -> &'static str {
        match self {
            RenderQuality::Low => "-ql",
            RenderQuality::Medium => "-qm",
            RenderQuality::High => "-qh",
        }
    }

    /// Folder the renderer writes this tier's videos into.
    pub fn folder(&self) -> &'static str {
        match self {
            RenderQuality::Low => "480p15",
            RenderQuality::Medium => "720p30",
            RenderQuality::High => "1080p60",
        }
    }
}
