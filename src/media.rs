//! Media classification and the probe adapter.
//!
//! [`MediaProber`] is the seam between validation and the outside world.
//! [`ToolProber`] backs it with `mediaguard-av`; hosts and tests may supply
//! their own.

use mediaguard_av::tools::{get_tool_path, FFPROBE, IDENTIFY};
use mediaguard_av::{
    probe_image, video_duration, video_geometry, Geometry, ImageBackend, ProbeSettings,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Media class derived from a declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    /// Anything else. Never probed.
    Unknown,
}

impl MediaKind {
    /// Classify on the primary type token, e.g. `image` in `image/png`.
    pub fn from_content_type(content_type: &str) -> Self {
        let primary = content_type.split('/').next().unwrap_or_default().trim();
        if primary.eq_ignore_ascii_case("image") {
            MediaKind::Image
        } else if primary.eq_ignore_ascii_case("video") {
            MediaKind::Video
        } else {
            MediaKind::Unknown
        }
    }
}

/// Normalised measurements of one file.
///
/// Failed extractions read as zero width/height and an absent duration.
/// `complete` tells those apart from a file that genuinely measured 0x0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbeResult {
    pub kind: MediaKind,
    pub width: u32,
    pub height: u32,
    /// Video only.
    pub duration_seconds: Option<f64>,
    /// False when any measurement fell back to its default.
    pub complete: bool,
}

impl ProbeResult {
    /// Result for a content type that is not probed.
    pub fn unknown() -> Self {
        Self {
            kind: MediaKind::Unknown,
            width: 0,
            height: 0,
            duration_seconds: None,
            complete: true,
        }
    }

    /// Result carrying geometry only; a failed probe reads as 0x0.
    pub fn from_geometry(kind: MediaKind, geometry: Option<Geometry>) -> Self {
        let Geometry { width, height } = geometry.unwrap_or_default();
        Self {
            kind,
            width,
            height,
            duration_seconds: None,
            complete: geometry.is_some(),
        }
    }
}

/// Source of media measurements.
///
/// Implementations never fail: unreadable files yield `None`, and callers
/// apply the zero/absent defaults.
pub trait MediaProber: Send + Sync {
    /// Width and height of an image, or of a video's first video stream.
    fn geometry(&self, path: &Path, kind: MediaKind) -> Option<Geometry>;

    /// Duration in seconds of the first video stream.
    fn video_duration(&self, path: &Path) -> Option<f64>;

    /// Measure everything relevant to `content_type`.
    fn probe(&self, path: &Path, content_type: &str) -> ProbeResult {
        let kind = MediaKind::from_content_type(content_type);
        match kind {
            MediaKind::Unknown => ProbeResult::unknown(),
            MediaKind::Image => ProbeResult::from_geometry(kind, self.geometry(path, kind)),
            MediaKind::Video => {
                let mut result = ProbeResult::from_geometry(kind, self.geometry(path, kind));
                result.duration_seconds = self.video_duration(path);
                result.complete &= result.duration_seconds.is_some();
                result
            }
        }
    }
}

/// [`MediaProber`] backed by ffprobe, ImageMagick, and the `image` crate.
///
/// Every call spawns at most one process and shares no state, so one
/// instance can serve concurrent validations.
#[derive(Debug, Clone, Default)]
pub struct ToolProber {
    settings: ProbeSettings,
}

impl ToolProber {
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Check up front that the tools this prober may need can be located.
    ///
    /// Probing itself never fails; without this check a missing ffprobe
    /// only shows up as warnings and 0x0 results.
    pub fn ensure_tools(&self) -> Result<()> {
        get_tool_path(FFPROBE, self.settings.ffprobe_path.as_deref())?;
        if self.settings.image_backend == ImageBackend::Identify {
            get_tool_path(IDENTIFY, self.settings.identify_path.as_deref())?;
        }
        Ok(())
    }
}

impl MediaProber for ToolProber {
    fn geometry(&self, path: &Path, kind: MediaKind) -> Option<Geometry> {
        let result = match kind {
            MediaKind::Image => probe_image(path, &self.settings),
            MediaKind::Video => video_geometry(path, &self.settings),
            MediaKind::Unknown => return None,
        };

        match result {
            Ok(geometry) => {
                tracing::debug!(path = %path.display(), ?kind, %geometry, "probed geometry");
                Some(geometry)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    ?kind,
                    error = %e,
                    "geometry probe failed, treating as 0x0"
                );
                None
            }
        }
    }

    fn video_duration(&self, path: &Path) -> Option<f64> {
        match video_duration(path, &self.settings) {
            Ok(Some(seconds)) => {
                tracing::debug!(path = %path.display(), seconds, "probed duration");
                Some(seconds)
            }
            Ok(None) => {
                tracing::warn!(path = %path.display(), "video reports no duration");
                None
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "duration probe failed, treating as unknown"
                );
                None
            }
        }
    }
}
