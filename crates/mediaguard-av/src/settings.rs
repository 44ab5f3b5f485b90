//! Probe configuration.
//!
//! [`ProbeSettings`] defaults sensibly so an empty `{}` is valid. Loading the
//! JSON is left to the host; we only parse what it hands us.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::probe::ImageBackend;
use crate::Result;

/// Settings shared by every probe invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Explicit ffprobe executable. Falls back to `PATH` lookup.
    pub ffprobe_path: Option<PathBuf>,
    /// Explicit ImageMagick `identify` executable. Falls back to `PATH` lookup.
    pub identify_path: Option<PathBuf>,
    /// How image geometry is read.
    pub image_backend: ImageBackend,
    /// Per-process timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
    /// Use the container duration when the first video stream reports none.
    /// Off by default: such a video counts as having an unknown duration.
    pub container_duration_fallback: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ffprobe_path: None,
            identify_path: None,
            image_backend: ImageBackend::default(),
            timeout_secs: crate::command::DEFAULT_TIMEOUT.as_secs(),
            container_duration_fallback: false,
        }
    }
}

impl ProbeSettings {
    /// Deserialize settings from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Timeout applied to each spawned tool.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
