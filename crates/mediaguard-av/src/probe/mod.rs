//! Media file probing module.
//!
//! Image geometry is read in-process with the `image` crate or by ImageMagick
//! `identify`. Video geometry and duration come from `ffprobe`.

mod ffprobe;
mod identify;
mod native;
mod types;

pub use ffprobe::{parse_video_stream, video_duration, video_geometry};
pub use identify::{identify_geometry, parse_identify_output};
pub use native::native_geometry;
pub use types::*;

use crate::settings::ProbeSettings;
use crate::Result;
use std::path::Path;

/// Read the geometry of an image using the configured backend.
pub fn probe_image(path: &Path, settings: &ProbeSettings) -> Result<Geometry> {
    match settings.image_backend {
        ImageBackend::Auto => match native_geometry(path) {
            Ok(geometry) => Ok(geometry),
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "native image probe failed, falling back to identify"
                );
                identify_geometry(path, settings)
            }
        },
        ImageBackend::Native => native_geometry(path),
        ImageBackend::Identify => identify_geometry(path, settings),
    }
}
