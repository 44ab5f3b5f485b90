//! Probe result types.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of an image or video frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Geometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Apply an EXIF orientation tag (1-8).
    ///
    /// Tags 5 through 8 store the picture rotated by a quarter turn, so the
    /// displayed width is the stored height. Unknown tags leave the geometry
    /// unchanged.
    pub fn oriented(self, exif_orientation: Option<u16>) -> Self {
        match exif_orientation {
            Some(5..=8) => Self {
                width: self.height,
                height: self.width,
            },
            _ => self,
        }
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Measurements of the first video stream in a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoStream {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Duration in seconds, if the container reports one.
    pub duration: Option<f64>,
}

impl VideoStream {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height)
    }
}

/// Backend used to read image geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageBackend {
    /// Read the header in-process, falling back to ImageMagick on failure.
    #[default]
    Auto,
    /// Read the header in-process with the `image` crate.
    Native,
    /// Shell out to ImageMagick `identify`.
    Identify,
}
