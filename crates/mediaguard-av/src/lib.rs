//! # mediaguard-av
//!
//! Geometry and duration probing for image and video files.
//!
//! This crate provides functionality for:
//! - Reading image dimensions from the file header, or via ImageMagick
//! - Reading the first video stream's dimensions and duration via ffprobe
//! - Locating and running the external tools with a timeout
//!
//! ## Example
//!
//! ```no_run
//! use mediaguard_av::{probe_image, video_duration, ProbeSettings};
//! use std::path::Path;
//!
//! let settings = ProbeSettings::default();
//! let geometry = probe_image(Path::new("/tmp/upload.png"), &settings)?;
//! println!("image is {geometry}");
//!
//! let seconds = video_duration(Path::new("/tmp/upload.mp4"), &settings)?;
//! println!("video runs {seconds:?} seconds");
//! # Ok::<(), mediaguard_av::Error>(())
//! ```

pub mod command;
mod error;
pub mod probe;
pub mod settings;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{
    probe_image, video_duration, video_geometry, Geometry, ImageBackend, VideoStream,
};
pub use settings::ProbeSettings;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
