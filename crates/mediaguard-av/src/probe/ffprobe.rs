//! FFprobe-based video probing.
//!
//! Geometry and duration are read by separate invocations. Both pass
//! `-select_streams v:0`, so they always describe the same stream: the first
//! video stream in the file.

use super::types::*;
use crate::command::{path_arg, ToolCommand};
use crate::settings::ProbeSettings;
use crate::tools::{get_tool_path, FFPROBE};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const GEOMETRY_ENTRIES: &str = "stream=width,height";
const DURATION_ENTRIES: &str = "stream=duration:format=duration";

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    #[serde(default)]
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Read the width and height of the first video stream.
pub fn video_geometry(path: &Path, settings: &ProbeSettings) -> Result<Geometry> {
    let json = run_ffprobe(path, settings, GEOMETRY_ENTRIES)?;
    let stream = parse_video_stream(&json, false)?.ok_or_else(|| Error::NoVideoStream {
        path: path.to_path_buf(),
    })?;
    Ok(stream.geometry())
}

/// Read the duration of the first video stream in seconds.
///
/// Returns `Ok(None)` when the stream reports no usable duration. The
/// container duration is consulted only when
/// [`ProbeSettings::container_duration_fallback`] is set.
pub fn video_duration(path: &Path, settings: &ProbeSettings) -> Result<Option<f64>> {
    let json = run_ffprobe(path, settings, DURATION_ENTRIES)?;
    let fallback = settings.container_duration_fallback;
    let stream = parse_video_stream(&json, fallback)?.ok_or_else(|| Error::NoVideoStream {
        path: path.to_path_buf(),
    })?;
    Ok(stream.duration)
}

fn run_ffprobe(path: &Path, settings: &ProbeSettings, entries: &str) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let program = get_tool_path(FFPROBE, settings.ffprobe_path.as_deref())?;
    let output = ToolCommand::new(program)
        .args(["-v", "error", "-select_streams", "v:0", "-show_entries", entries])
        .args(["-print_format", "json"])
        .arg(path_arg(path))
        .timeout(settings.timeout())
        .execute()?;

    Ok(output.stdout)
}

/// Parse ffprobe JSON for the first video stream.
///
/// Returns `Ok(None)` when the output lists no video stream. With
/// `container_fallback`, a stream without a duration takes the container's;
/// Matroska files usually only carry the latter.
pub fn parse_video_stream(json: &str, container_fallback: bool) -> Result<Option<VideoStream>> {
    let output: FfprobeOutput = serde_json::from_str(json)?;

    let container_duration = output
        .format
        .filter(|_| container_fallback)
        .and_then(|f| f.duration)
        .and_then(|d| parse_seconds(&d));

    Ok(output.streams.into_iter().next().map(|stream| VideoStream {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        duration: stream
            .duration
            .and_then(|d| parse_seconds(&d))
            .or(container_duration),
    }))
}

/// ffprobe prints durations as decimal strings, or `N/A` when unknown.
fn parse_seconds(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}
