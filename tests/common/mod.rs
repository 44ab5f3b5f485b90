//! Shared fixtures for integration tests.
//!
//! Provides [`StubProber`], which returns canned measurements and counts how
//! often it was asked, plus helpers for writing real media fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use mediaguard::media::{MediaKind, MediaProber};
use mediaguard_av::Geometry;

/// Route `tracing` output through the test harness once per binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("mediaguard=debug,mediaguard_av=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Prober returning fixed measurements.
#[derive(Debug, Default)]
pub struct StubProber {
    pub geometry: Option<Geometry>,
    pub duration: Option<f64>,
    calls: AtomicUsize,
}

impl StubProber {
    pub fn new(geometry: Option<Geometry>, duration: Option<f64>) -> Self {
        Self {
            geometry,
            duration,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn geometry(width: u32, height: u32) -> Self {
        Self::new(Some(Geometry::new(width, height)), None)
    }

    pub fn duration(seconds: f64) -> Self {
        Self::new(None, Some(seconds))
    }

    /// A prober for which every extraction fails.
    pub fn broken() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MediaProber for StubProber {
    fn geometry(&self, _path: &Path, _kind: MediaKind) -> Option<Geometry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.geometry
    }

    fn video_duration(&self, _path: &Path) -> Option<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.duration
    }
}

/// Write a blank PNG of the given size.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(width, height)
        .save(&path)
        .expect("failed to write PNG fixture");
    path
}

/// True when `tool` runs on this machine.
pub fn has_tool(tool: &str) -> bool {
    mediaguard_av::check_tool(tool, "-version").available
}

/// Render a synthetic test clip with ffmpeg. Returns `None` when ffmpeg is
/// unavailable or fails.
pub fn write_test_clip(dir: &Path, width: u32, height: u32, seconds: u32) -> Option<PathBuf> {
    if !has_tool("ffmpeg") {
        return None;
    }

    let path = dir.join(format!("clip_{width}x{height}_{seconds}s.mp4"));
    let status = Command::new("ffmpeg")
        .args(["-v", "error", "-y", "-f", "lavfi", "-i"])
        .arg(format!(
            "testsrc=duration={seconds}:size={width}x{height}:rate=10"
        ))
        .args(["-pix_fmt", "yuv420p"])
        .arg(&path)
        .status()
        .ok()?;

    status.success().then_some(path)
}
