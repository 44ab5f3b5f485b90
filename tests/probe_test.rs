//! Probe integration tests
//!
//! Real files are probed with the default backends. Anything that needs
//! ffmpeg/ffprobe returns early when the tools are not installed.

mod common;

use std::path::Path;

use common::{has_tool, init_tracing, write_png, write_test_clip};
use mediaguard::{
    Attachment, AttachmentValidator, LengthConstraints, MediaKind, MediaProber, ProbeSettings,
    ToolProber, VideoLengthValidator,
};
use mediaguard_av::{probe_image, video_duration, video_geometry, Geometry, ImageBackend};

// ===== Images =====

#[test]
fn native_backend_reads_png() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "banner.png", 300, 50);

    let settings = ProbeSettings {
        image_backend: ImageBackend::Native,
        ..ProbeSettings::default()
    };
    assert_eq!(
        probe_image(&path, &settings).unwrap(),
        Geometry::new(300, 50)
    );
}

#[test]
fn identify_backend_reads_png() {
    if !has_tool("identify") {
        eprintln!("identify not installed; skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "tall.png", 40, 90);

    let settings = ProbeSettings {
        image_backend: ImageBackend::Identify,
        ..ProbeSettings::default()
    };
    assert_eq!(
        probe_image(&path, &settings).unwrap(),
        Geometry::new(40, 90)
    );
}

#[test]
fn tool_prober_image_result() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "square.png", 16, 16);

    let result = ToolProber::default().probe(&path, "image/png");
    assert_eq!(result.kind, MediaKind::Image);
    assert_eq!((result.width, result.height), (16, 16));
    assert_eq!(result.duration_seconds, None);
    assert!(result.complete);
}

#[test]
fn tool_prober_unreadable_image_reads_as_zero() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"\x89PNG but not really").unwrap();

    let prober = ToolProber::new(ProbeSettings {
        image_backend: ImageBackend::Native,
        ..ProbeSettings::default()
    });
    let result = prober.probe(&path, "image/png");
    assert_eq!((result.width, result.height), (0, 0));
    assert!(!result.complete);
}

#[test]
fn tool_prober_audio_is_unknown() {
    let result = ToolProber::default().probe(Path::new("/nonexistent/song.mp3"), "audio/mpeg");
    assert_eq!(result.kind, MediaKind::Unknown);
    assert_eq!((result.width, result.height), (0, 0));
    assert!(result.complete);
}

// ===== Video =====

#[test]
fn ffprobe_reads_first_video_stream() {
    init_tracing();
    if !has_tool("ffprobe") {
        eprintln!("ffprobe not installed; skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let Some(clip) = write_test_clip(dir.path(), 320, 240, 2) else {
        eprintln!("ffmpeg not available; skipping");
        return;
    };

    let settings = ProbeSettings::default();
    assert_eq!(
        video_geometry(&clip, &settings).unwrap(),
        Geometry::new(320, 240)
    );

    let seconds = video_duration(&clip, &settings).unwrap().unwrap();
    assert!((seconds - 2.0).abs() < 0.2, "duration was {seconds}");

    let result = ToolProber::new(settings).probe(&clip, "video/mp4");
    assert_eq!((result.width, result.height), (320, 240));
    assert!(result.complete);
}

#[test]
fn ffprobe_rejects_empty_file() {
    if !has_tool("ffprobe") {
        eprintln!("ffprobe not installed; skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.mp4");
    std::fs::write(&empty, b"").unwrap();

    assert!(video_geometry(&empty, &ProbeSettings::default()).is_err());
    assert!(video_duration(&empty, &ProbeSettings::default()).is_err());
}

#[test]
fn length_validator_on_real_clip() {
    init_tracing();
    if !has_tool("ffprobe") {
        eprintln!("ffprobe not installed; skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let Some(clip) = write_test_clip(dir.path(), 64, 64, 3) else {
        eprintln!("ffmpeg not available; skipping");
        return;
    };

    let validator =
        VideoLengthValidator::<()>::from_json(r#"{"min_length": 10, "max_length": 60}"#)
            .unwrap();
    let violations = validator
        .validate(&(), &Attachment::new(&clip, "video/mp4"))
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "Asset cannot exceed minimum length of 10"
    );

    let short_enough = VideoLengthValidator::new(LengthConstraints::<()>::new().max_length(60.0))
        .unwrap();
    assert!(short_enough
        .validate(&(), &Attachment::new(&clip, "video/mp4"))
        .unwrap()
        .is_empty());
}

#[test]
fn missing_video_fails_length_checks() {
    init_tracing();
    let validator =
        VideoLengthValidator::new(LengthConstraints::<()>::new().max_length(60.0)).unwrap();

    let violations = validator
        .validate(&(), &Attachment::new("/nonexistent/clip.mp4", "video/mp4"))
        .unwrap();
    assert_eq!(violations.len(), 1);
}

#[test]
fn ensure_tools_matches_path_lookup() {
    let prober = ToolProber::default();
    assert_eq!(
        prober.ensure_tools().is_ok(),
        mediaguard_av::require_tool("ffprobe").is_ok()
    );
    if let Err(e) = prober.ensure_tools() {
        assert!(matches!(e, mediaguard::Error::Probe(_)));
    }
}
