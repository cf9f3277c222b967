// Unit tests for domain models

use std::path::{Path, PathBuf};

use super::*;

fn snapshot_with_overlay(overlay: &str) -> ConfigurationSnapshot {
    ConfigurationSnapshot::new(
        PathBuf::from("videos"),
        PathBuf::from("output"),
        PathBuf::from(overlay),
        MusicMode::Off,
        true,
        1.0,
        true,
        PathBuf::from("ffmpeg"),
    )
}

#[test]
fn test_overlay_kind_gif_is_animated() {
    assert_eq!(
        OverlayKind::from_path(Path::new("logo.gif")),
        OverlayKind::AnimatedImage
    );
}

#[test]
fn test_overlay_kind_gif_case_insensitive() {
    assert_eq!(
        OverlayKind::from_path(Path::new("LOGO.GIF")),
        OverlayKind::AnimatedImage
    );
}

#[test]
fn test_overlay_kind_png_is_static() {
    assert_eq!(
        OverlayKind::from_path(Path::new("logo.png")),
        OverlayKind::Image
    );
}

#[test]
fn test_overlay_kind_no_extension_is_static() {
    assert_eq!(OverlayKind::from_path(Path::new("logo")), OverlayKind::Image);
}

#[test]
fn test_snapshot_derives_overlay_kind() {
    let snapshot = snapshot_with_overlay("sticker.gif");
    assert_eq!(snapshot.overlay_kind, OverlayKind::AnimatedImage);

    let snapshot = snapshot_with_overlay("sticker.jpg");
    assert_eq!(snapshot.overlay_kind, OverlayKind::Image);
}

#[test]
fn test_parse_volume_valid() {
    assert_eq!(parse_volume("2.5"), 2.5);
    assert_eq!(parse_volume(" 0.0 "), 0.0);
}

#[test]
fn test_parse_volume_invalid_falls_back_to_default() {
    assert_eq!(parse_volume("loud"), 1.0);
    assert_eq!(parse_volume(""), 1.0);
    assert_eq!(parse_volume("-2"), 1.0);
    assert_eq!(parse_volume("NaN"), 1.0);
    assert_eq!(parse_volume("inf"), 1.0);
}

#[test]
fn test_snapshot_sanitizes_volume() {
    let mut snapshot = snapshot_with_overlay("logo.png");
    assert_eq!(snapshot.audio_volume, 1.0);

    snapshot = ConfigurationSnapshot::new(
        PathBuf::from("videos"),
        PathBuf::from("output"),
        PathBuf::from("logo.png"),
        MusicMode::Off,
        true,
        -3.0,
        true,
        PathBuf::from("ffmpeg"),
    );
    assert_eq!(snapshot.audio_volume, 1.0);
}

#[test]
fn test_validate_accepts_complete_snapshot() {
    assert!(snapshot_with_overlay("logo.png").validate().is_ok());
}

#[test]
fn test_validate_rejects_missing_source_dir() {
    let mut snapshot = snapshot_with_overlay("logo.png");
    snapshot.source_dir = PathBuf::new();
    let err = snapshot.validate().unwrap_err();
    assert!(err.to_string().contains("source directory"));
}

#[test]
fn test_validate_rejects_missing_output_dir() {
    let mut snapshot = snapshot_with_overlay("logo.png");
    snapshot.output_dir = PathBuf::new();
    let err = snapshot.validate().unwrap_err();
    assert!(err.to_string().contains("output directory"));
}

#[test]
fn test_validate_rejects_missing_overlay() {
    let mut snapshot = snapshot_with_overlay("logo.png");
    snapshot.overlay_path = PathBuf::new();
    let err = snapshot.validate().unwrap_err();
    assert!(err.to_string().contains("overlay"));
}

#[test]
fn test_music_mode_is_off() {
    assert!(MusicMode::Off.is_off());
    assert!(!MusicMode::Fixed(PathBuf::from("a.mp3")).is_off());
    assert!(!MusicMode::RandomFromFolder(PathBuf::from("music")).is_off());
}

#[test]
fn test_job_with_resolved_music() {
    let job = Job::new(
        PathBuf::from("videos/a.mp4"),
        PathBuf::from("output/12345_processed_a.mp4"),
        None,
    );
    let finalized = job.clone().with_resolved_music(Some(PathBuf::from("track.mp3")));
    assert_eq!(finalized.source_file, job.source_file);
    assert_eq!(finalized.output_file, job.output_file);
    assert_eq!(finalized.resolved_music, Some(PathBuf::from("track.mp3")));
}

#[test]
fn test_job_source_name() {
    let job = Job::new(
        PathBuf::from("videos/clip.mp4"),
        PathBuf::from("output/00000_processed_clip.mp4"),
        None,
    );
    assert_eq!(job.source_name(), "clip.mp4");
}
