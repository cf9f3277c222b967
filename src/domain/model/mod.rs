// Domain models - Core types and data structures

use std::path::{Path, PathBuf};

use crate::error::{VidstampError, VidstampResult};

/// Kind of overlay asset, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Static image (png, jpg, ...); needs an artificial loop to outlast the video
    Image,
    /// Animated image (gif); keeps its native loop count
    AnimatedImage,
}

impl OverlayKind {
    /// Derive the overlay kind from a file path
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("gif") => OverlayKind::AnimatedImage,
            _ => OverlayKind::Image,
        }
    }
}

/// Background music policy for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicMode {
    /// No background music
    Off,
    /// The same track for every video
    Fixed(PathBuf),
    /// A track picked independently at random for each video
    RandomFromFolder(PathBuf),
}

impl MusicMode {
    /// Whether any background music can resolve in this mode
    pub fn is_off(&self) -> bool {
        matches!(self, MusicMode::Off)
    }
}

/// Immutable parameter set for one batch run.
///
/// A snapshot is assembled once before a run starts and handed to the
/// scheduler by value; later edits to settings must build a new snapshot for
/// the next run. Required paths may be empty here - `validate` rejects them
/// before any job is scheduled.
#[derive(Debug, Clone)]
pub struct ConfigurationSnapshot {
    /// Directory scanned for source videos
    pub source_dir: PathBuf,
    /// Directory receiving processed videos
    pub output_dir: PathBuf,
    /// Overlay image or animated GIF
    pub overlay_path: PathBuf,
    /// Derived from `overlay_path`
    pub overlay_kind: OverlayKind,
    /// Background music policy
    pub music_mode: MusicMode,
    /// Keep the source video's own audio track
    pub keep_original_audio: bool,
    /// Background music volume, non-negative and finite
    pub audio_volume: f64,
    /// Use the hardware encoder class
    pub hardware_accel: bool,
    /// Path or name of the external FFmpeg binary
    pub tool_path: PathBuf,
}

impl ConfigurationSnapshot {
    /// Build a snapshot, deriving the overlay kind from the overlay path
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_dir: PathBuf,
        output_dir: PathBuf,
        overlay_path: PathBuf,
        music_mode: MusicMode,
        keep_original_audio: bool,
        audio_volume: f64,
        hardware_accel: bool,
        tool_path: PathBuf,
    ) -> Self {
        let overlay_kind = OverlayKind::from_path(&overlay_path);
        Self {
            source_dir,
            output_dir,
            overlay_path,
            overlay_kind,
            music_mode,
            keep_original_audio,
            audio_volume: sanitize_volume(audio_volume),
            hardware_accel,
            tool_path,
        }
    }

    /// Check that the paths required before scheduling are present
    pub fn validate(&self) -> VidstampResult<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(VidstampError::Configuration {
                field: "source directory",
            });
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(VidstampError::Configuration {
                field: "output directory",
            });
        }
        if self.overlay_path.as_os_str().is_empty() {
            return Err(VidstampError::Configuration {
                field: "overlay path",
            });
        }
        Ok(())
    }
}

/// Parse a user-supplied volume string.
///
/// Invalid input never fails: anything unparsable, negative, or non-finite
/// collapses to the default of 1.0.
pub fn parse_volume(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(v) => sanitize_volume(v),
        Err(_) => 1.0,
    }
}

/// Clamp a volume value to the valid domain (non-negative, finite)
pub fn sanitize_volume(volume: f64) -> f64 {
    if volume.is_finite() && volume >= 0.0 {
        volume
    } else {
        1.0
    }
}

/// One unit of work: a source video paired with its computed output path and
/// resolved audio choice.
///
/// Jobs are created by enumeration, immutable afterwards, and consumed by
/// exactly one scheduler task. `resolved_music` is filled at enumeration time
/// for fixed-track mode and at execution time for random mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Source video inside the batch's source directory
    pub source_file: PathBuf,
    /// Target path inside the output directory
    pub output_file: PathBuf,
    /// Background music track for this job, if any resolved
    pub resolved_music: Option<PathBuf>,
}

impl Job {
    /// Create a new job
    pub fn new(source_file: PathBuf, output_file: PathBuf, resolved_music: Option<PathBuf>) -> Self {
        Self {
            source_file,
            output_file,
            resolved_music,
        }
    }

    /// Finalize the job with a lazily resolved music track
    pub fn with_resolved_music(self, resolved_music: Option<PathBuf>) -> Self {
        Self {
            resolved_music,
            ..self
        }
    }

    /// Source file name for progress and failure reporting
    pub fn source_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_file.display().to_string())
    }
}

#[cfg(test)]
mod tests;
