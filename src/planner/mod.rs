//! Filter graph and command planning module
//!
//! Pure mapping from a job with resolved audio plus the batch configuration
//! to the argument list handed to the external tool. No filesystem access, no
//! randomness, no errors: the same inputs always yield the same plan.

use serde::Serialize;

use crate::domain::model::{ConfigurationSnapshot, Job, OverlayKind};

/// Declared duration for a looped static overlay input, in seconds.
///
/// Must exceed the length of any realistic source video so the overlay never
/// runs out before the primary stream does.
pub const OVERLAY_DURATION_SENTINEL_SECS: u32 = 9999;

/// Concrete encoder names per encoder class, injectable for portability
#[derive(Debug, Clone, Copy)]
pub struct EncoderTable {
    /// Hardware-accelerated encoder
    pub hardware: &'static str,
    /// Software encoder
    pub software: &'static str,
}

impl Default for EncoderTable {
    fn default() -> Self {
        Self {
            hardware: "h264_nvenc",
            software: "libx264",
        }
    }
}

/// A complete, ready-to-execute invocation of the external tool
#[derive(Debug, Clone, Serialize)]
pub struct CommandPlan {
    /// Argument list, in order, excluding the tool path itself
    pub args: Vec<String>,
    /// The `-filter_complex` expression, segments separated by `;`
    pub filter_graph: String,
}

/// Build the command plan for one job.
///
/// Argument order: overwrite flag, primary video input, overlay input with
/// its loop flags, optional audio input, the filter graph, the output pad
/// maps, the encoder selection, the shortest-duration flag, and finally the
/// output path.
pub fn build_command(
    job: &Job,
    snapshot: &ConfigurationSnapshot,
    encoders: &EncoderTable,
) -> CommandPlan {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-i".into(),
        job.source_file.to_string_lossy().into_owned(),
    ];

    // An animated overlay keeps its native loop count; a static image gets an
    // artificial loop bounded by the duration sentinel.
    match snapshot.overlay_kind {
        OverlayKind::AnimatedImage => {
            args.push("-ignore_loop".into());
            args.push("0".into());
        }
        OverlayKind::Image => {
            args.push("-loop".into());
            args.push("1".into());
            args.push("-t".into());
            args.push(OVERLAY_DURATION_SENTINEL_SECS.to_string());
        }
    }
    args.push("-i".into());
    args.push(snapshot.overlay_path.to_string_lossy().into_owned());

    let music = job.resolved_music.as_deref();
    if let Some(track) = music {
        args.push("-i".into());
        args.push(track.to_string_lossy().into_owned());
    }

    // The overlay decision, not the audio decision, governs video truncation.
    let mut filter_graph = String::from("[0:v][1:v]overlay=0:0:shortest=1[vout]");
    if music.is_some() {
        filter_graph.push_str(&format!(";[2:a]volume={}[bgm]", snapshot.audio_volume));
        if snapshot.keep_original_audio {
            filter_graph.push_str(";[0:a][bgm]amix=inputs=2:duration=first[aout]");
        }
    }

    args.push("-filter_complex".into());
    args.push(filter_graph.clone());
    args.push("-map".into());
    args.push("[vout]".into());

    // 4-way exclusive audio policy keyed on (keep original, music resolved).
    match (snapshot.keep_original_audio, music) {
        (true, Some(_)) => {
            args.push("-map".into());
            args.push("[aout]".into());
        }
        (false, Some(_)) => {
            args.push("-map".into());
            args.push("[bgm]".into());
        }
        (true, None) => {
            // No filter segment; pass the source's own audio through
            // untouched. The trailing `?` tolerates audio-less sources.
            args.push("-map".into());
            args.push("0:a?".into());
        }
        (false, None) => {}
    }

    args.push("-c:v".into());
    args.push(
        if snapshot.hardware_accel {
            encoders.hardware
        } else {
            encoders.software
        }
        .into(),
    );
    args.push("-shortest".into());
    args.push(job.output_file.to_string_lossy().into_owned());

    CommandPlan { args, filter_graph }
}
