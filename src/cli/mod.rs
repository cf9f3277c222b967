//! CLI module for Vidstamp
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod commands;

/// Vidstamp batch video processor
///
/// Overlays an image or animated GIF onto every video in a directory,
/// optionally mixes in background music, and runs the conversions in
/// parallel against an external FFmpeg binary.
#[derive(Parser)]
#[command(name = "vidstamp")]
#[command(about = "Vidstamp - batch video overlay and background-music mixing")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Process every video in the source directory
    Run(RunArgs),
    /// Print the tool invocation planned for a single video
    Plan(PlanArgs),
    /// Check the configuration and the external tool without processing
    Validate(ValidateArgs),
}

/// Flags shared by every command that assembles a configuration snapshot
#[derive(Args)]
pub struct SnapshotArgs {
    /// Directory scanned for videos (mp4/avi/mov)
    #[arg(short = 's', long = "source")]
    pub source_dir: Option<PathBuf>,

    /// Directory receiving the processed videos
    #[arg(short = 'o', long = "output")]
    pub output_dir: Option<PathBuf>,

    /// Overlay image or animated GIF
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Background music file, the same track for every video
    #[arg(long, conflicts_with = "music_folder")]
    pub music: Option<PathBuf>,

    /// Folder to pick a random music track from, independently per video
    #[arg(long = "music-folder")]
    pub music_folder: Option<PathBuf>,

    /// Drop the source videos' own audio tracks
    #[arg(long)]
    pub no_original_audio: bool,

    /// Background music volume; invalid values fall back to 1.0
    #[arg(long)]
    pub volume: Option<String>,

    /// Use the software encoder instead of hardware acceleration
    #[arg(long)]
    pub no_hwaccel: bool,

    /// Path or name of the FFmpeg binary
    #[arg(long, env = "VIDSTAMP_FFMPEG")]
    pub tool: Option<PathBuf>,

    /// TOML file supplying defaults for omitted flags
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Disable the terminal progress bar
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for the plan command
#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Source video to plan for
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the validate command
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}
