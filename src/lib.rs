//! Vidstamp batch video processor library
//!
//! Batch-processes a directory of videos: overlays a static image or
//! animated GIF onto each one, optionally mixes in background music (a fixed
//! track or one picked at random per video), and writes the results to an
//! output directory, running the conversions in parallel against an external
//! FFmpeg binary.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod engine;
pub mod error;
pub mod planner;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{ConfigurationSnapshot, Job, MusicMode, OverlayKind};
pub use engine::{BatchEvent, BatchOutcome, BatchScheduler, BatchState};
pub use error::{VidstampError, VidstampResult};
