//! Vidstamp batch video processor
//!
//! Overlays an image or animated GIF onto every video in a directory,
//! optionally mixes in background music, and runs the conversions in
//! parallel against an external FFmpeg binary.
//!
//! # Usage
//!
//! ```bash
//! vidstamp run --source ./videos --output ./out --overlay logo.png
//! vidstamp run --source ./videos --output ./out --overlay sticker.gif --music-folder ./music
//! vidstamp plan --input clip.mp4 --source ./videos --output ./out --overlay logo.png
//! vidstamp validate --source ./videos --output ./out --overlay logo.png
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use vidstamp::cli::{commands, Cli, Commands};
use vidstamp::utils::logging;

/// Main entry point for the Vidstamp application
fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run(args) => {
            info!("Executing run command");
            commands::run(args)?;
        }
        Commands::Plan(args) => {
            info!("Executing plan command");
            commands::plan(args)?;
        }
        Commands::Validate(args) => {
            info!("Executing validate command");
            commands::validate(args)?;
        }
    }

    Ok(())
}
