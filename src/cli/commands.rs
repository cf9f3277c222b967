//! Command implementations

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossbeam_channel::unbounded;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::{PlanArgs, RunArgs, SnapshotArgs, ValidateArgs};
use crate::config::{load_snapshot_file, SnapshotFile};
use crate::discovery::make_job;
use crate::discovery::music::resolve_music;
use crate::domain::model::{parse_volume, sanitize_volume, ConfigurationSnapshot, MusicMode};
use crate::engine::{BatchEvent, BatchScheduler, ProcessExecutor};
use crate::planner::{build_command, EncoderTable};

/// Execute the run command
pub fn run(args: RunArgs) -> Result<()> {
    let snapshot = build_snapshot(&args.snapshot)?;
    snapshot
        .validate()
        .context("Cannot start batch: configuration is incomplete")?;

    fs::create_dir_all(&snapshot.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            snapshot.output_dir.display()
        )
    })?;

    info!("Source: {}", snapshot.source_dir.display());
    info!("Output: {}", snapshot.output_dir.display());
    info!("Overlay: {}", snapshot.overlay_path.display());

    let started = Instant::now();
    let (events_tx, events_rx) = unbounded();

    let mut scheduler = BatchScheduler::new(snapshot);
    let worker = thread::spawn(move || scheduler.run(&events_tx));

    // The core only publishes events; the progress bar lives entirely here.
    let mut bar: Option<ProgressBar> = None;
    for event in events_rx {
        match event {
            BatchEvent::Progress { processed, total } => {
                if !args.quiet {
                    let bar = bar.get_or_insert_with(|| progress_bar(total));
                    bar.set_position(processed as u64);
                }
            }
            BatchEvent::Completed { .. } => break,
        }
    }
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    let outcome = worker
        .join()
        .map_err(|_| anyhow::anyhow!("Scheduler thread panicked"))?
        .context("Batch run failed")?;

    if outcome.total == 0 {
        println!("No videos found in the source directory.");
        return Ok(());
    }

    println!("Batch Summary");
    println!("=============");
    println!("Videos processed: {}", outcome.total);
    println!("Succeeded: {}", outcome.succeeded);
    println!("Failed: {}", outcome.failed);
    println!("Time taken: {:.2}s", started.elapsed().as_secs_f64());

    Ok(())
}

/// Execute the plan command
pub fn plan(args: PlanArgs) -> Result<()> {
    let snapshot = build_snapshot(&args.snapshot)?;
    snapshot
        .validate()
        .context("Cannot plan: configuration is incomplete")?;

    if !args.input.exists() {
        return Err(anyhow::anyhow!(
            "Input file does not exist: {}",
            args.input.display()
        ));
    }

    let job = make_job(&snapshot, args.input.clone());
    let music =
        resolve_music(&snapshot.music_mode, &job).context("Failed to resolve background music")?;
    let job = job.with_resolved_music(music);
    let plan = build_command(&job, &snapshot, &EncoderTable::default());

    if args.json {
        let payload = serde_json::json!({
            "tool": snapshot.tool_path.display().to_string(),
            "args": plan.args,
            "filter_graph": plan.filter_graph,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).context("Failed to serialize plan to JSON")?
        );
    } else {
        println!("{} {}", snapshot.tool_path.display(), plan.args.join(" "));
        println!();
        println!("Filter graph: {}", plan.filter_graph);
    }

    Ok(())
}

/// Execute the validate command
pub fn validate(args: ValidateArgs) -> Result<()> {
    let snapshot = build_snapshot(&args.snapshot)?;
    snapshot.validate()?;

    let executor = ProcessExecutor::new(snapshot.tool_path.clone());
    executor.check_tool()?;
    executor
        .probe()
        .with_context(|| format!("External tool {} failed to execute", snapshot.tool_path.display()))?;

    println!("Configuration OK");
    Ok(())
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} videos ({percent}%)",
            )
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

/// Merge CLI flags over the optional TOML file into one immutable snapshot.
///
/// The snapshot is built fresh for every command invocation; a later edit to
/// flags or file only ever affects the next run.
fn build_snapshot(args: &SnapshotArgs) -> Result<ConfigurationSnapshot> {
    let file = match &args.config {
        Some(path) => load_snapshot_file(path)?,
        None => SnapshotFile::default(),
    };

    // Either music flag on the command line wins over both file fields; the
    // file's folder-over-track precedence applies only among its own fields.
    let music_mode = if let Some(folder) = args.music_folder.clone() {
        MusicMode::RandomFromFolder(folder)
    } else if let Some(track) = args.music.clone() {
        MusicMode::Fixed(track)
    } else if let Some(folder) = file.music_folder {
        MusicMode::RandomFromFolder(folder)
    } else if let Some(track) = file.music {
        MusicMode::Fixed(track)
    } else {
        MusicMode::Off
    };

    let keep_original_audio = if args.no_original_audio {
        false
    } else {
        file.keep_original_audio.unwrap_or(true)
    };
    let hardware_accel = if args.no_hwaccel {
        false
    } else {
        file.hardware_accel.unwrap_or(true)
    };
    let audio_volume = match &args.volume {
        Some(input) => parse_volume(input),
        None => file.audio_volume.map(sanitize_volume).unwrap_or(1.0),
    };

    Ok(ConfigurationSnapshot::new(
        args.source_dir.clone().or(file.source_dir).unwrap_or_default(),
        args.output_dir.clone().or(file.output_dir).unwrap_or_default(),
        args.overlay.clone().or(file.overlay).unwrap_or_default(),
        music_mode,
        keep_original_audio,
        audio_volume,
        hardware_accel,
        args.tool
            .clone()
            .or(file.tool_path)
            .unwrap_or_else(|| PathBuf::from("ffmpeg")),
    ))
}
