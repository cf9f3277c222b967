//! Batch orchestration: bounded worker pool with partial-failure isolation

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::Sender;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::discovery::{enumerate_jobs, music::resolve_music};
use crate::domain::model::{ConfigurationSnapshot, Job};
use crate::engine::executor::ProcessExecutor;
use crate::engine::progress::{BatchEvent, BatchOutcome, BatchProgress, BatchState};
use crate::error::{VidstampError, VidstampResult};
use crate::planner::{build_command, EncoderTable};

/// Orchestrates one batch run.
///
/// Owns the immutable configuration snapshot for the run; the other
/// components (enumeration, music resolution, planning, execution) are pure
/// or single-purpose services it calls per job. Each job is processed by one
/// worker task; a failed task is logged and counted but never aborts its
/// siblings, and the completion event fires exactly once after every
/// submitted task has finished.
pub struct BatchScheduler {
    snapshot: ConfigurationSnapshot,
    encoders: EncoderTable,
    state: BatchState,
}

impl BatchScheduler {
    /// Create a scheduler for one run of the given configuration
    pub fn new(snapshot: ConfigurationSnapshot) -> Self {
        Self {
            snapshot,
            encoders: EncoderTable::default(),
            state: BatchState::Idle,
        }
    }

    /// Override the encoder name table
    pub fn with_encoders(mut self, encoders: EncoderTable) -> Self {
        self.encoders = encoders;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Execute the batch, publishing progress and completion over `events`.
    ///
    /// One-shot: a scheduler runs at most once and every exit leaves it in a
    /// terminal state. Pre-flight failures (missing configuration, missing
    /// tool, unreadable source directory) abort before anything is scheduled,
    /// without a completion event. Once jobs are submitted, the run always
    /// reaches completion; per-job failures only affect the outcome counts.
    pub fn run(&mut self, events: &Sender<BatchEvent>) -> VidstampResult<BatchOutcome> {
        if self.state != BatchState::Idle {
            return Err(VidstampError::WorkerPool {
                message: "batch scheduler already ran".into(),
            });
        }
        if let Err(e) = self.snapshot.validate() {
            self.state = BatchState::ConfigurationError;
            return Err(e);
        }
        let executor = ProcessExecutor::new(self.snapshot.tool_path.clone());
        if let Err(e) = executor.check_tool() {
            self.state = BatchState::ConfigurationError;
            return Err(e);
        }
        let jobs = match enumerate_jobs(&self.snapshot) {
            Ok(jobs) => jobs,
            Err(e) => {
                self.state = BatchState::ConfigurationError;
                return Err(e);
            }
        };
        self.state = BatchState::Running;

        let total = jobs.len();
        if jobs.is_empty() {
            info!("no videos found in {}", self.snapshot.source_dir.display());
            let outcome = BatchOutcome::default();
            let _ = events.send(BatchEvent::Completed { outcome });
            self.state = BatchState::Completed;
            return Ok(outcome);
        }

        // Pool size is the host's logical core count; the external process
        // wait inside each task is the only blocking operation.
        let workers = num_cpus::get();
        info!("scheduling {} job(s) across {} worker(s)", total, workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| VidstampError::WorkerPool {
                message: e.to_string(),
            })?;

        let progress = BatchProgress::new(total);
        let failed = AtomicUsize::new(0);
        let snapshot = &self.snapshot;
        let encoders = &self.encoders;
        let executor = &executor;
        let progress = &progress;
        let failed_counter = &failed;

        pool.install(|| {
            jobs.into_par_iter().for_each(|job| {
                let file = job.source_name();
                if let Err(source) = process_job(job, snapshot, executor, encoders) {
                    warn!("{}", VidstampError::for_job(file, source));
                    failed_counter.fetch_add(1, Ordering::SeqCst);
                }
                // Progress moves regardless of success or failure.
                let processed = progress.record_one();
                let _ = events.send(BatchEvent::Progress { processed, total });
            });
        });

        let failed = failed.load(Ordering::SeqCst);
        let outcome = BatchOutcome {
            total,
            succeeded: total - failed,
            failed,
        };
        let _ = events.send(BatchEvent::Completed { outcome });
        self.state = BatchState::Completed;
        info!("batch completed: {}/{} succeeded", outcome.succeeded, outcome.total);
        Ok(outcome)
    }
}

/// Process one job end to end: resolve music, plan the command, run the tool.
///
/// Each job's data is exclusively owned by its task; the only state shared
/// with siblings is the progress counter and failure count in `run`.
fn process_job(
    job: Job,
    snapshot: &ConfigurationSnapshot,
    executor: &ProcessExecutor,
    encoders: &EncoderTable,
) -> VidstampResult<()> {
    let music = resolve_music(&snapshot.music_mode, &job)?;
    let job = job.with_resolved_music(music);
    let plan = build_command(&job, snapshot, encoders);
    let report = executor.execute(&plan)?;
    if report.success() {
        Ok(())
    } else {
        Err(report.into_error())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crossbeam_channel::unbounded;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::model::MusicMode;

    fn snapshot(source_dir: PathBuf, output_dir: PathBuf) -> ConfigurationSnapshot {
        ConfigurationSnapshot::new(
            source_dir,
            output_dir,
            PathBuf::from("logo.png"),
            MusicMode::Off,
            true,
            1.0,
            false,
            PathBuf::from("ffmpeg"),
        )
    }

    #[test]
    fn test_missing_configuration_is_terminal() {
        let mut snapshot = snapshot(PathBuf::from("videos"), PathBuf::from("output"));
        snapshot.overlay_path = PathBuf::new();

        let (tx, rx) = unbounded();
        let mut scheduler = BatchScheduler::new(snapshot);
        assert_eq!(scheduler.state(), BatchState::Idle);

        let err = scheduler.run(&tx).unwrap_err();
        assert!(matches!(err, VidstampError::Configuration { .. }));
        assert_eq!(scheduler.state(), BatchState::ConfigurationError);
        assert!(rx.try_recv().is_err(), "nothing may be published");
    }

    #[test]
    fn test_missing_tool_aborts_before_scheduling() {
        let dir = TempDir::new().unwrap();
        let mut config = snapshot(dir.path().to_path_buf(), dir.path().join("out"));
        config.tool_path = PathBuf::from("/definitely/not/here/ffmpeg");

        let (tx, rx) = unbounded();
        let mut scheduler = BatchScheduler::new(config);
        let err = scheduler.run(&tx).unwrap_err();
        assert!(matches!(err, VidstampError::ToolNotFound { .. }));
        assert_eq!(scheduler.state(), BatchState::ConfigurationError);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_empty_batch_completes_immediately() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let config = snapshot(source.path().to_path_buf(), output.path().to_path_buf());

        let (tx, rx) = unbounded();
        let mut scheduler = BatchScheduler::new(config);
        let outcome = scheduler.run(&tx).unwrap();

        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(scheduler.state(), BatchState::Completed);
        assert_eq!(
            rx.try_recv().unwrap(),
            BatchEvent::Completed {
                outcome: BatchOutcome::default()
            }
        );
        assert!(rx.try_recv().is_err(), "completion fires exactly once");
    }

    #[test]
    fn test_unreadable_source_directory_aborts() {
        let output = TempDir::new().unwrap();
        let config = snapshot(
            PathBuf::from("/definitely/not/here"),
            output.path().to_path_buf(),
        );

        let (tx, rx) = unbounded();
        let mut scheduler = BatchScheduler::new(config);
        let err = scheduler.run(&tx).unwrap_err();
        assert!(matches!(err, VidstampError::DirectoryUnreadable { .. }));
        assert_eq!(scheduler.state(), BatchState::ConfigurationError);
        assert!(rx.try_recv().is_err(), "nothing may be published");
    }

    #[test]
    fn test_scheduler_runs_at_most_once() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let config = snapshot(source.path().to_path_buf(), output.path().to_path_buf());

        let (tx, rx) = unbounded();
        let mut scheduler = BatchScheduler::new(config);
        scheduler.run(&tx).unwrap();
        assert_eq!(scheduler.state(), BatchState::Completed);

        let err = scheduler.run(&tx).unwrap_err();
        assert!(matches!(err, VidstampError::WorkerPool { .. }));
        assert_eq!(scheduler.state(), BatchState::Completed);

        // only the first run's completion event was published
        assert!(matches!(
            rx.try_recv().unwrap(),
            BatchEvent::Completed { .. }
        ));
        assert!(rx.try_recv().is_err());
    }
}
