//! Progress tracking and batch lifecycle events
//!
//! The core publishes plain events over a channel; it knows nothing about any
//! presentation layer. Subscribers (CLI progress bar, a GUI, tests) marshal
//! them as needed.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Batch lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No run started yet
    Idle,
    /// Jobs are being processed
    Running,
    /// All submitted jobs finished (or there were none)
    Completed,
    /// Terminal: a pre-flight check failed, nothing was scheduled
    ConfigurationError,
}

/// Events published by a running batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// One more job finished, successfully or not
    Progress { processed: usize, total: usize },
    /// Fires exactly once, strictly after every submitted task finished
    Completed { outcome: BatchOutcome },
}

/// Aggregate result of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Number of jobs submitted
    pub total: usize,
    /// Jobs that produced an output without error
    pub succeeded: usize,
    /// Jobs that failed at any stage
    pub failed: usize,
}

/// Thread-safe processed-job counter shared by all worker tasks.
///
/// `record_one` is the only mutation; the count never exceeds the total fixed
/// at batch start.
#[derive(Debug)]
pub struct BatchProgress {
    processed: AtomicUsize,
    total: usize,
}

impl BatchProgress {
    /// Create a counter for a batch of `total` jobs
    pub fn new(total: usize) -> Self {
        Self {
            processed: AtomicUsize::new(0),
            total,
        }
    }

    /// Atomically count one finished job and return the new processed count
    pub fn record_one(&self) -> usize {
        let processed = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        debug_assert!(processed <= self.total);
        processed
    }

    /// Jobs processed so far
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    /// Jobs submitted at batch start
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_one_is_monotonic() {
        let progress = BatchProgress::new(3);
        assert_eq!(progress.processed(), 0);
        assert_eq!(progress.record_one(), 1);
        assert_eq!(progress.record_one(), 2);
        assert_eq!(progress.record_one(), 3);
        assert_eq!(progress.processed(), progress.total());
    }

    #[test]
    fn test_concurrent_increments_count_every_job() {
        let progress = std::sync::Arc::new(BatchProgress::new(64));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let progress = progress.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..8 {
                    progress.record_one();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.processed(), 64);
    }
}
