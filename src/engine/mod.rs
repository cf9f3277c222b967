//! Batch execution engine module
//!
//! The scheduler dispatches jobs onto a bounded worker pool, the executor
//! drives the external tool for one job, and the progress types carry the
//! events the core publishes to its subscribers.

pub mod executor;
pub mod progress;
pub mod scheduler;

pub use executor::{ExecutionReport, ProcessExecutor};
pub use progress::{BatchEvent, BatchOutcome, BatchProgress, BatchState};
pub use scheduler::BatchScheduler;
