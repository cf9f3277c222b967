//! Error handling module for Vidstamp

use thiserror::Error;

/// Main error type for Vidstamp operations
#[derive(Error, Debug)]
pub enum VidstampError {
    /// Required configuration field missing before a run starts
    #[error("Missing required configuration: {field}")]
    Configuration { field: &'static str },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration file {path}: {message}")]
    ConfigFile { path: String, message: String },

    /// External tool path does not reference an existing file
    #[error("External tool not found: {path}")]
    ToolNotFound { path: String },

    /// External tool exited nonzero (code -1 means terminated by signal)
    #[error("External tool exited with code {code}: {stderr}")]
    ToolInvocation { code: i32, stderr: String },

    /// Source or music directory cannot be listed
    #[error("Cannot list directory {path}: {source}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A single job failed; siblings in the same batch are unaffected
    #[error("Processing {file} failed: {source}")]
    JobFailed {
        file: String,
        #[source]
        source: Box<VidstampError>,
    },

    /// Worker pool could not be started
    #[error("Failed to start worker pool: {message}")]
    WorkerPool { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VidstampError {
    /// Wrap an error as a per-job failure tagged with the source file name
    pub fn for_job(file: impl Into<String>, source: VidstampError) -> Self {
        VidstampError::JobFailed {
            file: file.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for Vidstamp operations
pub type VidstampResult<T> = std::result::Result<T, VidstampError>;
