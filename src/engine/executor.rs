//! External tool invocation for one job

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{VidstampError, VidstampResult};
use crate::planner::CommandPlan;

/// Runs the external codec tool for single jobs and captures diagnostics.
///
/// Never panics past its boundary: spawn failures are errors, but a nonzero
/// exit is a normal, representable outcome inspected by the caller.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    tool_path: PathBuf,
}

/// Outcome of one tool invocation
#[derive(Debug)]
pub struct ExecutionReport {
    /// Exit code; -1 when the process was terminated by a signal
    pub code: i32,
    /// Full captured standard error
    pub stderr: String,
}

impl ExecutionReport {
    /// Whether the tool exited cleanly
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Convert a failed invocation into its error value
    pub fn into_error(self) -> VidstampError {
        VidstampError::ToolInvocation {
            code: self.code,
            stderr: self.stderr,
        }
    }
}

impl ProcessExecutor {
    /// Create an executor for the given tool path
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }

    /// The configured tool path
    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    /// Fail fast when an explicit tool path names a nonexistent file.
    ///
    /// Checked before a worker slot is consumed so a guaranteed failure does
    /// not burn pool capacity. A bare program name carries no directory and
    /// is left to the OS lookup; a missing binary then surfaces as a spawn
    /// error instead.
    pub fn check_tool(&self) -> VidstampResult<()> {
        let has_directory = self
            .tool_path
            .parent()
            .map(|p| !p.as_os_str().is_empty())
            .unwrap_or(false);
        if has_directory && !self.tool_path.is_file() {
            return Err(VidstampError::ToolNotFound {
                path: self.tool_path.display().to_string(),
            });
        }
        Ok(())
    }

    /// Launch the tool with the planned arguments and wait for it to exit.
    ///
    /// Standard error is captured in full; standard output is discarded. On
    /// Windows no console window is opened for the child.
    pub fn execute(&self, plan: &CommandPlan) -> VidstampResult<ExecutionReport> {
        self.check_tool()?;

        let mut command = Command::new(&self.tool_path);
        command
            .args(&plan.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        debug!("invoking {} with {} args", self.tool_path.display(), plan.args.len());
        let output = command.output()?;
        Ok(ExecutionReport {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Probe the tool by asking it for its version.
    ///
    /// Used by configuration validation to catch a present-but-broken binary
    /// before a batch starts.
    pub fn probe(&self) -> VidstampResult<()> {
        self.check_tool()?;

        let mut command = Command::new(&self.tool_path);
        command
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let output = command.output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(VidstampError::ToolInvocation {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
