//! Process execution for built command lines.
//!
//! Runs the rendered command string through the shell, since option
//! tokens may carry shell quoting (`-var 'key=value'`). A non-zero exit
//! status is data on the outcome; only failures to launch at all are
//! errors.

use crate::command::CommandLine;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Exit codes the shell uses for "found but not executable" and
/// "command not found". Both mean the run never started.
const SHELL_NOT_EXECUTABLE: i32 = 126;
const SHELL_NOT_FOUND: i32 = 127;

/// Settings for a single execution.
#[derive(Debug, Clone, Default)]
pub struct ExecConfig {
    /// Working directory for the child (inherited when `None`)
    pub cwd: Option<PathBuf>,
    /// Suppress passthrough of the child's output to the terminal
    pub silent: bool,
    /// Spawn and return immediately with a pending outcome
    pub detach: bool,
}

/// The outcome of one execution.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    /// Exit status; `None` for detached runs that have not produced one
    pub code: Option<i32>,
    /// Captured standard output (empty for detached runs)
    pub stdout: String,
    /// Captured standard error (empty for detached runs)
    pub stderr: String,
    /// The exact command string that was run
    pub command: String,
}

impl ExecOutcome {
    /// Whether the run exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Whether this is a placeholder for a detached run.
    pub fn is_pending(&self) -> bool {
        self.code.is_none()
    }
}

/// Execute a built command line.
///
/// Synchronous by default: blocks until the child exits and returns the
/// captured output. With `detach` the child is spawned fire-and-forget
/// and a pending outcome comes back immediately.
pub fn execute(command: &CommandLine, config: &ExecConfig) -> Result<ExecOutcome> {
    let rendered = command.rendered();

    let mut child = Command::new("sh");
    child.arg("-c").arg(&rendered);
    if let Some(cwd) = &config.cwd {
        child.current_dir(cwd);
    }

    if config.detach {
        child
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Launch {
                message: format!("{rendered}: {e}"),
            })?;

        return Ok(ExecOutcome {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
            command: rendered,
        });
    }

    let output = child.output().map_err(|e| Error::Launch {
        message: format!("{rendered}: {e}"),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !config.silent {
        print!("{stdout}");
        eprint!("{stderr}");
    }

    // The shell reports a command it could not start via its exit code.
    if matches!(
        output.status.code(),
        Some(SHELL_NOT_EXECUTABLE) | Some(SHELL_NOT_FOUND)
    ) {
        return Err(Error::Launch {
            message: format!("{rendered}: {}", stderr.trim()),
        });
    }

    Ok(ExecOutcome {
        code: output.status.code(),
        stdout,
        stderr,
        command: rendered,
    })
}
