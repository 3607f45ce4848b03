//! External command execution.

use crate::error::{Result, TkctlError};
use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Convert a non-zero exit into [`TkctlError::CommandFailed`].
    pub fn into_checked(self, command: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(TkctlError::CommandFailed {
                command: command.to_string(),
                code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,
}

/// Render a program and its arguments as a single display string.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute `program` with `args`, capturing stdout and stderr.
///
/// A program that cannot be spawned (e.g. not on PATH) is reported as
/// [`TkctlError::CommandFailed`] with no exit code. A non-zero exit is *not*
/// an error here; inspect [`CommandResult::success`] or call
/// [`CommandResult::into_checked`].
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let rendered = display_command(program, args);
    tracing::debug!("Executing: {}", rendered);

    let mut cmd = Command::new(program);
    cmd.args(args);

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| TkctlError::CommandFailed {
        command: rendered.clone(),
        code: None,
        stderr: e.to_string(),
    })?;

    let duration = start.elapsed();
    let result = CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration,
        success: output.status.success(),
    };

    tracing::debug!(
        "Command '{}' finished in {:?} (exit {:?})",
        rendered,
        duration,
        result.exit_code
    );

    Ok(result)
}

/// Execute a command and fail unless it exits zero.
pub fn execute_checked(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    execute(program, args, options)?.into_checked(&display_command(program, args))
}
