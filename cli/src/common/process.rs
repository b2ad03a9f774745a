//! # docprep Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Wrappers around `tokio::process::Command` for launching the external tools
//! docprep drives (`doxygen`, `sphinx-build`). Commands are always an explicit
//! program plus argument vector, never a shell string, and their output is
//! captured so it can be logged or attached to an error.
//!
//! ## Architecture
//!
//! - **`run_command_capture`**: runs a command to completion and returns its
//!   status, stdout and stderr. A missing program becomes `DocprepError::ToolNotFound`.
//!   The exit status is *not* interpreted.
//! - **`run_command_checked`**: same, but a non-zero exit becomes
//!   `DocprepError::ExternalCommand` carrying the command line, status and output.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//!
//! let output = process::run_command_checked("doxygen", &["Doxyfile.in".into()], Some(docs_dir)).await?;
//! tracing::debug!("doxygen said: {}", output.stdout);
//! ```
//!
use crate::core::error::{DocprepError, Result};
use anyhow::{anyhow, Context};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished process.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// The most useful text to show for a failure: stderr, else stdout.
    pub fn diagnostic_text(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Renders `program args...` for log and error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command to completion, capturing stdout and stderr.
///
/// # Errors
///
/// - `DocprepError::ToolNotFound` if `program` cannot be found.
/// - Any other spawn or wait failure, with context naming the command.
pub async fn run_command_capture(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<CommandOutput> {
    let cmd_display = display_command(program, args);
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
        debug!("Running '{}' in {}", cmd_display, dir.display());
    } else {
        debug!("Running '{}'", cmd_display);
    }

    let output = match command.output().await {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(anyhow!(DocprepError::ToolNotFound {
                program: program.to_string(),
            }));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to execute '{}'", cmd_display));
        }
    };

    let captured = CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(
        "'{}' finished: status={}, stdout={} bytes, stderr={} bytes",
        cmd_display,
        captured.status,
        captured.stdout.len(),
        captured.stderr.len()
    );
    Ok(captured)
}

/// Runs a command and fails unless it exits successfully.
pub async fn run_command_checked(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<CommandOutput> {
    let output = run_command_capture(program, args, cwd).await?;
    if !output.status.success() {
        return Err(anyhow!(DocprepError::ExternalCommand {
            cmd: display_command(program, args),
            status: output.status.to_string(),
            output: output.diagnostic_text().to_string(),
        }));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_display_command() {
        assert_eq!(
            display_command("doxygen", &["Doxyfile.in".to_string()]),
            "doxygen Doxyfile.in"
        );
        assert_eq!(display_command("doxygen", &[]), "doxygen");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_capture_stdout_and_stderr() -> Result<()> {
        let output = run_command_capture("sh", &sh("echo out; echo err >&2"), None).await?;
        assert!(output.status.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_capture_does_not_interpret_status() -> Result<()> {
        let output = run_command_capture("sh", &sh("exit 4"), None).await?;
        assert_eq!(output.status.code(), Some(4));
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_checked_reports_failure_with_stderr() {
        let result = run_command_checked("sh", &sh("echo 'bad Doxyfile' >&2; exit 3"), None).await;
        let err = result.unwrap_err();
        match err.downcast_ref::<DocprepError>() {
            Some(DocprepError::ExternalCommand { cmd, output, .. }) => {
                assert!(cmd.starts_with("sh -c"));
                assert_eq!(output, "bad Doxyfile");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_checked_runs_in_working_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        run_command_checked("sh", &sh("touch marker"), Some(dir.path())).await?;
        assert!(dir.path().join("marker").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_program_is_tool_not_found() {
        let result = run_command_capture("docprep-nonexistent-tool-12345", &[], None).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocprepError>(),
            Some(DocprepError::ToolNotFound { program }) if program == "docprep-nonexistent-tool-12345"
        ));
    }
}
