//! # Doxygen XML Generation (`common::doxygen::generate`)
//!
//! File: cli/src/common/doxygen/generate.rs
//!
//! Launches the configured generator (normally `doxygen Doxyfile.in`) and checks
//! how it exited. Doxygen reports documentation problems as `warning:` lines on
//! stderr; those are logged but do not fail the run.
//!
use crate::common::process::{self, display_command};
use crate::core::config::DoxygenConfig;
use crate::core::error::{DocprepError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// What happened when the generator ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Exited successfully; `warnings` counts `warning:` lines on stderr.
    Succeeded { warnings: usize },
    /// Exited non-zero but `fail_on_error = false`, so the failure was tolerated.
    FailedTolerated { status: String },
}

/// Runs the XML generator described by `cfg` inside `working_dir`.
///
/// # Errors
///
/// - `DocprepError::FileSystem` if `working_dir` is not a directory.
/// - `DocprepError::ToolNotFound` if the program is not installed.
/// - `DocprepError::ExternalCommand` on a non-zero exit, unless `cfg.fail_on_error` is false.
pub async fn run_doxygen(cfg: &DoxygenConfig, working_dir: &Path) -> Result<GenerationOutcome> {
    if !working_dir.is_dir() {
        anyhow::bail!(DocprepError::FileSystem(format!(
            "Doxygen working directory not found: {}",
            working_dir.display()
        )));
    }
    let cmd_display = display_command(&cfg.program, &cfg.args);
    info!("Running '{}' in {}", cmd_display, working_dir.display());

    let output = process::run_command_capture(&cfg.program, &cfg.args, Some(working_dir)).await?;

    let warnings = count_warnings(&output.stderr);
    for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
        debug!("{}: {}", cfg.program, line);
    }

    if output.status.success() {
        info!("'{}' finished with {} warning(s)", cmd_display, warnings);
        return Ok(GenerationOutcome::Succeeded { warnings });
    }

    let status = output.status.to_string();
    if cfg.fail_on_error {
        return Err(anyhow::anyhow!(DocprepError::ExternalCommand {
            cmd: cmd_display,
            status,
            output: output.diagnostic_text().to_string(),
        }));
    }
    warn!(
        "'{}' failed ({}); continuing because doxygen.fail_on_error = false",
        cmd_display, status
    );
    Ok(GenerationOutcome::FailedTolerated { status })
}

fn count_warnings(stderr: &str) -> usize {
    stderr
        .lines()
        .filter(|line| line.contains("warning:"))
        .count()
}
