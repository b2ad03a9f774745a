//! # Group-File Relocation (`common::doxygen::relocate`)
//!
//! File: cli/src/common/doxygen/relocate.rs
//!
//! ## Overview
//!
//! Breathe resolves a group's members relative to a directory named after the
//! group, so a flat Doxygen XML directory has to be reshaped:
//!
//! ```text
//! _build/xml/group__files.xml   ->   _build/xml/group__files/group__files.xml
//! ```
//!
//! ## Behavior
//!
//! 1. List the group files directly inside the base directory (fatal if it is missing).
//! 2. For each distinct group, create `<base>/<group>/`. An existing entry of that
//!    name is reused as-is and never cleared.
//! 3. Move each file into its group directory, keeping the file name.
//!
//! A failure to move one file does not stop the pass. Every candidate gets an
//! outcome in the returned `RelocationReport`; callers decide how to surface
//! failures. When the destination file already exists, `ConflictPolicy` decides.
//!
//! Running the pass again over an already-relocated tree finds no candidates
//! and changes nothing.
//!
use crate::common::doxygen::groups::{scan_group_files, GroupFile};
use crate::common::fs::io;
use crate::core::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do when `<base>/<group>/<file>` already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file with the newly generated one.
    #[default]
    Overwrite,
    /// Leave both files where they are.
    Skip,
    /// Leave both files and report the candidate as failed.
    Error,
}

/// Result of relocating one group file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationOutcome {
    Moved,
    /// Destination existed and the policy was `Skip`.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RelocationEntry {
    pub file: GroupFile,
    pub destination: PathBuf,
    pub outcome: RelocationOutcome,
}

/// Per-file outcomes of one relocation pass.
#[derive(Debug, Default)]
pub struct RelocationReport {
    pub entries: Vec<RelocationEntry>,
    /// Group directories that did not exist before the pass.
    pub created_dirs: Vec<PathBuf>,
}

impl RelocationReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn moved(&self) -> impl Iterator<Item = &RelocationEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == RelocationOutcome::Moved)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &RelocationEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == RelocationOutcome::Skipped)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RelocationEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, RelocationOutcome::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Moves every group file in `base` into its per-group subdirectory.
///
/// # Errors
///
/// Only fatal problems are returned as `Err`: `base` missing, not a directory,
/// or not listable. Per-file problems are recorded in the report.
pub fn relocate_group_files(base: &Path, policy: ConflictPolicy) -> Result<RelocationReport> {
    info!(
        "Relocating group files in {} (on conflict: {:?})",
        base.display(),
        policy
    );
    let candidates = scan_group_files(base)?;
    let mut report = RelocationReport::default();

    // Ensure-step. Errors are remembered per group and reported against each of its files.
    let mut dir_errors: HashMap<String, String> = HashMap::new();
    for file in &candidates {
        let dir = file.destination_dir(base);
        if dir_errors.contains_key(&file.group) || report.created_dirs.contains(&dir) {
            continue;
        }
        match io::create_dir_if_absent(&dir) {
            Ok(true) => report.created_dirs.push(dir),
            Ok(false) => {}
            Err(e) => {
                warn!("Failed to create directory {}: {}", dir.display(), e);
                dir_errors.insert(
                    file.group.clone(),
                    format!("failed to create directory {}: {}", dir.display(), e),
                );
            }
        }
    }

    for file in candidates {
        let destination = file.destination(base);
        let outcome = match dir_errors.get(&file.group) {
            Some(message) => RelocationOutcome::Failed(message.clone()),
            None => move_group_file(&file.source(base), &destination, policy),
        };
        if let RelocationOutcome::Failed(message) = &outcome {
            warn!("Could not relocate {}: {}", file.file_name, message);
        }
        report.entries.push(RelocationEntry {
            file,
            destination,
            outcome,
        });
    }

    info!(
        "Relocation finished: {} moved, {} skipped, {} failed, {} director(ies) created",
        report.moved().count(),
        report.skipped().count(),
        report.failures().count(),
        report.created_dirs.len()
    );
    Ok(report)
}

/// What a pass would do with one group file, decided without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Move,
    /// Destination exists and the policy is `Overwrite`.
    Overwrite,
    Skip,
    Fail(String),
}

#[derive(Debug, Clone)]
pub struct PlannedMove {
    pub file: GroupFile,
    pub destination: PathBuf,
    pub action: PlannedAction,
}

/// Works out what `relocate_group_files` would do for each group file in `base`.
///
/// Uses the same destination checks as the real pass, so the plan predicts
/// skips and failures as well as moves.
///
/// # Errors
///
/// Same fatal conditions as `relocate_group_files`.
pub fn plan_relocation(base: &Path, policy: ConflictPolicy) -> Result<Vec<PlannedMove>> {
    let plan = scan_group_files(base)?
        .into_iter()
        .map(|file| {
            let destination = file.destination(base);
            let action = plan_group_file(&file.destination_dir(base), &destination, policy);
            PlannedMove {
                file,
                destination,
                action,
            }
        })
        .collect();
    Ok(plan)
}

fn plan_group_file(dir: &Path, destination: &Path, policy: ConflictPolicy) -> PlannedAction {
    // The ensure-step leaves a non-directory in place and the rename then fails.
    if fs::symlink_metadata(dir).is_ok() && !dir.is_dir() {
        return PlannedAction::Fail(format!("{} exists and is not a directory", dir.display()));
    }
    destination_conflict(destination, policy).unwrap_or(PlannedAction::Move)
}

/// The policy's verdict when `destination` already exists, `None` when it is free.
fn destination_conflict(destination: &Path, policy: ConflictPolicy) -> Option<PlannedAction> {
    // symlink_metadata so a dangling link at the destination still counts as "exists".
    fs::symlink_metadata(destination).ok()?;
    Some(match policy {
        ConflictPolicy::Overwrite => PlannedAction::Overwrite,
        ConflictPolicy::Skip => PlannedAction::Skip,
        ConflictPolicy::Error => PlannedAction::Fail(format!(
            "destination already exists: {}",
            destination.display()
        )),
    })
}

fn move_group_file(source: &Path, destination: &Path, policy: ConflictPolicy) -> RelocationOutcome {
    match destination_conflict(destination, policy) {
        Some(PlannedAction::Skip) => {
            debug!("Skipping {}: destination exists", source.display());
            return RelocationOutcome::Skipped;
        }
        Some(PlannedAction::Fail(message)) => return RelocationOutcome::Failed(message),
        Some(PlannedAction::Overwrite) => {
            debug!("Overwriting existing {}", destination.display());
        }
        Some(PlannedAction::Move) | None => {}
    }

    match fs::rename(source, destination) {
        Ok(()) => {
            debug!("Moved {} -> {}", source.display(), destination.display());
            RelocationOutcome::Moved
        }
        Err(e) => RelocationOutcome::Failed(format!(
            "failed to move to {}: {}",
            destination.display(),
            e
        )),
    }
}
