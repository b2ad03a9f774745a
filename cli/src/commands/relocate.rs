//! # docprep Relocate Command
//!
//! File: cli/src/commands/relocate.rs
//!
//! ## Overview
//!
//! Implements `docprep relocate`, which moves Doxygen's `group__*.xml` files
//! into per-group subdirectories so Breathe can resolve group references.
//!
//! ## Workflow
//!
//! 1. Determine the XML directory: the positional `DIR` if given, else `output.xml_dir`.
//! 2. Determine the conflict policy: `--on-conflict` if given, else `output.on_conflict`.
//! 3. With `--dry-run`, print what the pass would do to each file under that policy and stop.
//! 4. Otherwise run the pass, print one line per file, then a summary.
//! 5. If any file failed, list the failures on stderr and exit non-zero.
//!
//! ## Usage
//!
//! ```bash
//! docprep relocate                      # uses output.xml_dir (default _build/xml)
//! docprep relocate ../build/xml --on-conflict skip
//! docprep relocate --dry-run
//! ```
//!
use crate::common::doxygen::relocate::{
    plan_relocation, relocate_group_files, ConflictPolicy, PlannedAction, RelocationOutcome,
    RelocationReport,
};
use crate::core::config::Config;
use crate::core::error::{DocprepError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for `docprep relocate`.
#[derive(Parser, Debug)]
#[command(about = "Move group__*.xml files into per-group subdirectories")]
pub struct RelocateArgs {
    /// XML output directory (defaults to `output.xml_dir` from the configuration).
    pub dir: Option<PathBuf>,

    /// What to do when a group file already exists at its destination.
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Print what would be moved without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle_relocate(args: RelocateArgs, cfg: &Config) -> Result<()> {
    let base = args.dir.unwrap_or_else(|| cfg.xml_dir());
    let policy = args.on_conflict.unwrap_or(cfg.output.on_conflict);

    if args.dry_run {
        return print_plan(&base, policy);
    }
    run_relocation(&base, policy)
}

/// Runs the relocation pass over `base` and turns per-file failures into an error.
///
/// Shared with `docprep build`.
pub fn run_relocation(base: &Path, policy: ConflictPolicy) -> Result<()> {
    let report = relocate_group_files(base, policy)?;
    print_report(base, &report);

    if !report.is_success() {
        for entry in report.failures() {
            if let RelocationOutcome::Failed(message) = &entry.outcome {
                eprintln!("  {}: {}", entry.file.file_name, message);
            }
        }
        anyhow::bail!(DocprepError::Relocation {
            failed: report.failures().count(),
            total: report.total(),
        });
    }
    Ok(())
}

fn print_report(base: &Path, report: &RelocationReport) {
    if report.total() == 0 {
        println!("No group files to relocate in {}", base.display());
        return;
    }
    for entry in &report.entries {
        let label = match entry.outcome {
            RelocationOutcome::Moved => "moved",
            RelocationOutcome::Skipped => "skipped",
            RelocationOutcome::Failed(_) => "failed",
        };
        let destination = entry
            .destination
            .strip_prefix(base)
            .unwrap_or(entry.destination.as_path());
        println!(
            "  {:<8}{} -> {}",
            label,
            entry.file.file_name,
            destination.display()
        );
    }
    println!(
        "Relocated {} of {} group file(s) in {} ({} skipped, {} failed)",
        report.moved().count(),
        report.total(),
        base.display(),
        report.skipped().count(),
        report.failures().count()
    );
}

fn print_plan(base: &Path, policy: ConflictPolicy) -> Result<()> {
    let plan = plan_relocation(base, policy)?;
    info!("Dry run: {} group file(s) in {}", plan.len(), base.display());
    if plan.is_empty() {
        println!("No group files to relocate in {}", base.display());
        return Ok(());
    }
    let mut relocated = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for planned in &plan {
        let (verb, note) = match &planned.action {
            PlannedAction::Move => ("move", None),
            PlannedAction::Overwrite => ("overwrite", None),
            PlannedAction::Skip => ("skip", Some("destination exists")),
            PlannedAction::Fail(message) => ("fail", Some(message.as_str())),
        };
        match planned.action {
            PlannedAction::Move | PlannedAction::Overwrite => relocated += 1,
            PlannedAction::Skip => skipped += 1,
            PlannedAction::Fail(_) => failed += 1,
        }
        let destination = planned
            .destination
            .strip_prefix(base)
            .unwrap_or(planned.destination.as_path());
        match note {
            Some(note) => println!(
                "  would {} {} -> {} ({})",
                verb,
                planned.file.file_name,
                destination.display(),
                note
            ),
            None => println!(
                "  would {} {} -> {}",
                verb,
                planned.file.file_name,
                destination.display()
            ),
        }
    }
    println!(
        "{} of {} group file(s) would be relocated ({} skipped, {} failed, dry run)",
        relocated,
        plan.len(),
        skipped,
        failed
    );
    Ok(())
}
