//! # docprep Build Command
//!
//! File: cli/src/commands/build.rs
//!
//! ## Overview
//!
//! Implements `docprep build`, the full documentation pipeline:
//!
//! 1. Run doxygen (skipped with `--skip-doxygen`). A failing generator stops the
//!    build here unless `doxygen.fail_on_error = false`.
//! 2. Relocate the `group__*.xml` files into per-group directories.
//! 3. Run `sphinx-build` when `sphinx.enabled = true` (skipped with `--no-sphinx`).
//!
//! Each step only starts after the previous one finished successfully.
//!
//! ```bash
//! docprep build
//! docprep -v build --skip-doxygen --on-conflict error
//! ```
//!
use crate::commands::doxygen::{self, DoxygenArgs};
use crate::commands::relocate::run_relocation;
use crate::common::doxygen::relocate::ConflictPolicy;
use crate::common::sphinx;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `docprep build`.
#[derive(Parser, Debug)]
#[command(about = "Run doxygen, relocate group files, then optionally sphinx-build")]
pub struct BuildArgs {
    /// Reuse the existing XML output instead of running doxygen.
    #[arg(long)]
    pub skip_doxygen: bool,

    /// Do not run sphinx-build even if enabled in the configuration.
    #[arg(long)]
    pub no_sphinx: bool,

    /// Doxyfile to pass instead of the configured `doxygen.args`.
    #[arg(long)]
    pub doxyfile: Option<PathBuf>,

    /// What to do when a group file already exists at its destination.
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,
}

pub async fn handle_build(args: BuildArgs, cfg: &Config) -> Result<()> {
    if args.skip_doxygen {
        info!("Skipping doxygen (--skip-doxygen)");
    } else {
        let doxygen_args = DoxygenArgs {
            doxyfile: args.doxyfile.clone(),
        };
        doxygen::generate(&doxygen_args, cfg).await?;
    }

    let policy = args.on_conflict.unwrap_or(cfg.output.on_conflict);
    run_relocation(&cfg.xml_dir(), policy)?;

    if cfg.sphinx.enabled && !args.no_sphinx {
        let out_dir = sphinx::run_sphinx_build(cfg).await?;
        println!("Documentation built in {}", out_dir.display());
    } else {
        info!("Sphinx step not enabled; stopping after relocation");
    }
    Ok(())
}
