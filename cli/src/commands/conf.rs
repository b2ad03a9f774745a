//! # docprep Conf Command
//!
//! File: cli/src/commands/conf.rs
//!
//! Implements `docprep conf`, which writes a Sphinx `conf.py` wired to the
//! Doxygen XML directory through Breathe. By default the file goes to
//! `<sphinx.source_dir>/conf.py`; an existing file is kept unless `--force`.
//!
//! ```bash
//! docprep conf
//! docprep conf --output docs/source/conf.py --force
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::templating;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for `docprep conf`.
#[derive(Parser, Debug)]
#[command(about = "Render a Sphinx conf.py that points Breathe at the XML output")]
pub struct ConfArgs {
    /// Where to write the file (defaults to `<sphinx.source_dir>/conf.py`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

pub async fn handle_conf(args: ConfArgs, cfg: &Config) -> Result<()> {
    let target = args
        .output
        .unwrap_or_else(|| cfg.sphinx_source_dir().join("conf.py"));
    templating::write_conf_py(cfg, &target, args.force)?;
    println!("Wrote {}", target.display());
    Ok(())
}
