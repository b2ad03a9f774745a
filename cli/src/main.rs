//! # docprep Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! docprep prepares a C++ project's Doxygen output for a Sphinx + Breathe
//! documentation site. This file handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags
//! - Loading configuration
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Full pipeline from the docs/ directory
//! docprep build
//!
//! # Only reshape an existing XML tree, with debug logging
//! docprep -vv relocate _build/xml
//!
//! # Use an explicit configuration file
//! docprep --config docs/docprep.toml conf --force
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (`RUST_LOG` wins if set)
//! 3. Load and validate configuration
//! 4. Route to the command handler
//! 5. Print any error and exit with status 1
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (build, conf, doxygen, relocate)
mod common; // Shared utilities (doxygen, fs, process, sphinx)
mod core; // Core infrastructure (config, error, templating)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "docprep",
    about = "Prepare Doxygen XML for Sphinx/Breathe documentation builds",
    long_about = "Runs doxygen, moves group__*.xml files into per-group directories so Breathe\n\
                  can resolve cross-references, renders conf.py and optionally runs sphinx-build.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of searching for .docprep.toml.
    #[arg(short, long, global = true, env = "DOCPREP_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "b")]
    Build(commands::build::BuildArgs),
    Conf(commands::conf::ConfArgs),
    Doxygen(commands::doxygen::DoxygenArgs),
    #[command(alias = "r")]
    Relocate(commands::relocate::RelocateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match core::config::load_config(cli.config.as_deref()) {
        Ok(cfg) => match cli.command {
            Commands::Build(args) => commands::build::handle_build(args, &cfg).await,
            Commands::Conf(args) => commands::conf::handle_conf(args, &cfg).await,
            Commands::Doxygen(args) => commands::doxygen::handle_doxygen(args, &cfg).await,
            Commands::Relocate(args) => commands::relocate::handle_relocate(args, &cfg).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
