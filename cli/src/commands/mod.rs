//! # docprep Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level subcommand. Each defines a Clap `*Args` struct and
//! an async `handle_*` function taking the parsed args and the loaded
//! configuration. `main.rs` routes to them.
//!
//! - `build`: doxygen → relocate → optional sphinx-build
//! - `conf`: render the Sphinx `conf.py`
//! - `doxygen`: run the XML generator only
//! - `relocate`: move group files into per-group directories
//!

/// Full pipeline: generate, relocate, optionally build HTML.
pub mod build;
/// Renders `conf.py`.
pub mod conf;
/// Runs the XML generator.
pub mod doxygen;
/// Group-file relocation.
pub mod relocate;
