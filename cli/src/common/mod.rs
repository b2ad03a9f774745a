//! # docprep Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks the commands are assembled from. Command handlers in
//! `commands::` decide *what* to do and print results; the modules here do the
//! work and report back through return values and `tracing`.
//!
//! - **`doxygen`**: running the XML generator, finding group files, relocating them.
//! - **`fs`**: filesystem helpers (`ensure_dir_exists`, `create_dir_if_absent`, ...).
//! - **`process`**: launching external programs with captured output and checked status.
//! - **`sphinx`**: running `sphinx-build`.
//!
//! ```rust
//! use crate::common::{doxygen::relocate, fs::io, process};
//! ```
//!

/// Doxygen XML generation and group-file relocation.
pub mod doxygen;
/// Filesystem helpers.
pub mod fs;
/// External process execution.
pub mod process;
/// Sphinx build invocation.
pub mod sphinx;
