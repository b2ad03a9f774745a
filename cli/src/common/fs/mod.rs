//! # docprep Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! Filesystem helpers shared by the commands. Callers import the submodule
//! directly, e.g. `use crate::common::fs::io;`.

/// Basic file I/O operations (`ensure_dir_exists`, `create_dir_if_absent`, `read_file_to_string`, `write_string_to_file`).
pub mod io;
