//! # docprep Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach context to errors and log what
//! they did. Used by configuration loading, `conf.py` rendering and the
//! group-file relocation pass.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, but fails if the path exists and is not a directory.
//! - **`create_dir_if_absent`**: single-level `mkdir` that treats "already exists" (directory
//!   *or* file) as a no-op. This is the relocation ensure-step; a conflicting file surfaces
//!   later as a move failure instead.
//! - **`read_file_to_string`**: `fs::read_to_string` with context.
//! - **`write_string_to_file`**: creates parent directories, then writes (overwriting).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let created = io::create_dir_if_absent(&xml_dir.join("group__core"))?;
//! io::write_string_to_file(&source_dir.join("conf.py"), &rendered)?;
//! ```
//!
use crate::core::error::{DocprepError, Result};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates the directory and any missing parents. If the path exists but is
/// not a directory, a `DocprepError::FileSystem` is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(DocprepError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Creates a single directory, treating an existing entry of the same name as success.
///
/// Returns `Ok(true)` when the directory was created and `Ok(false)` when
/// something already existed at `path`. The existing entry is left untouched,
/// even if it is a regular file.
pub fn create_dir_if_absent(path: &Path) -> std::io::Result<bool> {
    match fs::create_dir(path) {
        Ok(()) => {
            debug!("Created directory: {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Directory already exists: {:?}", path);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` naming the file if it cannot be opened or read.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, overwriting it if it exists.
///
/// The parent directory is created first when missing.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Test `ensure_dir_exists` when the directory needs to be created, including parents.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the target path exists but is a file.
    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_create_dir_if_absent_creates_then_reuses() -> Result<()> {
        let base_dir = tempdir()?;
        let dir = base_dir.path().join("group__core");
        assert!(create_dir_if_absent(&dir)?);
        fs::write(dir.join("notes.txt"), "keep me")?;

        assert!(!create_dir_if_absent(&dir)?);
        assert_eq!(fs::read_to_string(dir.join("notes.txt"))?, "keep me");
        Ok(())
    }

    /// A file occupying the name is left alone and not reported as an error.
    #[test]
    fn test_create_dir_if_absent_existing_file_is_noop() -> Result<()> {
        let base_dir = tempdir()?;
        let path = base_dir.path().join("group__core");
        fs::write(&path, "not a directory")?;

        assert!(!create_dir_if_absent(&path)?);
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn test_create_dir_if_absent_missing_parent_fails() -> Result<()> {
        let base_dir = tempdir()?;
        let path = base_dir.path().join("missing/group__core");
        assert!(create_dir_if_absent(&path).is_err());
        Ok(())
    }

    /// Test both writing to and reading from a file using the utility functions.
    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("source/conf.py");
        let content = "project = 'libutils'\n";
        write_string_to_file(&file_path, content)?;
        assert!(file_path.exists());
        assert_eq!(read_file_to_string(&file_path)?, content);
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let result = read_file_to_string(&base_dir.path().join("nonexistent.txt"));
        assert!(result.is_err());
        Ok(())
    }
}
