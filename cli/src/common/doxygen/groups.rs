//! # Doxygen Group Files (`common::doxygen::groups`)
//!
//! File: cli/src/common/doxygen/groups.rs
//!
//! Doxygen writes one `group__<name>.xml` file per `\defgroup`. This module
//! decides which directory entries are group files (a pure name predicate) and
//! lists them from an XML output directory.
//!
use crate::core::error::{DocprepError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const GROUP_FILE_PREFIX: &str = "group__";
pub const GROUP_FILE_SUFFIX: &str = ".xml";

/// Returns true if `name` is a group file name: `group__*.xml`, case-sensitive.
pub fn is_group_file_name(name: &str) -> bool {
    name.starts_with(GROUP_FILE_PREFIX) && name.ends_with(GROUP_FILE_SUFFIX)
}

/// A group XML file found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFile {
    /// File name, e.g. `group__algorithm.xml`.
    pub file_name: String,
    /// File name with `.xml` stripped once, e.g. `group__algorithm`. Also the destination directory name.
    pub group: String,
}

impl GroupFile {
    /// Builds a `GroupFile` from a bare file name, or `None` if it is not a group file.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if !is_group_file_name(name) {
            return None;
        }
        let group = name.strip_suffix(GROUP_FILE_SUFFIX)?;
        Some(Self {
            file_name: name.to_string(),
            group: group.to_string(),
        })
    }

    /// Current location inside the flat output directory.
    pub fn source(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    pub fn destination_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.group)
    }

    /// Final location: `<base>/<group>/<file_name>`.
    pub fn destination(&self, base: &Path) -> PathBuf {
        self.destination_dir(base).join(&self.file_name)
    }
}

/// Lists the group files directly inside `base`.
///
/// Only regular files are selected (symlinks to files count). Subdirectories,
/// non-matching names and names that are not valid UTF-8 are ignored.
/// Results come back in directory enumeration order.
///
/// # Errors
///
/// Fails with `DocprepError::FileSystem` if `base` does not exist or is not a
/// directory, and with an I/O error if it cannot be listed.
pub fn scan_group_files(base: &Path) -> Result<Vec<GroupFile>> {
    if !base.exists() {
        anyhow::bail!(DocprepError::FileSystem(format!(
            "XML output directory not found: {}",
            base.display()
        )));
    }
    if !base.is_dir() {
        anyhow::bail!(DocprepError::FileSystem(format!(
            "XML output path is not a directory: {}",
            base.display()
        )));
    }

    let mut found = Vec::new();
    let mut ignored = 0usize;
    for entry in WalkDir::new(base).min_depth(1).max_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to list directory {}", base.display()))?;
        let selected = entry
            .file_name()
            .to_str()
            .and_then(GroupFile::from_file_name)
            .filter(|_| entry.path().is_file());
        match selected {
            Some(group_file) => found.push(group_file),
            None => ignored += 1,
        }
    }
    debug!(
        "Found {} group file(s) in {} ({} other entries ignored)",
        found.len(),
        base.display(),
        ignored
    );
    Ok(found)
}
