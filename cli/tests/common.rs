//! # docprep CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Each test gets its own
//! temporary project directory; the helpers point the `docprep` binary at it
//! and isolate it from any user configuration on the machine running the tests.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// # Get docprep Command (`docprep_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `docprep` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn docprep_cmd() -> Command {
    Command::cargo_bin("docprep").expect("Failed to find docprep binary for testing")
}

/// `docprep` running inside `project`, with user config lookups redirected into it.
pub fn docprep_in(project: &Path) -> Command {
    let mut cmd = docprep_cmd();
    cmd.current_dir(project)
        .env("XDG_CONFIG_HOME", project.join(".xdg"))
        .env("HOME", project)
        .env_remove("DOCPREP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `.docprep.toml` into `project` and returns its path.
pub fn write_project_config(project: &Path, content: &str) -> std::path::PathBuf {
    let path = project.join(".docprep.toml");
    fs::write(&path, content).expect("Failed to write .docprep.toml");
    path
}

/// Creates `<project>/_build/xml` containing empty files with the given names.
pub fn seed_xml_dir(project: &Path, names: &[&str]) -> std::path::PathBuf {
    let xml = project.join("_build/xml");
    fs::create_dir_all(&xml).expect("Failed to create XML dir");
    for name in names {
        fs::write(xml.join(name), name).expect("Failed to write XML file");
    }
    xml
}
