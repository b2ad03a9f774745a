//! # docprep Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout docprep. Domain failures
//! get a dedicated `DocprepError` variant so callers (and tests) can match on
//! them; everything else flows through `anyhow` with context attached at the
//! call site.
//!
//! ## Architecture
//!
//! - `DocprepError`: a `thiserror` enum for specific failure kinds
//! - `Result<T>`: an alias for `anyhow::Result<T>`
//!
//! The variants cover:
//! - Configuration errors
//! - Filesystem errors (missing XML output directory, path is not a directory)
//! - External tool errors (tool missing, non-zero exit)
//! - Relocation summary errors (one or more group files could not be moved)
//! - Template rendering errors
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !xml_dir.is_dir() {
//!     anyhow::bail!(DocprepError::FileSystem(format!("Not a directory: {}", xml_dir.display())));
//! }
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<DocprepError>(), Some(DocprepError::ToolNotFound { .. })) => {
//!         println!("Install doxygen first.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for docprep.
#[derive(Error, Debug)]
pub enum DocprepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Required tool '{program}' was not found. Is it installed and on PATH?")]
    ToolNotFound { program: String },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("{failed} of {total} group file(s) could not be relocated")]
    Relocation { failed: usize, total: usize },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = DocprepError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let not_found = DocprepError::ToolNotFound {
            program: "doxygen".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "Required tool 'doxygen' was not found. Is it installed and on PATH?"
        );

        let relocation = DocprepError::Relocation {
            failed: 2,
            total: 5,
        };
        assert_eq!(
            relocation.to_string(),
            "2 of 5 group file(s) could not be relocated"
        );
    }

    #[test]
    fn test_external_command_includes_output() {
        let err = DocprepError::ExternalCommand {
            cmd: "doxygen Doxyfile.in".into(),
            status: "exit status: 1".into(),
            output: "error: tag file not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("doxygen Doxyfile.in"));
        assert!(msg.contains("exit status: 1"));
        assert!(msg.contains("tag file not found"));
    }
}
