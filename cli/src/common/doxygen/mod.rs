//! # docprep Doxygen Utilities (`common::doxygen`)
//!
//! File: cli/src/common/doxygen/mod.rs
//!
//! ## Overview
//!
//! Everything docprep knows about Doxygen's side of the pipeline:
//!
//! - **`generate`**: runs the XML generator and checks its exit status.
//! - **`groups`**: recognizes `group__*.xml` files and lists them.
//! - **`relocate`**: moves each group file into a directory named after the group,
//!   which is the layout Breathe expects when resolving group cross-references.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::doxygen::{generate, relocate};
//!
//! generate::run_doxygen(&cfg.doxygen, &cfg.doxygen_working_dir()).await?;
//! let report = relocate::relocate_group_files(&cfg.xml_dir(), cfg.output.on_conflict)?;
//! ```
//!

/// Runs doxygen (or a configured stand-in) and interprets its exit status.
pub mod generate;
/// Group file name predicate and directory scan.
pub mod groups;
/// Moves group files into per-group subdirectories.
pub mod relocate;
