//! # docprep Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Rendering the Sphinx `conf.py`
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{DocprepError, Result};
//! use crate::core::templating;
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
