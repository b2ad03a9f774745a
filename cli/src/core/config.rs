//! # docprep Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates docprep's configuration.
//! Every setting has a built-in default, so docprep works with no config file
//! at all when run from a directory laid out like a typical Sphinx + Doxygen
//! `docs/` folder (`Doxyfile.in`, `_build/xml`, `source/`).
//!
//! ## Architecture
//!
//! Configuration sources (lowest to highest precedence):
//! 1. Default values defined in the code
//! 2. User-specific `~/.config/docprep/config.toml` (platform config dir)
//! 3. Project-specific `.docprep.toml` in the current directory or an ancestor,
//!    or the file passed via `--config` / `DOCPREP_CONFIG`, which replaces the lookup
//!
//! Files are merged as TOML tables (later sources override individual keys),
//! then deserialized once, so a project file only needs the keys it changes.
//!
//! Relative paths in the configuration are resolved against the *project root*:
//! the directory holding the project config file, or the current directory when
//! there is none. `~` is expanded first.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let xml_dir = cfg.xml_dir();
//! let report = relocate::relocate_group_files(&xml_dir, cfg.output.on_conflict)?;
//! ```
//!
use crate::common::doxygen::relocate::ConflictPolicy;
use crate::common::fs::io;
use crate::core::error::{DocprepError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub doxygen: DoxygenConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sphinx: SphinxConfig,
    /// Directory that relative paths are resolved against. Not read from TOML.
    #[serde(skip)]
    pub root: PathBuf,
}

/// Metadata for the documented project, rendered into `conf.py`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_release")]
    pub release: String,
    /// Full copyright line. Defaults to `<current year>, <author>`.
    pub copyright: Option<String>,
    /// Sphinx HTML theme.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Rendered as `html_theme_options`; omitted from `conf.py` when empty.
    #[serde(default)]
    pub theme_options: toml::Table,
    /// Namespace prefixes stripped from the C++ index (`cpp_index_common_prefix`).
    #[serde(default)]
    pub common_prefixes: Vec<String>,
    /// Sphinx extensions enabled in `conf.py`.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// How the XML generator is launched.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DoxygenConfig {
    #[serde(default = "default_doxygen_program")]
    pub program: String,
    #[serde(default = "default_doxygen_args")]
    pub args: Vec<String>,
    /// Directory the generator runs in (can use ~). Relative to the project root.
    #[serde(default = "default_current_dir")]
    pub working_dir: String,
    /// When false, a failing generator is logged as a warning and the build continues.
    #[serde(default = "default_true")]
    pub fail_on_error: bool,
}

/// Where the generated XML lives and how relocation treats conflicts.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_xml_dir")]
    pub xml_dir: String,
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
}

/// Optional `sphinx-build` step run at the end of `docprep build`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SphinxConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_sphinx_program")]
    pub program: String,
    #[serde(default = "default_sphinx_builder")]
    pub builder: String,
    #[serde(default = "default_sphinx_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_sphinx_build_dir")]
    pub build_dir: String,
}

fn default_project_name() -> String {
    "libutils".to_string()
}
fn default_release() -> String {
    "1.0.0".to_string()
}
fn default_theme() -> String {
    "furo".to_string()
}
fn default_extensions() -> Vec<String> {
    [
        "sphinx.ext.autodoc",
        "sphinx.ext.intersphinx",
        "sphinx.ext.autosectionlabel",
        "sphinx.ext.todo",
        "sphinx.ext.coverage",
        "sphinx.ext.mathjax",
        "sphinx.ext.ifconfig",
        "sphinx.ext.viewcode",
        "sphinx.ext.inheritance_diagram",
        "breathe",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_doxygen_program() -> String {
    "doxygen".to_string()
}
fn default_doxygen_args() -> Vec<String> {
    vec!["Doxyfile.in".to_string()]
}
fn default_current_dir() -> String {
    ".".to_string()
}
fn default_true() -> bool {
    true
}
fn default_xml_dir() -> String {
    "_build/xml".to_string()
}
fn default_sphinx_program() -> String {
    "sphinx-build".to_string()
}
fn default_sphinx_builder() -> String {
    "html".to_string()
}
fn default_sphinx_source_dir() -> String {
    "source".to_string()
}
fn default_sphinx_build_dir() -> String {
    "_build/html".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            author: String::new(),
            release: default_release(),
            copyright: None,
            theme: default_theme(),
            theme_options: toml::Table::new(),
            common_prefixes: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

impl Default for DoxygenConfig {
    fn default() -> Self {
        Self {
            program: default_doxygen_program(),
            args: default_doxygen_args(),
            working_dir: default_current_dir(),
            fail_on_error: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            xml_dir: default_xml_dir(),
            on_conflict: ConflictPolicy::default(),
        }
    }
}

impl Default for SphinxConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: default_sphinx_program(),
            builder: default_sphinx_builder(),
            source_dir: default_sphinx_source_dir(),
            build_dir: default_sphinx_build_dir(),
        }
    }
}

impl Config {
    /// Resolves a configured path against the project root. Absolute paths are returned as-is.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Directory holding the generator's XML output.
    pub fn xml_dir(&self) -> PathBuf {
        self.resolve_path(&self.output.xml_dir)
    }

    pub fn doxygen_working_dir(&self) -> PathBuf {
        self.resolve_path(&self.doxygen.working_dir)
    }

    pub fn sphinx_source_dir(&self) -> PathBuf {
        self.resolve_path(&self.sphinx.source_dir)
    }

    pub fn sphinx_build_dir(&self) -> PathBuf {
        self.resolve_path(&self.sphinx.build_dir)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".docprep.toml";

/// Loads the merged configuration.
///
/// `explicit` replaces the `.docprep.toml` ancestor search when provided; a
/// missing explicit file is an error rather than a silent fallback.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;

    let mut table = load_user_config()?.unwrap_or_default();

    let project_path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(DocprepError::Config(format!(
                    "Configuration file '{}' does not exist.",
                    path.display()
                ))));
            }
            Some(path.to_path_buf())
        }
        None => find_project_config_path(&current_dir),
    };

    let root = match &project_path {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            merge_tables(&mut table, load_table_from_path(path)?);
            // Joining keeps an absolute parent as-is and anchors a relative one at the cwd.
            path.parent()
                .map(|parent| current_dir.join(parent))
                .unwrap_or_else(|| current_dir.clone())
        }
        None => {
            debug!(
                "No project configuration file ({}) found in current directory or ancestors.",
                PROJECT_CONFIG_FILENAME
            );
            current_dir
        }
    };

    let mut config: Config = toml::Value::Table(table)
        .try_into()
        .context("Failed to parse merged configuration")?;
    config.root = root;

    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<toml::Table>> {
    let Some(proj_dirs) = ProjectDirs::from("", "", "docprep") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_table_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

/// Walks up from `start` looking for `.docprep.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_table_from_path(path: &Path) -> Result<toml::Table> {
    let content = io::read_file_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    content
        .parse::<toml::Table>()
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Overlays `overlay` onto `base`. Nested tables merge key by key; any other value replaces.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

fn expand_config_paths(config: &mut Config) {
    for path in [
        &mut config.output.xml_dir,
        &mut config.doxygen.working_dir,
        &mut config.sphinx.source_dir,
        &mut config.sphinx.build_dir,
    ] {
        *path = shellexpand::tilde(path.as_str()).into_owned();
    }
    debug!("Expanded XML directory: {}", config.output.xml_dir);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.project.name.trim().is_empty() {
        return Err(anyhow!(DocprepError::Config(
            "project.name cannot be empty.".to_string()
        )));
    }
    if config.doxygen.program.trim().is_empty() {
        return Err(anyhow!(DocprepError::Config(
            "doxygen.program cannot be empty.".to_string()
        )));
    }
    if config.sphinx.enabled && config.sphinx.program.trim().is_empty() {
        return Err(anyhow!(DocprepError::Config(
            "sphinx.program cannot be empty when sphinx.enabled = true.".to_string()
        )));
    }
    if config.output.xml_dir.trim().is_empty() {
        return Err(anyhow!(DocprepError::Config(
            "output.xml_dir cannot be empty.".to_string()
        )));
    }
    Ok(())
}
