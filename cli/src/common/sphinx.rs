//! # docprep Sphinx Runner (`common::sphinx`)
//!
//! File: cli/src/common/sphinx.rs
//!
//! Runs `sphinx-build -b <builder> <source_dir> <build_dir>` once the XML tree
//! has been relocated. A failing Sphinx build is always an error.
//!
use crate::common::process;
use crate::core::config::Config;
use crate::core::error::{DocprepError, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Argument vector passed to the Sphinx program.
pub fn sphinx_args(cfg: &Config) -> Vec<String> {
    vec![
        "-b".to_string(),
        cfg.sphinx.builder.clone(),
        cfg.sphinx_source_dir().to_string_lossy().into_owned(),
        cfg.sphinx_build_dir().to_string_lossy().into_owned(),
    ]
}

/// Runs the configured Sphinx build and returns the output directory.
pub async fn run_sphinx_build(cfg: &Config) -> Result<PathBuf> {
    let source_dir = cfg.sphinx_source_dir();
    if !source_dir.join("conf.py").is_file() {
        anyhow::bail!(DocprepError::FileSystem(format!(
            "No conf.py in Sphinx source directory {} (run `docprep conf` to create one)",
            source_dir.display()
        )));
    }

    info!(
        "Building {} documentation from {}",
        cfg.sphinx.builder,
        source_dir.display()
    );
    let output =
        process::run_command_checked(&cfg.sphinx.program, &sphinx_args(cfg), Some(&cfg.root))
            .await?;
    for line in output.stdout.lines() {
        debug!("{}: {}", cfg.sphinx.program, line);
    }
    Ok(cfg.sphinx_build_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sphinx_args_resolve_against_root() {
        let root = tempdir().unwrap();
        let cfg = Config {
            root: root.path().to_path_buf(),
            ..Default::default()
        };
        let args = sphinx_args(&cfg);
        assert_eq!(args[0], "-b");
        assert_eq!(args[1], "html");
        assert_eq!(PathBuf::from(&args[2]), root.path().join("source"));
        assert_eq!(PathBuf::from(&args[3]), root.path().join("_build/html"));
    }

    #[tokio::test]
    async fn test_missing_conf_py_is_reported() {
        let root = tempdir().unwrap();
        let cfg = Config {
            root: root.path().to_path_buf(),
            ..Default::default()
        };
        let err = run_sphinx_build(&cfg).await.unwrap_err();
        assert!(err.to_string().contains("No conf.py"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_configured_program() -> Result<()> {
        let root = tempdir()?;
        fs::create_dir(root.path().join("source"))?;
        fs::write(root.path().join("source/conf.py"), "")?;
        let mut cfg = Config {
            root: root.path().to_path_buf(),
            ..Default::default()
        };
        // `true` ignores its arguments and exits 0.
        cfg.sphinx.program = "true".to_string();

        let out_dir = run_sphinx_build(&cfg).await?;
        assert_eq!(out_dir, root.path().join("_build/html"));
        Ok(())
    }
}
