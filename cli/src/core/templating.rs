//! # docprep Templating
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders the Sphinx `conf.py` that points Breathe at Doxygen's XML output.
//! The template ships inside the binary (`cli/templates/conf.py.tera`) and is
//! rendered with Tera.
//!
//! Values are turned into Python string literals *before* they reach the
//! template (`py_str`), so the template only places ready-made literals and
//! never has to think about quoting.
//!
//! The XML path written to `breathe_projects` is relative to the directory
//! holding `conf.py`, because Sphinx evaluates `conf.py` from there.
//!
use crate::common::fs::io;
use crate::core::config::Config;
use crate::core::error::{DocprepError, Result};
use anyhow::{anyhow, Context};
use chrono::Datelike;
use serde::Serialize;
use std::path::{Component, Path};
use tera::Tera;
use tracing::{debug, info};

const CONF_PY_TEMPLATE: &str = include_str!("../../templates/conf.py.tera");

/// Template context for `conf.py`. Every string field is already a Python literal.
#[derive(Debug, Serialize)]
pub struct SphinxConfContext {
    pub project: String,
    pub copyright: String,
    pub author: String,
    pub release: String,
    pub theme: String,
    /// Python dict literal, or empty when no options are configured.
    pub theme_options: String,
    pub extensions: Vec<String>,
    pub common_prefixes: Vec<String>,
    pub xml_path: String,
}

impl SphinxConfContext {
    /// Builds the context for a `conf.py` that will live in `conf_dir`.
    pub fn from_config(cfg: &Config, conf_dir: &Path) -> Self {
        let project = &cfg.project;
        let copyright = project.copyright.clone().unwrap_or_else(|| {
            let year = chrono::Local::now().year();
            if project.author.is_empty() {
                year.to_string()
            } else {
                format!("{}, {}", year, project.author)
            }
        });

        Self {
            project: py_str(&project.name),
            copyright: py_str(&copyright),
            author: py_str(&project.author),
            release: py_str(&project.release),
            theme: py_str(&project.theme),
            theme_options: if project.theme_options.is_empty() {
                String::new()
            } else {
                py_table(&project.theme_options, 0)
            },
            extensions: project.extensions.iter().map(|e| py_str(e)).collect(),
            common_prefixes: project.common_prefixes.iter().map(|p| py_str(p)).collect(),
            xml_path: py_str(&breathe_xml_path(&cfg.xml_dir(), conf_dir)),
        }
    }
}

/// Quotes `value` as a single-quoted Python string literal.
fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Converts a TOML value into the equivalent Python literal.
fn py_value(value: &toml::Value, indent: usize) -> String {
    match value {
        toml::Value::String(s) => py_str(s),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => format!("{:?}", f),
        toml::Value::Boolean(true) => "True".to_string(),
        toml::Value::Boolean(false) => "False".to_string(),
        toml::Value::Datetime(d) => py_str(&d.to_string()),
        toml::Value::Array(items) => format!(
            "[{}]",
            items
                .iter()
                .map(|item| py_value(item, indent))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        toml::Value::Table(table) => py_table(table, indent),
    }
}

/// Formats a table as a multi-line Python dict, nested tables indented by four spaces.
fn py_table(table: &toml::Table, indent: usize) -> String {
    if table.is_empty() {
        return "{}".to_string();
    }
    let pad = " ".repeat(indent + 4);
    let mut out = String::from("{\n");
    for (key, value) in table {
        out.push_str(&format!("{}{}: {},\n", pad, py_str(key), py_value(value, indent + 4)));
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out
}

/// Path to `xml_dir` as seen from `conf_dir`, with forward slashes and a trailing `/`.
///
/// Falls back to the absolute path when no relative path exists (e.g. different drives).
fn breathe_xml_path(xml_dir: &Path, conf_dir: &Path) -> String {
    let xml_dir = normalize(xml_dir);
    let conf_dir = normalize(conf_dir);
    let relative = pathdiff::diff_paths(&xml_dir, &conf_dir).unwrap_or(xml_dir);
    let mut path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if path.is_empty() {
        path.push('.');
    }
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// Drops `.` components so `root/./_build/xml` and `root/_build/xml` compare equal.
fn normalize(path: &Path) -> std::path::PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Renders `conf.py` content from a prepared context.
pub fn render_conf_py(context: &SphinxConfContext) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context).map_err(|e| {
        anyhow!(DocprepError::Template { source: e }).context("Failed to build template context")
    })?;
    Tera::one_off(CONF_PY_TEMPLATE, &tera_context, false).map_err(|e| {
        anyhow!(DocprepError::Template { source: e }).context("Tera rendering failed for conf.py")
    })
}

/// Renders `conf.py` for `cfg` and writes it to `target`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_conf_py(cfg: &Config, target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        anyhow::bail!(DocprepError::FileSystem(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }
    let conf_dir = match target.parent().filter(|p| p.is_absolute()) {
        Some(dir) => dir.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            target.parent().map(|p| cwd.join(p)).unwrap_or(cwd)
        }
    };
    let context = SphinxConfContext::from_config(cfg, &conf_dir);
    debug!("conf.py context: {:?}", context);
    let rendered = render_conf_py(&context)?;
    io::write_string_to_file(target, &rendered)?;
    info!("Rendered Sphinx configuration to {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_at(root: &Path) -> Config {
        let mut cfg = Config {
            root: root.to_path_buf(),
            ..Default::default()
        };
        cfg.project.author = "Jane Doe".to_string();
        cfg.project.copyright = Some("2024, Jane Doe".to_string());
        cfg.project.common_prefixes = vec!["libutils::".to_string()];
        cfg
    }

    #[test]
    fn test_py_str_escapes() {
        assert_eq!(py_str("libutils"), "'libutils'");
        assert_eq!(py_str("O'Brien"), "'O\\'Brien'");
        assert_eq!(py_str("C:\\docs"), "'C:\\\\docs'");
        assert_eq!(py_str(""), "''");
    }

    #[test]
    fn test_breathe_xml_path_relative_to_conf_dir() {
        let root = Path::new("/work/docs");
        assert_eq!(
            breathe_xml_path(&root.join("_build/xml"), &root.join("source")),
            "../_build/xml/"
        );
        assert_eq!(
            breathe_xml_path(&root.join("./_build/xml"), &root.join("source")),
            "../_build/xml/"
        );
        assert_eq!(breathe_xml_path(&root.join("xml"), root), "xml/");
        assert_eq!(breathe_xml_path(root, root), "./");
    }

    #[test]
    fn test_render_conf_py_contents() -> Result<()> {
        let root = Path::new("/work/docs");
        let cfg = config_at(root);
        let context = SphinxConfContext::from_config(&cfg, &root.join("source"));

        let rendered = render_conf_py(&context)?;

        assert!(rendered.contains("project = 'libutils'"));
        assert!(rendered.contains("copyright = '2024, Jane Doe'"));
        assert!(rendered.contains("author = 'Jane Doe'"));
        assert!(rendered.contains("release = '1.0.0'"));
        assert!(rendered.contains("    'breathe',\n]"));
        assert!(rendered.contains("extensions = [\n    'sphinx.ext.autodoc',"));
        assert!(rendered.contains("cpp_index_common_prefix = ['libutils::']"));
        assert!(rendered.contains("html_theme = 'furo'\nhtml_title = 'libutils'"));
        assert!(!rendered.contains("html_theme_options"));
        assert!(rendered.contains("'libutils': '../_build/xml/',"));
        assert!(rendered.contains("breathe_default_project = 'libutils'"));
        Ok(())
    }

    #[test]
    fn test_render_theme_options() -> Result<()> {
        let root = Path::new("/work/docs");
        let mut cfg = config_at(root);
        cfg.project.theme_options = r##"
            sidebar_hide_name = true
            top_of_page_buttons = ["view"]

            [dark_css_variables]
            "color-background-hover--transparent" = "#202020"
        "##
        .parse()
        .unwrap();
        let context = SphinxConfContext::from_config(&cfg, &root.join("source"));

        let rendered = render_conf_py(&context)?;

        let expected = "html_theme = 'furo'\n\
            html_theme_options = {\n    \
            'dark_css_variables': {\n        \
            'color-background-hover--transparent': '#202020',\n    \
            },\n    \
            'sidebar_hide_name': True,\n    \
            'top_of_page_buttons': ['view'],\n\
            }\n\
            html_title = 'libutils'";
        assert!(rendered.contains(expected), "unexpected conf.py:\n{rendered}");
        Ok(())
    }

    #[test]
    fn test_py_value_scalars() {
        assert_eq!(py_value(&toml::Value::Integer(3), 0), "3");
        assert_eq!(py_value(&toml::Value::Float(1.0), 0), "1.0");
        assert_eq!(py_value(&toml::Value::Boolean(false), 0), "False");
        assert_eq!(py_table(&toml::Table::new(), 0), "{}");
    }

    #[test]
    fn test_default_copyright_uses_current_year() {
        let mut cfg = config_at(Path::new("/work/docs"));
        cfg.project.copyright = None;
        let context = SphinxConfContext::from_config(&cfg, Path::new("/work/docs/source"));
        let year = chrono::Local::now().year();
        assert_eq!(context.copyright, format!("'{}, Jane Doe'", year));
    }

    #[test]
    fn test_write_conf_py_refuses_overwrite_without_force() -> Result<()> {
        let dir = tempdir()?;
        let cfg = config_at(dir.path());
        let target = dir.path().join("source/conf.py");

        write_conf_py(&cfg, &target, false)?;
        assert!(fs::read_to_string(&target)?.contains("breathe_projects"));

        let second = write_conf_py(&cfg, &target, false);
        assert!(second.unwrap_err().to_string().contains("already exists"));

        fs::write(&target, "# hand edited")?;
        write_conf_py(&cfg, &target, true)?;
        assert!(fs::read_to_string(&target)?.contains("project = 'libutils'"));
        Ok(())
    }
}
