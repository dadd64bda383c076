//! Config discovery and content scanning for tokenwind projects.
//!
//! A project is a directory holding a `tokenwind.yaml` (or `.yml`/`.json`)
//! config. The config's content patterns are resolved relative to that
//! directory.
//!
//! # Example
//!
//! ```ignore
//! use tokenwind::discovery::discover;
//!
//! let project = discover("./my-app")?;
//! let scan = project.scan_content()?;
//! println!("Found {} content files", scan.total());
//! ```

mod glob;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};
use crate::types::ThemeConfig;

pub use glob::GlobPattern;
pub use scanner::{compile_patterns, is_content_path, scan_content, ContentScan, PatternMatches};

/// Config file names, in lookup order.
pub const CONFIG_FILENAMES: &[&str] = &["tokenwind.yaml", "tokenwind.yml", "tokenwind.json"];

/// The default config file name written by `init`.
pub const DEFAULT_CONFIG_FILENAME: &str = "tokenwind.yaml";

/// Where the config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

/// A loaded project.
#[derive(Debug)]
pub struct Project {
    /// Directory that content patterns are relative to.
    pub root: PathBuf,

    pub source: ConfigSource,

    pub config: ThemeConfig,
}

impl Project {
    /// Scan the project for content files.
    pub fn scan_content(&self) -> Result<ContentScan> {
        scan_content(&self.root, &self.config.content)
    }

    /// Path of the config file, if loaded from disk.
    pub fn config_path(&self) -> Option<&Path> {
        match &self.source {
            ConfigSource::File(path) => Some(path),
            ConfigSource::Builtin => None,
        }
    }
}

/// Find the config file in a directory.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Discover and load the project config in `root`.
pub fn discover(root: impl AsRef<Path>) -> Result<Project> {
    let root = root.as_ref().to_path_buf();
    let path = find_config(&root).ok_or_else(|| ThemeError::Io {
        path: root.clone(),
        message: format!("No config found (looked for {})", CONFIG_FILENAMES.join(", ")),
    })?;

    Ok(Project {
        config: ThemeConfig::load(&path)?,
        source: ConfigSource::File(path),
        root,
    })
}

/// Load a project from an explicit config file. Content patterns resolve
/// relative to the file's directory.
pub fn load_project(config_path: &Path) -> Result<Project> {
    let config = ThemeConfig::load(config_path)?;
    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(Project {
        root,
        source: ConfigSource::File(config_path.to_path_buf()),
        config,
    })
}

/// A project using the builtin theme, rooted at `root`.
pub fn builtin_project(root: impl AsRef<Path>) -> Project {
    Project {
        root: root.as_ref().to_path_buf(),
        source: ConfigSource::Builtin,
        config: ThemeConfig::builtin(),
    }
}

/// Resolve the project the way the CLI does: explicit config file first,
/// then the builtin theme if requested, then discovery in `root`.
pub fn resolve_project(root: &Path, config: Option<&Path>, builtin: bool) -> Result<Project> {
    match (config, builtin) {
        (Some(_), true) => Err(ThemeError::Build {
            message: "--config and --builtin cannot be used together".to_string(),
            help: None,
        }),
        (Some(path), false) => load_project(path),
        (None, true) => Ok(builtin_project(root)),
        (None, false) => {
            if find_config(root).is_none() {
                return Err(ThemeError::Build {
                    message: format!("No tokenwind config in {}", root.display()),
                    help: Some("Run `tokenwind init` or pass --builtin".to_string()),
                });
            }
            discover(root)
        }
    }
}
