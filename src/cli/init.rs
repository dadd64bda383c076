//! Init command implementation.
//!
//! Writes the built-in theme as a starting `tokenwind.yaml` (or `.json`).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use super::FormatArg;
use crate::discovery::{find_config, CONFIG_FILENAMES, DEFAULT_CONFIG_FILENAME};
use crate::error::{Result, ThemeError};
use crate::output::{display_path, plural, Printer};
use crate::types::{ConfigFormat, ThemeConfig};

/// Create a tokenwind config with the built-in theme
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,

    /// Config file format
    #[arg(long, value_enum, default_value_t = FormatArg::Yaml)]
    pub format: FormatArg,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let format = ConfigFormat::from(args.format);
    let filename = match format {
        ConfigFormat::Yaml => DEFAULT_CONFIG_FILENAME,
        ConfigFormat::Json => "tokenwind.json",
    };
    let config_path = args.path.join(filename);

    if let Some(existing) = find_config(&args.path) {
        if !args.force {
            return Err(ThemeError::Build {
                message: format!("{} already exists", display_path(&existing)),
                help: Some("Use --force to overwrite".to_string()),
            });
        }
        remove_other_configs(&args.path, filename, printer)?;
    }

    if !args.path.exists() {
        fs::create_dir_all(&args.path).map_err(|e| ThemeError::Io {
            path: args.path.clone(),
            message: format!("Failed to create project directory: {}", e),
        })?;
    }

    let config = ThemeConfig::builtin();
    let content = config.serialize(format)?;
    fs::write(&config_path, content).map_err(|e| ThemeError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success(
        "Created",
        &format!(
            "{} ({}, {})",
            display_path(&config_path),
            plural(config.colors().len(), "colour", "colours"),
            plural(config.animations().len(), "animation", "animations")
        ),
    );

    Ok(())
}

/// Remove config files that would be found before `keep`.
fn remove_other_configs(root: &Path, keep: &str, printer: &Printer) -> Result<()> {
    for name in CONFIG_FILENAMES.iter().filter(|name| **name != keep) {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(|e| ThemeError::Io {
            path: path.clone(),
            message: format!("Failed to remove old config: {}", e),
        })?;
        printer.status("Removed", &display_path(&path));
    }
    Ok(())
}
