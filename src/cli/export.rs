//! Export command implementation.
//!
//! Writes the resolved config as `tailwind.config.js`, JSON or YAML.

use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::ProjectArgs;
use crate::error::{Result, ThemeError};
use crate::output::{display_path, Printer};
use crate::render::render_tailwind_config;
use crate::types::ThemeConfig;

/// Export format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// CommonJS tailwind.config.js
    Js,
    Json,
    Yaml,
}

/// Export the config as tailwind.config.js, JSON or YAML
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = ExportFormat::Js)]
    pub format: ExportFormat,

    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve()?;
    let content = export(&project.config, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &content).map_err(|e| ThemeError::Io {
                path: path.clone(),
                message: format!("Failed to write export: {}", e),
            })?;
            printer.success("Exported", &display_path(path));
        }
        None => print!("{}", content),
    }

    Ok(())
}

/// Serialize the config in the requested format.
pub fn export(config: &ThemeConfig, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Js => render_tailwind_config(config),
        ExportFormat::Json => config.to_json().map(|json| json + "\n"),
        ExportFormat::Yaml => config.to_yaml(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_formats() {
        let config = ThemeConfig::builtin();

        let js = export(&config, ExportFormat::Js).unwrap();
        assert!(js.contains("module.exports = {"));

        let json = export(&config, ExportFormat::Json).unwrap();
        assert_eq!(ThemeConfig::parse_json(&json).unwrap(), config);

        let yaml = export(&config, ExportFormat::Yaml).unwrap();
        assert_eq!(ThemeConfig::parse_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("tailwind.config.js");
        let args = ExportArgs {
            project: ProjectArgs {
                path: dir.path().to_path_buf(),
                config: None,
                builtin: true,
            },
            format: ExportFormat::Js,
            output: Some(output.clone()),
        };

        run(args, &Printer::quiet()).unwrap();
        let js = fs::read_to_string(&output).unwrap();
        assert!(js.contains(r#"darkMode: "class","#));
    }
}
