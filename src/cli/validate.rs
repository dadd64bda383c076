//! Validate command implementation.
//!
//! Checks the config on its own, then against the project: content
//! patterns must match files and, with `--stylesheet`, every referenced
//! custom property must be defined.

use std::path::PathBuf;

use clap::Args;

use super::ProjectArgs;
use crate::discovery::{ContentScan, Project};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::parser::Stylesheet;
use crate::validation::{validate_project, ProjectContext, ValidationResult};

/// Validate the theme config, content patterns and stylesheet
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Stylesheet that defines the custom properties
    #[arg(long, short)]
    pub stylesheet: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve()?;
    let result = check_project(&project, args.stylesheet.as_deref(), printer)?;
    printer.diagnostics(&result);
    result.into_result().map(|_| ())
}

/// Run every check that applies to the project.
pub fn check_project(
    project: &Project,
    stylesheet: Option<&std::path::Path>,
    printer: &Printer,
) -> Result<ValidationResult> {
    let config = &project.config;
    let label = project
        .config_path()
        .map(display_path)
        .unwrap_or_else(|| "built-in theme".to_string());
    printer.status(
        "Checking",
        &format!(
            "{} ({}, {}, {})",
            label,
            plural(config.colors().len(), "colour", "colours"),
            plural(config.keyframes().len(), "keyframe", "keyframes"),
            plural(config.animations().len(), "animation", "animations")
        ),
    );

    // Invalid patterns are reported by the config checks
    let scan: Option<ContentScan> = project.scan_content().ok();
    if let Some(scan) = &scan {
        printer.status(
            "Scanned",
            &format!(
                "{} ({})",
                display_path(&project.root),
                plural(scan.total(), "content file", "content files")
            ),
        );
    }

    let sheet = match stylesheet {
        Some(path) => {
            let sheet = Stylesheet::load(path, &config.dark_mode)?;
            printer.status(
                "Read",
                &format!(
                    "{} ({})",
                    display_path(path),
                    plural(sheet.definitions().len(), "custom property", "custom properties")
                ),
            );
            Some(sheet)
        }
        None => None,
    };

    let context = ProjectContext {
        scan: scan.as_ref(),
        stylesheet: sheet.as_ref(),
    };
    Ok(validate_project(config, &context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::builtin_project;
    use std::fs;
    use tempfile::tempdir;

    fn project_args(path: PathBuf) -> ProjectArgs {
        ProjectArgs {
            path,
            config: None,
            builtin: false,
        }
    }

    #[test]
    fn test_validate_valid_project() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), r#"view! { <div class="bg-surface"/> }"#).unwrap();
        fs::write(
            dir.path().join("tokenwind.yaml"),
            "content: [\"./src/**/*.rs\"]\ndarkMode: class\n",
        )
        .unwrap();

        let args = ValidateArgs {
            project: project_args(dir.path().to_path_buf()),
            stylesheet: None,
        };
        assert!(run(args, &Printer::quiet()).is_ok());
    }

    #[test]
    fn test_validate_reports_errors() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tokenwind.yaml"),
            "content: [\"./src/**/*.rs\"]\ntheme:\n  extend:\n    animation:\n      wiggle: \"wiggle 1s\"\n",
        )
        .unwrap();

        let args = ValidateArgs {
            project: project_args(dir.path().to_path_buf()),
            stylesheet: None,
        };
        assert!(run(args, &Printer::quiet()).is_err());
    }

    #[test]
    fn test_check_project_with_stylesheet() {
        let dir = tempdir().unwrap();
        let css = dir.path().join("theme.css");
        fs::write(&css, ":root { --surface: 0 0% 100%; --surface-on: 0 0% 0%; }").unwrap();

        let project = builtin_project(dir.path());
        let result = check_project(&project, Some(&css), &Printer::quiet()).unwrap();

        assert_eq!(result.by_check("unmatched-content").count(), 1);
        assert_eq!(result.by_check("undefined-var").count(), 12);
        assert!(result.by_check("low-contrast").next().is_none());
    }

    #[test]
    fn test_missing_stylesheet_is_an_error() {
        let dir = tempdir().unwrap();
        let project = builtin_project(dir.path());
        let missing = dir.path().join("missing.css");
        assert!(check_project(&project, Some(&missing), &Printer::quiet()).is_err());
    }
}
