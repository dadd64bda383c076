pub mod build;
pub mod completions;
pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::discovery::{resolve_project, Project};
use crate::error::Result;
use crate::types::ConfigFormat;

/// tokenwind - Theme token configs and utility CSS
#[derive(Parser, Debug)]
#[command(name = "tokenwind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only report warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate utility CSS from the theme config
    Build(build::BuildArgs),

    /// Create a tokenwind.yaml with the built-in theme
    Init(init::InitArgs),

    /// Validate the theme config, content patterns and stylesheet
    Validate(validate::ValidateArgs),

    /// List colours, keyframes and animations
    List(list::ListArgs),

    /// Export the config as tailwind.config.js, JSON or YAML
    Export(export::ExportArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Where to find the theme config.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file to use instead of discovering one in PATH
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Use the built-in theme
    #[arg(long, conflicts_with = "config")]
    pub builtin: bool,
}

impl ProjectArgs {
    pub fn resolve(&self) -> Result<Project> {
        resolve_project(&self.path, self.config.as_deref(), self.builtin)
    }
}

/// Config file format for `init`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for ConfigFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => ConfigFormat::Yaml,
            FormatArg::Json => ConfigFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["tokenwind", "build", "web", "-o", "dist/theme.css", "--all"])
            .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.project.path, PathBuf::from("web"));
                assert_eq!(args.output, Some(PathBuf::from("dist/theme.css")));
                assert!(args.all);
                assert!(!args.watch);
            }
            other => panic!("expected build, got {:?}", other),
        }
    }

    #[test]
    fn test_config_conflicts_with_builtin() {
        let result = Cli::try_parse_from(["tokenwind", "validate", "--config", "a.yaml", "--builtin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_quiet() {
        let cli = Cli::try_parse_from(["tokenwind", "list", "--builtin", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
