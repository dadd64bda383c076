use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tokenwind operations
#[derive(Error, Diagnostic, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tokenwind::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tokenwind::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tokenwind::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(tokenwind::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(tokenwind::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, ThemeError>;
