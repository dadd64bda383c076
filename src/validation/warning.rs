//! Diagnostic types for validation results.

use std::fmt;

use crate::error::ThemeError;

/// Prefix for all validation diagnostic codes.
pub const CODE_PREFIX: &str = "tokenwind::validate::";

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Full code, e.g. "tokenwind::validate::missing-keyframe".
    pub code: String,
    pub message: String,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic. `check` is the short check name.
    pub fn error(check: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, check, message)
    }

    /// Create a warning diagnostic. `check` is the short check name.
    pub fn warning(check: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, check, message)
    }

    fn new(severity: Severity, check: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: format!("{}{}", CODE_PREFIX, check),
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The short check name (code without the prefix).
    pub fn check(&self) -> &str {
        self.code.strip_prefix(CODE_PREFIX).unwrap_or(&self.code)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.check(), self.message)
    }
}

/// Collects diagnostics from validation checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| !d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_error()).count()
    }

    /// Check if there are no diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics produced by one check.
    pub fn by_check<'a>(&'a self, check: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.check() == check)
    }

    /// Turn a result with errors into a `ThemeError::Validation`.
    pub fn into_result(self) -> crate::error::Result<Self> {
        let errors = self.error_count();
        if errors == 0 {
            return Ok(self);
        }

        let first = self
            .diagnostics
            .iter()
            .find(|d| d.is_error())
            .map(|d| d.message.clone())
            .unwrap_or_default();
        Err(ThemeError::Validation {
            message: if errors == 1 {
                first
            } else {
                format!("{} (and {} more error(s))", first, errors - 1)
            },
            help: Some("Run `tokenwind validate` for the full report".to_string()),
        })
    }
}
