//! Terminal output formatting for the tokenwind CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs go to stderr;
//! stdout carries only generated output (CSS, exports).

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Diagnostic, Severity, ValidationResult};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal. A quiet printer drops
/// status and info lines but still reports warnings and errors.
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// A printer that only reports problems.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    /// e.g. "    Scanning 12 files"
    pub fn status(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.print_line(GREEN, verb, message);
        }
    }

    /// e.g. "       Wrote dist/theme.css (42 rules)"
    pub fn success(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.print_line(GREEN, verb, message);
        }
    }

    pub fn info(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.print_line(CYAN, verb, message);
        }
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Cyan, for paths.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// Print one diagnostic with its help line.
    pub fn diagnostic(&self, d: &Diagnostic) {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        let label = self.paint(color, &d.severity.to_string());

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}{}: {}", label, self.dim(&format!("[{}]", d.check())), d.message);
        if let Some(help) = &d.help {
            let _ = writeln!(stderr, "  {} {}", self.cyan("help:"), help);
        }
    }

    /// Print every diagnostic, then a one-line summary.
    pub fn diagnostics(&self, result: &ValidationResult) {
        for d in result.iter() {
            self.diagnostic(d);
        }

        let errors = result.error_count();
        let warnings = result.warning_count();
        if errors > 0 {
            self.error(
                "Failed",
                &format!(
                    "{}, {}",
                    plural(errors, "error", "errors"),
                    plural(warnings, "warning", "warnings")
                ),
            );
        } else if warnings > 0 {
            self.warning("Passed", &format!("with {}", plural(warnings, "warning", "warnings")));
        } else {
            self.status("Passed", "no problems found");
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "file", "files")` -> "1 file".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "utility", "utilities"), "1 utility");
        assert_eq!(plural(0, "utility", "utilities"), "0 utilities");
        assert_eq!(plural(14, "colour", "colours"), "14 colours");
    }

    #[test]
    fn test_display_path_absolute() {
        let p = Path::new("/nonexistent/path/to/tokenwind.yaml");
        assert_eq!(display_path(p), "/nonexistent/path/to/tokenwind.yaml");
    }

    #[test]
    fn test_display_path_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(display_path(&cwd), ".");
    }
}
