//! Validation system for theme configs.
//!
//! Runs a suite of checks against a config and reports errors and warnings.
//! Config-only checks need nothing but the parsed config; project checks
//! also look at the scanned content files and, when one is given, the
//! stylesheet that defines the custom properties. Used by both
//! `tokenwind validate` and `tokenwind build`; `Printer::diagnostics`
//! reports the result.

mod checks;
mod warning;

pub use checks::MIN_CONTRAST;
pub use warning::{Diagnostic, Severity, ValidationResult, CODE_PREFIX};

use crate::discovery::ContentScan;
use crate::error::Result;
use crate::parser::Stylesheet;
use crate::types::ThemeConfig;

/// Inputs beyond the config that project checks use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectContext<'a> {
    pub scan: Option<&'a ContentScan>,
    pub stylesheet: Option<&'a Stylesheet>,
}

/// Run all config-only checks.
pub fn validate_config(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_content(config));
    result.merge(checks::check_animation_refs(config));
    result.merge(checks::check_keyframes(config));
    result.merge(checks::check_color_pairs(config));
    result.merge(checks::check_literal_colors(config));
    result.merge(checks::check_unused_keyframes(config));
    result.merge(checks::check_plugins(config));

    result
}

/// Run config checks plus whatever project checks the context allows.
pub fn validate_project(config: &ThemeConfig, context: &ProjectContext<'_>) -> ValidationResult {
    let mut result = validate_config(config);

    if let Some(scan) = context.scan {
        result.merge(checks::check_content_matches(scan));
    }
    if let Some(stylesheet) = context.stylesheet {
        result.merge(checks::check_defined_vars(config, stylesheet));
        result.merge(checks::check_contrast(config, stylesheet));
    }

    result
}

impl ThemeConfig {
    /// Return the config if config-only validation reports no errors.
    pub fn validated(self) -> Result<Self> {
        validate_config(&self).into_result()?;
        Ok(self)
    }
}
