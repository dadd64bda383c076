//! Class-name candidate extraction from content files.
//!
//! Extraction is deliberately loose: any run of class-name characters is a
//! candidate. Rendering only keeps candidates that name a real utility.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Result, ThemeError};

/// Characters that may appear in a utility class name, including a
/// variant prefix (`dark:`) and an opacity modifier (`/50`).
fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '/' | '.' | '!')
}

/// Extract candidate class names from source text.
pub fn extract_candidates(source: &str) -> BTreeSet<String> {
    source
        .split(|c: char| !is_class_char(c))
        .map(|token| token.trim_matches(|c| c == '.' || c == ':' || c == '/'))
        .filter(|token| token.len() > 1 && token.chars().any(|c| c.is_ascii_alphabetic()))
        .map(|token| token.to_string())
        .collect()
}

/// Extract candidates from a set of files.
pub fn extract_from_files<'a>(files: impl IntoIterator<Item = &'a Path>) -> Result<BTreeSet<String>> {
    let mut candidates = BTreeSet::new();
    for path in files {
        let source = std::fs::read_to_string(path).map_err(|e| ThemeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read content file: {}", e),
        })?;
        candidates.extend(extract_candidates(&source));
    }
    Ok(candidates)
}
