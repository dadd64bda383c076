//! Content scanner.
//!
//! Walks the project root and collects the files matched by the content
//! patterns. Build output and dependency directories are never scanned.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

use super::glob::GlobPattern;

/// Directories skipped during scanning.
const IGNORED_DIRS: &[&str] = &["target", "node_modules", ".git"];

/// Files matched by one content pattern.
#[derive(Debug, Clone)]
pub struct PatternMatches {
    pub pattern: String,
    pub files: Vec<PathBuf>,
}

/// Result of scanning for content files.
#[derive(Debug, Default)]
pub struct ContentScan {
    /// Matches per inclusion pattern, in pattern order.
    pub patterns: Vec<PatternMatches>,
    files: BTreeSet<PathBuf>,
}

impl ContentScan {
    /// All matched files, sorted and deduplicated.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Inclusion patterns that matched no file.
    pub fn unmatched_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns
            .iter()
            .filter(|p| p.files.is_empty())
            .map(|p| p.pattern.as_str())
    }
}

/// Compile content patterns, failing on the first invalid one.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<GlobPattern>> {
    patterns.iter().map(|p| GlobPattern::new(p)).collect()
}

/// Scan `root` for files matching the content patterns.
pub fn scan_content(root: &Path, patterns: &[String]) -> Result<ContentScan> {
    let compiled = compile_patterns(patterns)?;
    let (excludes, includes): (Vec<&GlobPattern>, Vec<&GlobPattern>) =
        compiled.iter().partition(|p| p.is_negated());

    let mut scan = ContentScan {
        patterns: includes
            .iter()
            .map(|p| PatternMatches {
                pattern: p.as_str().to_string(),
                files: vec![],
            })
            .collect(),
        files: BTreeSet::new(),
    };

    if !root.exists() {
        return Ok(scan);
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);

        if excludes.iter().any(|p| p.matches(relative)) {
            continue;
        }

        for (slot, pattern) in scan.patterns.iter_mut().zip(&includes) {
            if pattern.matches(relative) {
                slot.files.push(path.to_path_buf());
                scan.files.insert(path.to_path_buf());
            }
        }
    }

    Ok(scan)
}

/// Whether a root-relative path is content under the compiled patterns.
pub fn is_content_path(patterns: &[GlobPattern], relative: &Path) -> bool {
    let ignored = relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
    });
    if ignored {
        return false;
    }

    let (excludes, includes): (Vec<&GlobPattern>, Vec<&GlobPattern>) =
        patterns.iter().partition(|p| p.is_negated());
    includes.iter().any(|p| p.matches(relative)) && !excludes.iter().any(|p| p.matches(relative))
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}
