//! Custom-property extraction from CSS stylesheets.
//!
//! Only declarations of custom properties (`--name: value;`) are collected.
//! Each one is tagged with the colour scheme it applies to, so light and
//! dark values can be checked separately.

use std::path::Path;

use crate::error::{Result, ThemeError};
use crate::types::{DarkMode, DARK_CLASS};

/// Colour scheme a definition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Light,
    Dark,
}

/// A custom property definition found in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDefinition {
    /// Name including the leading `--`.
    pub name: String,
    pub value: String,
    pub scheme: Scheme,
    /// 1-indexed line of the declaration.
    pub line: u32,
}

/// Custom properties defined by a stylesheet.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    definitions: Vec<VarDefinition>,
}

impl Stylesheet {
    /// Load and parse a stylesheet file.
    pub fn load(path: &Path, dark_mode: &DarkMode) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ThemeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read stylesheet: {}", e),
        })?;
        Self::parse(&source, dark_mode)
    }

    /// Parse stylesheet source.
    pub fn parse(source: &str, dark_mode: &DarkMode) -> Result<Self> {
        let marker = dark_mode.marker_selector();
        let mut definitions = Vec::new();
        let mut blocks: Vec<String> = Vec::new();
        let mut buffer = String::new();
        let mut buffer_line = 1u32;
        let mut line = 1u32;
        let mut quote: Option<char> = None;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\n' {
                line += 1;
            }

            if let Some(q) = quote {
                buffer.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    let mut prev = '\0';
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '\n' {
                            line += 1;
                        }
                        if prev == '*' && inner == '/' {
                            closed = true;
                            break;
                        }
                        prev = inner;
                    }
                    if !closed {
                        return Err(unbalanced(line, "unterminated comment"));
                    }
                }
                '"' | '\'' => {
                    quote = Some(c);
                    buffer.push(c);
                }
                '{' => {
                    blocks.push(buffer.trim().to_string());
                    buffer.clear();
                }
                '}' => {
                    take_declaration(&buffer, buffer_line, &blocks, marker, &mut definitions);
                    buffer.clear();
                    if blocks.pop().is_none() {
                        return Err(unbalanced(line, "unexpected '}'"));
                    }
                }
                ';' => {
                    take_declaration(&buffer, buffer_line, &blocks, marker, &mut definitions);
                    buffer.clear();
                }
                _ => {
                    if buffer.trim().is_empty() && !c.is_whitespace() {
                        buffer_line = line;
                    }
                    buffer.push(c);
                }
            }
        }

        if !blocks.is_empty() {
            return Err(unbalanced(line, "unclosed '{'"));
        }

        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &[VarDefinition] {
        &self.definitions
    }

    /// Whether the property is defined in any scheme.
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name == name)
    }

    /// The effective value for a scheme. Later definitions win; dark falls
    /// back to light.
    pub fn value(&self, name: &str, scheme: Scheme) -> Option<&str> {
        let find = |s: Scheme| {
            self.definitions
                .iter()
                .rev()
                .find(|d| d.name == name && d.scheme == s)
                .map(|d| d.value.as_str())
        };
        match scheme {
            Scheme::Light => find(Scheme::Light),
            Scheme::Dark => find(Scheme::Dark).or_else(|| find(Scheme::Light)),
        }
    }

    /// Whether any definition targets the dark scheme.
    pub fn has_dark_scheme(&self) -> bool {
        self.definitions.iter().any(|d| d.scheme == Scheme::Dark)
    }
}

fn unbalanced(line: u32, why: &str) -> ThemeError {
    ThemeError::Parse {
        message: format!("Invalid stylesheet at line {}: {}", line, why),
        help: None,
    }
}

fn take_declaration(
    text: &str,
    line: u32,
    blocks: &[String],
    marker: Option<&str>,
    out: &mut Vec<VarDefinition>,
) {
    let Some((name, value)) = text.split_once(':') else {
        return;
    };
    let name = name.trim();
    if !name.starts_with("--") || blocks.is_empty() {
        return;
    }

    // `.dark` blocks never apply under the media strategy.
    if marker.is_none() && blocks.iter().any(|prelude| has_selector(prelude, DARK_CLASS)) {
        return;
    }

    let value = value.trim();
    let value = value.strip_suffix("!important").map(str::trim_end).unwrap_or(value);

    let dark = blocks.iter().any(|prelude| is_dark_prelude(prelude, marker));
    out.push(VarDefinition {
        name: name.to_string(),
        value: value.to_string(),
        scheme: if dark { Scheme::Dark } else { Scheme::Light },
        line,
    });
}

fn is_dark_prelude(prelude: &str, marker: Option<&str>) -> bool {
    if let Some(query) = prelude.strip_prefix("@media") {
        let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
        return compact.contains("prefers-color-scheme:dark");
    }

    marker.is_some_and(|marker| has_selector(prelude, marker))
}

fn has_selector(prelude: &str, marker: &str) -> bool {
    !prelude.starts_with('@')
        && prelude
            .split(',')
            .any(|selector| contains_selector(selector.trim(), marker))
}

/// Whether `selector` contains `marker` as a whole compound part
/// (`.dark` matches `html.dark` but not `.darker`).
fn contains_selector(selector: &str, marker: &str) -> bool {
    selector.match_indices(marker).any(|(i, _)| {
        let next = selector[i + marker.len()..].chars().next();
        !matches!(next, Some(c) if c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}
