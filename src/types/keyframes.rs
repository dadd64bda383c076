//! Keyframe definitions and offset selectors.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ThemeError};

/// A single offset inside a `@keyframes` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyframeOffset {
    From,
    To,
    Percent(f32),
}

impl FromStr for KeyframeOffset {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("from") {
            return Ok(KeyframeOffset::From);
        }
        if s.eq_ignore_ascii_case("to") {
            return Ok(KeyframeOffset::To);
        }

        let invalid = || ThemeError::Parse {
            message: format!("Invalid keyframe offset: '{}'", s),
            help: Some("Use 'from', 'to', or a percentage between 0% and 100%".to_string()),
        };

        let number = s.strip_suffix('%').ok_or_else(invalid)?;
        let value: f32 = number.parse().map_err(|_| invalid())?;
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid());
        }
        Ok(KeyframeOffset::Percent(value))
    }
}

impl fmt::Display for KeyframeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyframeOffset::From => f.write_str("from"),
            KeyframeOffset::To => f.write_str("to"),
            KeyframeOffset::Percent(p) => write!(f, "{}%", p),
        }
    }
}

/// Parse an offset selector, which may list several offsets (`"0%, 50%"`).
pub fn parse_offset_selector(selector: &str) -> Result<Vec<KeyframeOffset>> {
    selector
        .split(',')
        .map(|part| {
            if part.trim().is_empty() {
                Err(ThemeError::Parse {
                    message: format!("Empty offset in keyframe selector '{}'", selector),
                    help: None,
                })
            } else {
                part.parse()
            }
        })
        .collect()
}

/// A style value. Authors may write numbers (`opacity: 0`); they are kept as
/// their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleValue(pub String);

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => StyleValue(s),
            Raw::Int(n) => StyleValue(n.to_string()),
            Raw::Float(n) => StyleValue(n.to_string()),
        })
    }
}

impl StyleValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue(s.to_string())
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Property name to value, in authoring order.
pub type StyleBlock = IndexMap<String, StyleValue>;

/// A named animation's style snapshots, keyed by offset selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyframe {
    steps: IndexMap<String, StyleBlock>,
}

impl Keyframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step. Builder-style, used for the builtin theme.
    pub fn step(mut self, selector: &str, properties: &[(&str, &str)]) -> Self {
        let block = properties
            .iter()
            .map(|(name, value)| (name.to_string(), StyleValue::from(*value)))
            .collect();
        self.steps.insert(selector.to_string(), block);
        self
    }

    /// Iterate steps as `(selector, block)` in authoring order.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &StyleBlock)> {
        self.steps.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Convert an authored property name to its CSS form.
///
/// camelCase becomes kebab-case; a leading capital marks a vendor prefix
/// (`WebkitTransform` -> `-webkit-transform`). Custom properties pass through.
pub fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Check that an authored property name is syntactically usable.
pub fn is_valid_property_name(name: &str) -> bool {
    if let Some(rest) = name.strip_prefix("--") {
        return !rest.is_empty()
            && rest
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    }

    let body = name.strip_prefix('-').unwrap_or(name);
    match body.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    !body.ends_with('-') && body.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

/// Properties commonly used in keyframes. Not exhaustive; unknown names only
/// produce a warning.
const KNOWN_PROPERTIES: &[&str] = &[
    "accent-color",
    "backdrop-filter",
    "background",
    "background-color",
    "background-image",
    "background-position",
    "background-size",
    "block-size",
    "border",
    "border-color",
    "border-radius",
    "border-width",
    "bottom",
    "box-shadow",
    "clip-path",
    "color",
    "display",
    "fill",
    "filter",
    "flex-basis",
    "flex-grow",
    "flex-shrink",
    "font-size",
    "font-weight",
    "gap",
    "grid-template-columns",
    "grid-template-rows",
    "height",
    "inline-size",
    "inset",
    "left",
    "letter-spacing",
    "line-height",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "mask-position",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "object-position",
    "offset-distance",
    "opacity",
    "outline-color",
    "outline-offset",
    "outline-width",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "perspective",
    "pointer-events",
    "right",
    "rotate",
    "scale",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "text-shadow",
    "top",
    "transform",
    "transform-origin",
    "translate",
    "visibility",
    "width",
    "word-spacing",
    "z-index",
];

/// Check whether a CSS-form property name is a known property.
pub fn is_known_property(css_name: &str) -> bool {
    if css_name.starts_with("--") {
        return true;
    }
    let unprefixed = ["-webkit-", "-moz-", "-ms-", "-o-"]
        .iter()
        .find_map(|prefix| css_name.strip_prefix(prefix))
        .unwrap_or(css_name);
    KNOWN_PROPERTIES.contains(&unprefixed)
}
