//! Colour token values.
//!
//! A theme colour is almost always an indirection into a runtime custom
//! property, e.g. `hsl(var(--primary))`. `ColorRef` keeps that structure so
//! validation can find the variable and rendering can splice in an opacity.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Placeholder the upstream generator substitutes with an opacity value.
pub const ALPHA_PLACEHOLDER: &str = "<alpha-value>";

/// Scheme key for a role's background value.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Scheme key for the foreground that sits on top of a role's background.
pub const ON_KEY: &str = "on";

/// CSS colour function wrapping a custom property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFunction {
    Hsl,
    Hsla,
    Rgb,
    Rgba,
    Oklch,
    Oklab,
    Lab,
    Lch,
    Hwb,
}

impl ColorFunction {
    const ALL: [ColorFunction; 9] = [
        ColorFunction::Hsl,
        ColorFunction::Hsla,
        ColorFunction::Rgb,
        ColorFunction::Rgba,
        ColorFunction::Oklch,
        ColorFunction::Oklab,
        ColorFunction::Lab,
        ColorFunction::Lch,
        ColorFunction::Hwb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorFunction::Hsl => "hsl",
            ColorFunction::Hsla => "hsla",
            ColorFunction::Rgb => "rgb",
            ColorFunction::Rgba => "rgba",
            ColorFunction::Oklch => "oklch",
            ColorFunction::Oklab => "oklab",
            ColorFunction::Lab => "lab",
            ColorFunction::Lch => "lch",
            ColorFunction::Hwb => "hwb",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for ColorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single colour value from the token table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorRef {
    /// Indirection into a custom property, optionally wrapped in a colour
    /// function: `var(--x)`, `hsl(var(--x))`, `rgb(var(--x) / <alpha-value>)`.
    Var {
        function: Option<ColorFunction>,
        /// Custom property name including the leading `--`.
        name: String,
        /// Whether the value carries an `<alpha-value>` slot.
        alpha_slot: bool,
        /// The value as authored.
        raw: String,
    },
    /// Any other CSS colour, kept verbatim.
    Literal(String),
}

impl ColorRef {
    /// Parse a colour value. Anything that is not a recognised custom
    /// property reference is kept as a literal.
    pub fn parse(s: &str) -> Self {
        parse_var_ref(s.trim(), s).unwrap_or_else(|| ColorRef::Literal(s.to_string()))
    }

    /// `hsl(var(--name))`
    pub fn hsl_var(name: &str) -> Self {
        let name = format!("--{}", name.trim_start_matches('-'));
        ColorRef::Var {
            function: Some(ColorFunction::Hsl),
            raw: format!("hsl(var({}))", name),
            name,
            alpha_slot: false,
        }
    }

    /// The referenced custom property (with leading `--`), if any.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            ColorRef::Var { name, .. } => Some(name),
            ColorRef::Literal(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ColorRef::Literal(_))
    }

    /// Whether an opacity modifier (`bg-x/50`) can be applied.
    pub fn supports_opacity(&self) -> bool {
        matches!(self, ColorRef::Var { function: Some(_), .. })
    }

    /// The value to emit in a declaration.
    pub fn css_value(&self) -> String {
        match self {
            ColorRef::Var {
                function: Some(_),
                alpha_slot: true,
                ..
            } => self.with_alpha("1").unwrap_or_else(|| self.to_string()),
            _ => self.to_string(),
        }
    }

    /// The value with an opacity percentage (0..=100) applied.
    ///
    /// Returns `None` for literals and bare `var()` references, where the
    /// channel layout is unknown.
    pub fn with_opacity(&self, percent: u8) -> Option<String> {
        if percent > 100 {
            return None;
        }
        let alpha = f64::from(percent) / 100.0;
        self.with_alpha(&alpha.to_string())
    }

    fn with_alpha(&self, alpha: &str) -> Option<String> {
        match self {
            ColorRef::Var {
                function: Some(function),
                name,
                ..
            } => Some(format!("{}(var({}) / {})", function, name, alpha)),
            _ => None,
        }
    }
}

fn parse_var_ref(s: &str, raw: &str) -> Option<ColorRef> {
    if let Some(name) = parse_bare_var(s) {
        return Some(ColorRef::Var {
            function: None,
            name,
            alpha_slot: false,
            raw: raw.to_string(),
        });
    }

    let open = s.find('(')?;
    let function = ColorFunction::from_name(&s[..open])?;
    let inner = s[open + 1..].strip_suffix(')')?.trim();

    let (var_part, alpha_slot) = match inner.split_once('/') {
        Some((var_part, alpha)) if alpha.trim() == ALPHA_PLACEHOLDER => (var_part.trim(), true),
        Some(_) => return None,
        None => (inner, false),
    };

    let name = parse_bare_var(var_part)?;
    Some(ColorRef::Var {
        function: Some(function),
        name,
        alpha_slot,
        raw: raw.to_string(),
    })
}

fn parse_bare_var(s: &str) -> Option<String> {
    let name = s.strip_prefix("var(")?.strip_suffix(')')?.trim();
    is_custom_property(name).then(|| name.to_string())
}

/// Check that a name is a well-formed custom property (`--foo-bar`).
pub fn is_custom_property(name: &str) -> bool {
    match name.strip_prefix("--") {
        Some(rest) => {
            !rest.is_empty()
                && rest
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        None => false,
    }
}

impl FromStr for ColorRef {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for ColorRef {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ColorRef> for String {
    fn from(c: ColorRef) -> Self {
        c.to_string()
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorRef::Var { raw, .. } | ColorRef::Literal(raw) => f.write_str(raw),
        }
    }
}

/// An entry in the colour token table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorToken {
    /// A bare colour (`muted: hsl(var(--muted))`).
    Single(ColorRef),
    /// A record of shades keyed by name, typically `DEFAULT` and `on`.
    Scheme(IndexMap<String, ColorRef>),
}

impl ColorToken {
    /// A scheme with a background and its foreground companion, using the
    /// `--<role>` / `--<role>-on` naming convention.
    pub fn hsl_pair(role: &str) -> Self {
        let mut shades = IndexMap::new();
        shades.insert(DEFAULT_KEY.to_string(), ColorRef::hsl_var(role));
        shades.insert(ON_KEY.to_string(), ColorRef::hsl_var(&format!("{}-on", role)));
        ColorToken::Scheme(shades)
    }

    /// The value used for the bare role class (`bg-primary`).
    pub fn default_value(&self) -> Option<&ColorRef> {
        match self {
            ColorToken::Single(c) => Some(c),
            ColorToken::Scheme(shades) => shades.get(DEFAULT_KEY),
        }
    }

    /// The foreground companion, if this is a scheme that defines one.
    pub fn on(&self) -> Option<&ColorRef> {
        self.shade(ON_KEY)
    }

    pub fn shade(&self, key: &str) -> Option<&ColorRef> {
        match self {
            ColorToken::Single(_) => None,
            ColorToken::Scheme(shades) => shades.get(key),
        }
    }

    pub fn is_scheme(&self) -> bool {
        matches!(self, ColorToken::Scheme(_))
    }

    /// Flatten into `(class suffix, value)` pairs for the given role.
    ///
    /// `DEFAULT` maps to the role name itself, other shades to `role-shade`.
    pub fn utilities<'a>(&'a self, role: &str) -> Vec<(String, &'a ColorRef)> {
        match self {
            ColorToken::Single(c) => vec![(role.to_string(), c)],
            ColorToken::Scheme(shades) => shades
                .iter()
                .map(|(key, c)| {
                    let suffix = if key == DEFAULT_KEY {
                        role.to_string()
                    } else {
                        format!("{}-{}", role, key)
                    };
                    (suffix, c)
                })
                .collect(),
        }
    }

    /// Every value in this token.
    pub fn values(&self) -> Vec<&ColorRef> {
        match self {
            ColorToken::Single(c) => vec![c],
            ColorToken::Scheme(shades) => shades.values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hsl_var() {
        let c = ColorRef::parse("hsl(var(--surface))");
        assert_eq!(
            c,
            ColorRef::Var {
                function: Some(ColorFunction::Hsl),
                name: "--surface".to_string(),
                alpha_slot: false,
                raw: "hsl(var(--surface))".to_string(),
            }
        );
        assert_eq!(c, ColorRef::hsl_var("surface"));
        assert_eq!(c.var_name(), Some("--surface"));
        assert_eq!(c.to_string(), "hsl(var(--surface))");
    }

    #[test]
    fn test_parse_bare_var() {
        let c = ColorRef::parse("var(--ring)");
        assert_eq!(c.var_name(), Some("--ring"));
        assert!(!c.supports_opacity());
        assert_eq!(c.to_string(), "var(--ring)");
    }

    #[test]
    fn test_parse_alpha_slot() {
        let c = ColorRef::parse("rgb(var(--accent) / <alpha-value>)");
        assert_eq!(c.var_name(), Some("--accent"));
        assert_eq!(c.to_string(), "rgb(var(--accent) / <alpha-value>)");
        assert_eq!(c.css_value(), "rgb(var(--accent) / 1)");
    }

    #[test]
    fn test_parse_literal() {
        for raw in ["#ff0000", "red", "hsl(220 10% 50%)", "hsl(var(--x) / 0.5)", "var(-x)"] {
            let c = ColorRef::parse(raw);
            assert!(c.is_literal(), "{} should be a literal", raw);
            assert_eq!(c.to_string(), raw);
        }
    }

    #[test]
    fn test_spacing_kept_as_authored() {
        for raw in ["hsl( var(--x) )", "rgb(var( --x ) /  <alpha-value>)", " var(--x)"] {
            let c = ColorRef::parse(raw);
            assert_eq!(c.var_name(), Some("--x"), "{}", raw);
            assert_eq!(c.to_string(), raw);

            let json = serde_json::to_string(&c).unwrap();
            let back: ColorRef = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), raw);
        }
        assert_eq!(
            ColorRef::parse("hsl( var(--x) )").with_opacity(50).as_deref(),
            Some("hsl(var(--x) / 0.5)")
        );
    }

    #[test]
    fn test_with_opacity() {
        let c = ColorRef::parse("hsl(var(--danger))");
        assert_eq!(c.with_opacity(50).as_deref(), Some("hsl(var(--danger) / 0.5)"));
        assert_eq!(c.with_opacity(5).as_deref(), Some("hsl(var(--danger) / 0.05)"));
        assert_eq!(c.with_opacity(100).as_deref(), Some("hsl(var(--danger) / 1)"));
        assert_eq!(c.with_opacity(101), None);

        assert_eq!(ColorRef::parse("#fff").with_opacity(50), None);
    }

    #[test]
    fn test_hsl_pair() {
        let token = ColorToken::hsl_pair("primary");
        assert_eq!(token.default_value().unwrap().to_string(), "hsl(var(--primary))");
        assert_eq!(token.on().unwrap().to_string(), "hsl(var(--primary-on))");
    }

    #[test]
    fn test_utilities() {
        let token = ColorToken::hsl_pair("accent");
        let names: Vec<String> = token.utilities("accent").into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["accent", "accent-on"]);

        let single = ColorToken::Single(ColorRef::hsl_var("muted"));
        assert!(single.on().is_none());
        assert_eq!(single.utilities("muted")[0].0, "muted");
    }

    #[test]
    fn test_token_deserialize_forms() {
        let single: ColorToken = serde_json::from_str(r#""hsl(var(--border))""#).unwrap();
        assert!(!single.is_scheme());

        let scheme: ColorToken =
            serde_json::from_str(r#"{"DEFAULT": "hsl(var(--x))", "on": "hsl(var(--x-on))"}"#)
                .unwrap();
        assert!(scheme.is_scheme());
        assert_eq!(scheme.values().len(), 2);
    }
}
