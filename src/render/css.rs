//! CSS renderer - turns a theme config into utility classes.
//!
//! Colour utilities are generated for every colour class suffix and every
//! prefix in [`COLOR_PREFIXES`]. Animations become `.animate-<name>` rules
//! followed by the keyframes they reference.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{css_property_name, ColorRef, DarkMode, Keyframe, ThemeConfig};

/// Class prefix to the CSS property it sets.
pub const COLOR_PREFIXES: &[(&str, &str)] = &[
    ("bg", "background-color"),
    ("text", "color"),
    ("border", "border-color"),
    ("outline", "outline-color"),
    ("ring", "--tw-ring-color"),
    ("fill", "fill"),
    ("stroke", "stroke"),
    ("decoration", "text-decoration-color"),
    ("accent", "accent-color"),
];

const ANIMATE_PREFIX: &str = "animate-";
const DARK_VARIANT: &str = "dark:";
const DARK_MEDIA: &str = "@media (prefers-color-scheme: dark)";

/// Options for a render pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Class names in use. `None` renders every utility without variants.
    pub candidates: Option<&'a BTreeSet<String>>,
}

impl<'a> RenderOptions<'a> {
    /// Render every utility.
    pub fn all() -> Self {
        Self { candidates: None }
    }

    /// Render only utilities named in `candidates`.
    pub fn pruned(candidates: &'a BTreeSet<String>) -> Self {
        Self {
            candidates: Some(candidates),
        }
    }
}

/// Rendered stylesheet with counts for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedCss {
    pub css: String,
    /// Utility rules emitted, variants included.
    pub rules: usize,
    /// `@keyframes` blocks emitted.
    pub keyframes: usize,
}

/// A colour utility such as `bg-primary`.
struct ColorUtility<'a> {
    class: String,
    property: &'static str,
    color: &'a ColorRef,
}

/// A candidate that names a colour utility.
struct ColorUse<'a> {
    /// Position of the utility in authoring order.
    index: usize,
    candidate: &'a str,
    dark: bool,
    value: String,
}

/// CSS renderer over a theme config.
pub struct CssRenderer<'a> {
    config: &'a ThemeConfig,
    utilities: Vec<ColorUtility<'a>>,
}

impl<'a> CssRenderer<'a> {
    pub fn new(config: &'a ThemeConfig) -> Self {
        let mut utilities = Vec::new();
        for (suffix, color) in config.color_utilities() {
            for &(prefix, property) in COLOR_PREFIXES {
                utilities.push(ColorUtility {
                    class: format!("{}-{}", prefix, suffix),
                    property,
                    color,
                });
            }
        }

        Self { config, utilities }
    }

    /// Render the stylesheet.
    pub fn render(&self, options: &RenderOptions<'_>) -> String {
        self.render_document(options).css
    }

    /// Render the stylesheet and report what was emitted.
    pub fn render_document(&self, options: &RenderOptions<'_>) -> RenderedCss {
        let mut blocks = Vec::new();
        let mut keyframe_count = 0;

        match options.candidates {
            None => {
                for utility in &self.utilities {
                    blocks.push(rule(
                        &selector(&utility.class),
                        utility.property,
                        &utility.color.css_value(),
                    ));
                }
            }
            Some(candidates) => {
                for used in self.color_uses(candidates) {
                    let utility = &self.utilities[used.index];
                    let block = if used.dark {
                        self.dark_rule(used.candidate, utility.property, &used.value)
                    } else {
                        rule(&selector(used.candidate), utility.property, &used.value)
                    };
                    blocks.push(block);
                }
            }
        }

        let mut emitted: HashSet<&str> = HashSet::new();
        for (name, value) in self.config.animations() {
            let class = format!("{}{}", ANIMATE_PREFIX, name);
            if let Some(candidates) = options.candidates {
                if !candidates.contains(&class) {
                    continue;
                }
            }

            blocks.push(rule(&selector(&class), "animation", value));
            for keyframe_name in self.config.keyframes_for_animation(name) {
                let Some((key, keyframe)) = self.config.keyframes().get_key_value(&keyframe_name)
                else {
                    continue;
                };
                if emitted.insert(key.as_str()) {
                    blocks.push(keyframes_block(key, keyframe));
                    keyframe_count += 1;
                }
            }
        }

        let rules = blocks.len() - keyframe_count;
        RenderedCss {
            css: blocks.join("\n"),
            rules,
            keyframes: keyframe_count,
        }
    }

    /// Candidates that name a colour utility. Base utilities come first and
    /// dark variants after them, each in authoring order of the utility and
    /// then candidate order.
    fn color_uses<'c>(&self, candidates: &'c BTreeSet<String>) -> Vec<ColorUse<'c>> {
        let index: HashMap<&str, usize> = self
            .utilities
            .iter()
            .enumerate()
            .map(|(i, u)| (u.class.as_str(), i))
            .collect();

        let mut uses: Vec<ColorUse<'c>> = candidates
            .iter()
            .filter_map(|candidate| {
                let (dark, class) = match candidate.strip_prefix(DARK_VARIANT) {
                    Some(rest) => (true, rest),
                    None => (false, candidate.as_str()),
                };
                let (class, opacity) = match class.split_once('/') {
                    Some((class, opacity)) => (class, Some(opacity.parse::<u8>().ok()?)),
                    None => (class, None),
                };

                let &i = index.get(class)?;
                let color = self.utilities[i].color;
                let value = match opacity {
                    Some(percent) => color.with_opacity(percent)?,
                    None => color.css_value(),
                };

                Some(ColorUse {
                    index: i,
                    candidate: candidate.as_str(),
                    dark,
                    value,
                })
            })
            .collect();

        uses.sort_by(|a, b| {
            a.dark
                .cmp(&b.dark)
                .then(a.index.cmp(&b.index))
                .then(a.candidate.cmp(b.candidate))
        });
        uses
    }

    fn dark_rule(&self, candidate: &str, property: &str, value: &str) -> String {
        match &self.config.dark_mode {
            DarkMode::Media => {
                let inner = rule(&selector(candidate), property, value);
                let indented: Vec<String> = inner.lines().map(|line| format!("  {}", line)).collect();
                format!("{} {{\n{}\n}}\n", DARK_MEDIA, indented.join("\n"))
            }
            mode => {
                let prefix = mode.variant_prefix().unwrap_or_default();
                rule(&format!("{} {}", prefix, selector(candidate)), property, value)
            }
        }
    }
}

/// Class selector with CSS escapes for `:` `/` and other special characters.
pub fn selector(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 4);
    out.push('.');
    for c in class.chars() {
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn rule(selector: &str, property: &str, value: &str) -> String {
    format!("{} {{\n  {}: {};\n}}\n", selector, property, value)
}

fn keyframes_block(name: &str, keyframe: &Keyframe) -> String {
    let mut out = format!("@keyframes {} {{\n", name);
    for (offset, block) in keyframe.steps() {
        out.push_str(&format!("  {} {{\n", offset));
        for (property, value) in block {
            out.push_str(&format!("    {}: {};\n", css_property_name(property), value));
        }
        out.push_str("  }\n");
    }
    out.push_str("}\n");
    out
}
