//! Dark-mode activation strategy.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// How `dark:` variants are activated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DarkMode {
    /// `@media (prefers-color-scheme: dark)`
    #[default]
    Media,
    /// An ancestor carrying the `dark` class.
    Class,
    /// `:where(.dark, .dark *)`
    Selector,
    /// An ancestor matching a custom selector, written `["class", ".my-dark"]`.
    Custom(String),
}

/// Selector used for the `dark` marker class.
pub const DARK_CLASS: &str = ".dark";

impl DarkMode {
    /// Selector prefix for dark variants, or `None` when a media query is used.
    pub fn variant_prefix(&self) -> Option<String> {
        match self {
            DarkMode::Media => None,
            DarkMode::Class => Some(DARK_CLASS.to_string()),
            DarkMode::Selector => Some(format!(":where({0}, {0} *)", DARK_CLASS)),
            DarkMode::Custom(selector) => Some(selector.clone()),
        }
    }

    /// The selector whose rule blocks hold dark-scope definitions in a stylesheet.
    pub fn marker_selector(&self) -> Option<&str> {
        match self {
            DarkMode::Media => None,
            DarkMode::Class | DarkMode::Selector => Some(DARK_CLASS),
            DarkMode::Custom(selector) => Some(selector),
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            DarkMode::Media => "media",
            DarkMode::Class | DarkMode::Custom(_) => "class",
            DarkMode::Selector => "selector",
        }
    }
}

impl fmt::Display for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DarkMode::Custom(selector) => write!(f, "class ({})", selector),
            other => f.write_str(other.keyword()),
        }
    }
}

impl Serialize for DarkMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DarkMode::Custom(selector) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(self.keyword())?;
                seq.serialize_element(selector)?;
                seq.end()
            }
            other => serializer.serialize_str(other.keyword()),
        }
    }
}

impl<'de> Deserialize<'de> for DarkMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Keyword(String),
            Pair(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Keyword(k) => match k.as_str() {
                "media" => Ok(DarkMode::Media),
                "class" => Ok(DarkMode::Class),
                "selector" => Ok(DarkMode::Selector),
                other => Err(de::Error::unknown_variant(other, &["media", "class", "selector"])),
            },
            Raw::Pair(parts) => match parts.as_slice() {
                [kind, selector] if kind == "class" || kind == "selector" => {
                    if selector.trim().is_empty() {
                        Err(de::Error::custom("darkMode selector must not be empty"))
                    } else {
                        Ok(DarkMode::Custom(selector.clone()))
                    }
                }
                _ => Err(de::Error::custom(
                    "darkMode must be 'media', 'class', 'selector', or [\"class\", \"<selector>\"]",
                )),
            },
        }
    }
}
