//! The theme configuration record.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

use super::animation::{parse_animation_list, AnimationShorthand};
use super::colour::{ColorRef, ColorToken};
use super::dark_mode::DarkMode;
use super::keyframes::Keyframe;

/// Config file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(ConfigFormat::Yaml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Design-token extensions layered on top of the generator's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeExtension {
    /// Colour role name to value or scheme.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, ColorToken>,

    /// Animation name to keyframe steps.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub keyframes: IndexMap<String, Keyframe>,

    /// Animation name to `animation` shorthand.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub animation: IndexMap<String, String>,
}

/// The `theme` section. Only `extend` is supported; replacing the
/// generator's defaults wholesale is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSection {
    pub extend: ThemeExtension,
}

/// A theme configuration: what to scan, how dark mode activates, and which
/// tokens and animations to add.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Glob patterns for files that contain class names.
    pub content: Vec<String>,

    pub dark_mode: DarkMode,

    pub theme: ThemeSection,

    /// Generator extensions. Recorded, never executed.
    pub plugins: Vec<String>,
}

impl ThemeConfig {
    /// Load a config from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ThemeError::Parse {
            message: format!("Unsupported config file: {}", path.display()),
            help: Some("Use a .yaml, .yml or .json file".to_string()),
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        match format {
            ConfigFormat::Yaml => Self::parse_yaml(&content),
            ConfigFormat::Json => Self::parse_json(&content),
        }
    }

    /// Parse a config from YAML.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ThemeError::Parse {
            message: format!("Invalid theme config: {}", e),
            help: Some("Check the YAML syntax and field names".to_string()),
        })
    }

    /// Parse a config from JSON.
    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ThemeError::Parse {
            message: format!("Invalid theme config: {}", e),
            help: Some("Check the JSON syntax and field names".to_string()),
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ThemeError::Build {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ThemeError::Build {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// Serialize in the given format.
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Yaml => self.to_yaml(),
            ConfigFormat::Json => self.to_json(),
        }
    }

    pub fn colors(&self) -> &IndexMap<String, ColorToken> {
        &self.theme.extend.colors
    }

    pub fn keyframes(&self) -> &IndexMap<String, Keyframe> {
        &self.theme.extend.keyframes
    }

    pub fn animations(&self) -> &IndexMap<String, String> {
        &self.theme.extend.animation
    }

    pub fn color(&self, role: &str) -> Option<&ColorToken> {
        self.theme.extend.colors.get(role)
    }

    pub fn keyframe(&self, name: &str) -> Option<&Keyframe> {
        self.theme.extend.keyframes.get(name)
    }

    /// Parse the named animation shorthand.
    pub fn animation(&self, name: &str) -> Option<Result<Vec<AnimationShorthand>>> {
        self.theme
            .extend
            .animation
            .get(name)
            .map(|value| parse_animation_list(value))
    }

    /// Every colour class suffix with its value, in authoring order.
    pub fn color_utilities(&self) -> Vec<(String, &ColorRef)> {
        self.theme
            .extend
            .colors
            .iter()
            .flat_map(|(role, token)| token.utilities(role))
            .collect()
    }

    /// Keyframe names referenced by the given animation, ignoring parse errors.
    pub fn keyframes_for_animation(&self, name: &str) -> Vec<String> {
        match self.animation(name) {
            Some(Ok(list)) => list.into_iter().filter_map(|a| a.name).collect(),
            _ => vec![],
        }
    }

    /// The built-in theme: surface/primary/accent/success/danger roles with
    /// foreground companions, neutral tokens, and slide/fade animations.
    pub fn builtin() -> Self {
        let mut colors = IndexMap::new();
        colors.insert("container".to_string(), ColorToken::Single(ColorRef::hsl_var("container")));
        for role in ["surface", "primary", "accent", "success", "danger"] {
            colors.insert(role.to_string(), ColorToken::hsl_pair(role));
        }
        for role in ["muted", "border", "ring"] {
            colors.insert(role.to_string(), ColorToken::Single(ColorRef::hsl_var(role)));
        }

        let mut keyframes = IndexMap::new();
        keyframes.insert(
            "slide-in-up".to_string(),
            Keyframe::new()
                .step("0%", &[("visibility", "visible"), ("transform", "translateY(100%)")])
                .step("100%", &[("transform", "translateY(0)")]),
        );
        keyframes.insert(
            "slide-out-left".to_string(),
            Keyframe::new()
                .step("0%", &[("transform", "translateX(0)")])
                .step("100%", &[("visibility", "hidden"), ("transform", "translateX(-100%)")]),
        );
        keyframes.insert(
            "slide-in-down".to_string(),
            Keyframe::new()
                .step("0%", &[("visibility", "visible"), ("transform", "translateY(-100%)")])
                .step("100%", &[("transform", "translateY(0)")]),
        );
        keyframes.insert(
            "slide-out-up".to_string(),
            Keyframe::new()
                .step("0%", &[("transform", "translateY(0)")])
                .step("100%", &[("visibility", "hidden"), ("transform", "translateY(-100%)")]),
        );
        keyframes.insert(
            "fade-in".to_string(),
            Keyframe::new()
                .step("0%", &[("opacity", "0")])
                .step("100%", &[("opacity", "1")]),
        );
        keyframes.insert(
            "fade-out".to_string(),
            Keyframe::new()
                .step("0%", &[("opacity", "1")])
                .step("100%", &[("opacity", "0")]),
        );

        let animation = [
            ("slide-in-up", "200ms ease-out"),
            ("slide-out-left", "150ms ease-in"),
            ("slide-in-down", "200ms ease-out"),
            ("slide-out-up", "150ms ease-in"),
            ("fade-in", "200ms ease-in-out"),
            ("fade-out", "150ms ease-in-out"),
        ]
        .into_iter()
        .map(|(name, timing)| (name.to_string(), format!("{} {} forwards", name, timing)))
        .collect();

        Self {
            content: vec!["./app/src/**/*.rs".to_string()],
            dark_mode: DarkMode::Class,
            theme: ThemeSection {
                extend: ThemeExtension {
                    colors,
                    keyframes,
                    animation,
                },
            },
            plugins: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
content:
  - "./src/**/*.rs"
darkMode: class
theme:
  extend:
    colors:
      muted: "hsl(var(--muted))"
      primary:
        DEFAULT: "hsl(var(--primary))"
        on: "hsl(var(--primary-on))"
    keyframes:
      fade-in:
        "0%":
          opacity: 0
        "100%":
          opacity: 1
    animation:
      fade-in: "fade-in 200ms ease-in-out forwards"
plugins: []
"#;

    #[test]
    fn test_parse_yaml() {
        let config = ThemeConfig::parse_yaml(SAMPLE).unwrap();

        assert_eq!(config.content, vec!["./src/**/*.rs"]);
        assert_eq!(config.dark_mode, DarkMode::Class);
        assert_eq!(config.colors().len(), 2);
        assert!(config.keyframe("fade-in").is_some());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_primary_is_an_indirection_pair() {
        let config = ThemeConfig::builtin();
        let primary = config.color("primary").unwrap();

        let default = primary.default_value().unwrap();
        let on = primary.on().unwrap();
        assert!(!default.is_literal());
        assert!(!on.is_literal());
        assert_eq!(default.var_name(), Some("--primary"));
        assert_eq!(on.var_name(), Some("--primary-on"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ThemeConfig::builtin();
        let yaml = config.to_yaml().unwrap();
        let reparsed = ThemeConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_json_round_trip() {
        let config = ThemeConfig::parse_yaml(SAMPLE).unwrap();
        let json = config.to_json().unwrap();
        let reparsed = ThemeConfig::parse_json(&json).unwrap();
        assert_eq!(reparsed, config);
        assert_eq!(reparsed.to_json().unwrap(), json);
    }

    #[test]
    fn test_preserves_authoring_order() {
        let config = ThemeConfig::builtin();
        let roles: Vec<&str> = config.colors().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            roles,
            vec!["container", "surface", "primary", "accent", "success", "danger", "muted", "border", "ring"]
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = ThemeConfig::parse_yaml("content: []\ndarkmode: class\n");
        assert!(result.is_err());

        let result = ThemeConfig::parse_yaml("theme:\n  colors: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = ThemeConfig::parse_yaml("{}").unwrap();
        assert!(config.content.is_empty());
        assert_eq!(config.dark_mode, DarkMode::Media);
        assert!(config.colors().is_empty());
    }

    #[test]
    fn test_color_utilities() {
        let config = ThemeConfig::builtin();
        let names: Vec<String> = config.color_utilities().into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&"surface-on".to_string()));
        assert!(names.contains(&"ring".to_string()));
        assert_eq!(names.len(), 1 + 5 * 2 + 3);
    }

    #[test]
    fn test_animation_lookup() {
        let config = ThemeConfig::builtin();
        let parsed = config.animation("slide-out-left").unwrap().unwrap();
        assert_eq!(parsed[0].name.as_deref(), Some("slide-out-left"));
        assert_eq!(parsed[0].duration(), Some(std::time::Duration::from_millis(150)));
        assert!(config.animation("nope").is_none());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("theme.yaml");
        std::fs::write(&yaml, SAMPLE).unwrap();
        assert!(ThemeConfig::load(&yaml).is_ok());

        let toml = dir.path().join("theme.toml");
        std::fs::write(&toml, "").unwrap();
        assert!(ThemeConfig::load(&toml).is_err());

        let missing = dir.path().join("missing.json");
        assert!(ThemeConfig::load(&missing).is_err());
    }
}
