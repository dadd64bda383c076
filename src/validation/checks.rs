//! Validation checks for theme configs.
//!
//! Each check takes the config (and, for project checks, the scanned
//! content or parsed stylesheet) and returns a `ValidationResult`.

use std::collections::HashSet;

use crate::discovery::{ContentScan, GlobPattern};
use crate::error::ThemeError;
use crate::parser::{Scheme, Stylesheet};
use crate::types::{
    css_property_name, is_known_property, is_valid_property_name, parse_animation_list,
    parse_offset_selector, HslChannels, ThemeConfig, DEFAULT_KEY, ON_KEY,
};

use super::warning::{Diagnostic, ValidationResult};

/// Minimum WCAG contrast ratio for body text.
pub const MIN_CONTRAST: f32 = 4.5;

/// Check that the content scan set is non-empty and every pattern compiles.
pub fn check_content(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if config.content.iter().all(|p| p.trim().starts_with('!')) {
        result.push(
            Diagnostic::error("empty-content", "No content patterns are configured")
                .with_help("Add patterns like ./src/**/*.rs so used classes can be found"),
        );
    }

    for pattern in &config.content {
        if let Err(e) = GlobPattern::new(pattern) {
            result.push(Diagnostic::error("invalid-glob", error_message(e)));
        }
    }

    result
}

/// Check that every animation parses and names a defined keyframe.
pub fn check_animation_refs(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, value) in config.animations() {
        let animations = match parse_animation_list(value) {
            Ok(list) => list,
            Err(e) => {
                result.push(
                    Diagnostic::error(
                        "invalid-animation",
                        format!("Animation '{}': {}", name, error_message(e)),
                    )
                    .with_help("Expected e.g. 'fade-in 200ms ease-out forwards'"),
                );
                continue;
            }
        };

        for animation in animations {
            let Some(keyframe) = animation.name else {
                continue;
            };
            if config.keyframe(&keyframe).is_none() {
                result.push(
                    Diagnostic::error(
                        "missing-keyframe",
                        format!(
                            "Animation '{}' references keyframe '{}' which does not exist",
                            name, keyframe
                        ),
                    )
                    .with_help("Define it under theme.extend.keyframes"),
                );
            }
        }
    }

    result
}

/// Check keyframe offsets and property names.
pub fn check_keyframes(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, keyframe) in config.keyframes() {
        for (selector, block) in keyframe.steps() {
            if let Err(e) = parse_offset_selector(selector) {
                result.push(
                    Diagnostic::error(
                        "invalid-offset",
                        format!("Keyframe '{}': {}", name, error_message(e)),
                    )
                    .with_help("Use 'from', 'to', or a percentage between 0% and 100%"),
                );
            }

            for property in block.keys() {
                if !is_valid_property_name(property) {
                    result.push(Diagnostic::error(
                        "invalid-property",
                        format!(
                            "Keyframe '{}' at '{}': '{}' is not a valid property name",
                            name, selector, property
                        ),
                    ));
                } else if !is_known_property(&css_property_name(property)) {
                    result.push(Diagnostic::warning(
                        "unknown-property",
                        format!(
                            "Keyframe '{}' at '{}': '{}' is not a known CSS property",
                            name, selector, property
                        ),
                    ));
                }
            }
        }
    }

    result
}

/// Check that `DEFAULT`/`on` pairs are complete and follow the variable
/// naming convention.
pub fn check_color_pairs(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (role, token) in config.colors() {
        if !token.is_scheme() {
            continue;
        }

        match (token.shade(DEFAULT_KEY), token.on()) {
            (Some(default), Some(on)) => {
                if let (Some(bg), Some(fg)) = (default.var_name(), on.var_name()) {
                    let expected = format!("{}-on", bg);
                    if fg != expected {
                        result.push(
                            Diagnostic::warning(
                                "var-naming",
                                format!(
                                    "Colour '{}': 'on' uses {} but {} is expected",
                                    role, fg, expected
                                ),
                            )
                            .with_help("Name foreground variables <background>-on"),
                        );
                    }
                }
            }
            (Some(_), None) => result.push(
                Diagnostic::error(
                    "incomplete-pair",
                    format!("Colour '{}' has {} but no '{}'", role, DEFAULT_KEY, ON_KEY),
                )
                .with_help(format!("Add on: hsl(var(--{}-on))", role)),
            ),
            (None, Some(_)) => result.push(
                Diagnostic::error(
                    "incomplete-pair",
                    format!("Colour '{}' has '{}' but no {}", role, ON_KEY, DEFAULT_KEY),
                )
                .with_help(format!("Add DEFAULT: hsl(var(--{}))", role)),
            ),
            (None, None) => {}
        }
    }

    result
}

/// Warn about colour values that are literals rather than variable references.
pub fn check_literal_colors(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (suffix, color) in config.color_utilities() {
        if color.is_literal() {
            result.push(
                Diagnostic::warning(
                    "literal-color",
                    format!("Colour '{}' is the literal '{}'", suffix, color),
                )
                .with_help("Reference a custom property, e.g. hsl(var(--name))"),
            );
        }
    }

    result
}

/// Warn about keyframes no animation uses.
pub fn check_unused_keyframes(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    let used: HashSet<String> = config
        .animations()
        .keys()
        .flat_map(|name| config.keyframes_for_animation(name))
        .collect();

    for name in config.keyframes().keys() {
        if !used.contains(name) {
            result.push(Diagnostic::warning(
                "unused-keyframe",
                format!("Keyframe '{}' is not used by any animation", name),
            ));
        }
    }

    result
}

/// Warn that plugins are recorded but never run.
pub fn check_plugins(config: &ThemeConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !config.plugins.is_empty() {
        result.push(
            Diagnostic::warning(
                "plugins-ignored",
                format!(
                    "{} plugin(s) configured ({}); plugins are not executed",
                    config.plugins.len(),
                    config.plugins.join(", ")
                ),
            )
            .with_help("Export to tailwind.config.js to use plugins with the upstream generator"),
        );
    }

    result
}

/// Warn about content patterns that match no file.
pub fn check_content_matches(scan: &ContentScan) -> ValidationResult {
    let mut result = ValidationResult::new();

    for pattern in scan.unmatched_patterns() {
        result.push(
            Diagnostic::warning(
                "unmatched-content",
                format!("Content pattern '{}' matches no files", pattern),
            )
            .with_help("Patterns are relative to the directory holding the config"),
        );
    }

    result
}

/// Check that every referenced custom property is defined in the stylesheet.
pub fn check_defined_vars(config: &ThemeConfig, stylesheet: &Stylesheet) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (suffix, color) in config.color_utilities() {
        let Some(var) = color.var_name() else {
            continue;
        };
        if !stylesheet.is_defined(var) {
            result.push(
                Diagnostic::error(
                    "undefined-var",
                    format!("Colour '{}' references {} which the stylesheet does not define", suffix, var),
                )
                .with_help(format!("Add `{}: <h> <s>% <l>%;` to :root", var)),
            );
        }
    }

    result
}

/// Warn about `DEFAULT`/`on` pairs with poor contrast.
///
/// Only pairs whose variables hold HSL channel values can be checked.
pub fn check_contrast(config: &ThemeConfig, stylesheet: &Stylesheet) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut schemes = vec![Scheme::Light];
    if stylesheet.has_dark_scheme() {
        schemes.push(Scheme::Dark);
    }

    for (role, token) in config.colors() {
        let (Some(bg), Some(fg)) = (
            token.default_value().and_then(|c| c.var_name()),
            token.on().and_then(|c| c.var_name()),
        ) else {
            continue;
        };

        for &scheme in &schemes {
            let channels = |var: &str| stylesheet.value(var, scheme).and_then(HslChannels::parse);
            let (Some(bg_value), Some(fg_value)) = (channels(bg), channels(fg)) else {
                continue;
            };

            let ratio = bg_value.contrast_ratio(fg_value);
            if ratio < MIN_CONTRAST {
                let label = match scheme {
                    Scheme::Light => "light",
                    Scheme::Dark => "dark",
                };
                result.push(
                    Diagnostic::warning(
                        "low-contrast",
                        format!(
                            "Colour '{}' has {:.2}:1 contrast between {} and {} in the {} scheme",
                            role, ratio, DEFAULT_KEY, ON_KEY, label
                        ),
                    )
                    .with_help(format!("Aim for at least {}:1", MIN_CONTRAST)),
                );
            }
        }
    }

    result
}

fn error_message(e: ThemeError) -> String {
    match e {
        ThemeError::Parse { message, .. } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorRef, ColorToken, DarkMode, Keyframe};
    use indexmap::IndexMap;

    fn config_with_animation(value: &str) -> ThemeConfig {
        let mut config = ThemeConfig::builtin();
        config
            .theme
            .extend
            .animation
            .insert("custom".to_string(), value.to_string());
        config
    }

    #[test]
    fn test_builtin_passes_every_config_check() {
        let config = ThemeConfig::builtin();
        for result in [
            check_content(&config),
            check_animation_refs(&config),
            check_keyframes(&config),
            check_color_pairs(&config),
            check_literal_colors(&config),
            check_unused_keyframes(&config),
            check_plugins(&config),
        ] {
            assert!(result.is_ok(), "{:?}", result);
        }
    }

    #[test]
    fn test_empty_content() {
        let mut config = ThemeConfig::builtin();
        config.content.clear();
        assert!(check_content(&config).has_errors());

        config.content = vec!["!**/*.test.rs".to_string()];
        assert!(check_content(&config).has_errors());
    }

    #[test]
    fn test_invalid_glob() {
        let mut config = ThemeConfig::builtin();
        config.content.push("src/{a,b".to_string());
        let result = check_content(&config);
        assert_eq!(result.by_check("invalid-glob").count(), 1);
    }

    #[test]
    fn test_missing_keyframe() {
        let config = config_with_animation("wiggle 1s ease-in-out infinite");
        let result = check_animation_refs(&config);
        assert_eq!(result.by_check("missing-keyframe").count(), 1);
    }

    #[test]
    fn test_invalid_animation() {
        let config = config_with_animation("fade-in 200xs ease-in");
        let result = check_animation_refs(&config);
        assert_eq!(result.by_check("invalid-animation").count(), 1);
    }

    #[test]
    fn test_animation_none_is_fine() {
        let config = config_with_animation("none");
        assert!(check_animation_refs(&config).is_ok());
    }

    #[test]
    fn test_invalid_offset_and_property() {
        let mut config = ThemeConfig::builtin();
        config.theme.extend.keyframes.insert(
            "fade-in".to_string(),
            Keyframe::new()
                .step("start", &[("opacity", "0")])
                .step("150%", &[("opacity", "1")])
                .step("100%", &[("1bad", "1"), ("opactiy", "1")]),
        );

        let result = check_keyframes(&config);
        assert_eq!(result.by_check("invalid-offset").count(), 2);
        assert_eq!(result.by_check("invalid-property").count(), 1);
        assert_eq!(result.by_check("unknown-property").count(), 1);
    }

    #[test]
    fn test_incomplete_pair() {
        let mut config = ThemeConfig::builtin();
        let mut shades = IndexMap::new();
        shades.insert("DEFAULT".to_string(), ColorRef::hsl_var("warning"));
        config
            .theme
            .extend
            .colors
            .insert("warning".to_string(), ColorToken::Scheme(shades));

        let mut shades = IndexMap::new();
        shades.insert("on".to_string(), ColorRef::hsl_var("info-on"));
        config
            .theme
            .extend
            .colors
            .insert("info".to_string(), ColorToken::Scheme(shades));

        let result = check_color_pairs(&config);
        assert_eq!(result.by_check("incomplete-pair").count(), 2);
        assert!(result.has_errors());
    }

    #[test]
    fn test_scheme_without_pair_keys_is_fine() {
        let mut config = ThemeConfig::builtin();
        let mut shades = IndexMap::new();
        shades.insert("50".to_string(), ColorRef::hsl_var("brand-50"));
        shades.insert("900".to_string(), ColorRef::hsl_var("brand-900"));
        config
            .theme
            .extend
            .colors
            .insert("brand".to_string(), ColorToken::Scheme(shades));

        assert!(check_color_pairs(&config).is_ok());
    }

    #[test]
    fn test_var_naming() {
        let mut config = ThemeConfig::builtin();
        let mut shades = IndexMap::new();
        shades.insert("DEFAULT".to_string(), ColorRef::hsl_var("primary"));
        shades.insert("on".to_string(), ColorRef::hsl_var("primary-foreground"));
        config
            .theme
            .extend
            .colors
            .insert("primary".to_string(), ColorToken::Scheme(shades));

        let result = check_color_pairs(&config);
        assert_eq!(result.by_check("var-naming").count(), 1);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_literal_color() {
        let mut config = ThemeConfig::builtin();
        config.theme.extend.colors.insert(
            "brand".to_string(),
            ColorToken::Single(ColorRef::parse("#ff00ff")),
        );
        assert_eq!(check_literal_colors(&config).warning_count(), 1);
    }

    #[test]
    fn test_unused_keyframe() {
        let mut config = ThemeConfig::builtin();
        config.theme.extend.animation.shift_remove("fade-out");
        let result = check_unused_keyframes(&config);
        let messages: Vec<&str> = result.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["Keyframe 'fade-out' is not used by any animation"]);
    }

    #[test]
    fn test_plugins_ignored() {
        let mut config = ThemeConfig::builtin();
        config.plugins.push("@tailwindcss/forms".to_string());
        assert_eq!(check_plugins(&config).by_check("plugins-ignored").count(), 1);
    }

    #[test]
    fn test_defined_vars() {
        let config = ThemeConfig::builtin();
        let sheet = Stylesheet::parse(":root { --primary: 0 0% 0%; }", &DarkMode::Class).unwrap();

        let result = check_defined_vars(&config, &sheet);
        // 14 colour utilities, one defined
        assert_eq!(result.error_count(), 13);
    }

    #[test]
    fn test_contrast() {
        let mut config = ThemeConfig::builtin();
        config.theme.extend.colors.retain(|role, _| role == "primary");

        let css = r#"
            :root { --primary: 222 47% 11%; --primary-on: 210 40% 98%; }
            .dark { --primary: 210 40% 98%; --primary-on: 210 40% 90%; }
        "#;
        let sheet = Stylesheet::parse(css, &DarkMode::Class).unwrap();

        let result = check_contrast(&config, &sheet);
        assert_eq!(result.warning_count(), 1);
        let d = result.iter().next().unwrap();
        assert!(d.message.contains("dark scheme"), "{}", d.message);
    }
}
