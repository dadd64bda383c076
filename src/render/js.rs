//! `tailwind.config.js` export.
//!
//! The config is converted to a JSON value and printed as a JavaScript
//! object literal, so the same theme can drive the upstream generator.

use serde_json::Value;

use crate::error::{Result, ThemeError};
use crate::types::ThemeConfig;

const HEADER: &str = "/** @type {import('tailwindcss').Config} */\n";

/// Render the config as a CommonJS `tailwind.config.js` module.
pub fn render_tailwind_config(config: &ThemeConfig) -> Result<String> {
    let value = serde_json::to_value(config).map_err(|e| ThemeError::Build {
        message: format!("Failed to convert config for export: {}", e),
        help: None,
    })?;

    let mut out = String::from(HEADER);
    out.push_str("module.exports = ");
    write_value(&mut out, &value, 0);
    out.push_str(";\n");
    Ok(out)
}

/// Whether a key can be written unquoted.
pub fn is_js_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (key, item) in map {
                indent(out, depth + 1);
                if is_js_identifier(key) {
                    out.push_str(key);
                } else {
                    out.push_str(&quote(key));
                }
                out.push_str(": ");
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push('}');
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            let parts: Vec<String> = items.iter().map(Value::to_string).collect();
            out.push('[');
            out.push_str(&parts.join(", "));
            out.push(']');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            for item in items {
                indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorRef, ColorToken, DarkMode, Keyframe};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identifier_keys() {
        assert!(is_js_identifier("primary"));
        assert!(is_js_identifier("DEFAULT"));
        assert!(is_js_identifier("$x_1"));
        assert!(!is_js_identifier("fade-in"));
        assert!(!is_js_identifier("0%"));
        assert!(!is_js_identifier(""));
    }

    #[test]
    fn test_render_small_config() {
        let mut config = ThemeConfig {
            content: vec!["./src/**/*.rs".to_string()],
            dark_mode: DarkMode::Class,
            ..Default::default()
        };
        config
            .theme
            .extend
            .colors
            .insert("primary".to_string(), ColorToken::hsl_pair("primary"));
        config.theme.extend.colors.insert(
            "muted".to_string(),
            ColorToken::Single(ColorRef::hsl_var("muted")),
        );
        config.theme.extend.keyframes.insert(
            "fade-in".to_string(),
            Keyframe::new()
                .step("0%", &[("opacity", "0")])
                .step("100%", &[("opacity", "1")]),
        );
        config
            .theme
            .extend
            .animation
            .insert("fade-in".to_string(), "fade-in 200ms ease-in-out forwards".to_string());

        let js = render_tailwind_config(&config).unwrap();
        let expected = r#"/** @type {import('tailwindcss').Config} */
module.exports = {
  content: ["./src/**/*.rs"],
  darkMode: "class",
  theme: {
    extend: {
      colors: {
        primary: {
          DEFAULT: "hsl(var(--primary))",
          on: "hsl(var(--primary-on))",
        },
        muted: "hsl(var(--muted))",
      },
      keyframes: {
        "fade-in": {
          "0%": {
            opacity: "0",
          },
          "100%": {
            opacity: "1",
          },
        },
      },
      animation: {
        "fade-in": "fade-in 200ms ease-in-out forwards",
      },
    },
  },
  plugins: [],
};
"#;
        assert_eq!(js, expected);
    }

    #[test]
    fn test_custom_dark_mode_is_a_pair() {
        let config = ThemeConfig {
            dark_mode: DarkMode::Custom("[data-mode=dark]".to_string()),
            ..Default::default()
        };
        let js = render_tailwind_config(&config).unwrap();
        assert!(js.contains(r#"darkMode: ["class", "[data-mode=dark]"],"#));
        assert!(js.contains("extend: {},"));
    }

    #[test]
    fn test_builtin_exports_every_section() {
        let js = render_tailwind_config(&ThemeConfig::builtin()).unwrap();
        assert!(js.starts_with(HEADER));
        assert!(js.contains(r#"content: ["./app/src/**/*.rs"],"#));
        assert!(js.contains(r#""slide-out-left": "slide-out-left 150ms ease-in forwards","#));
        assert!(js.ends_with("};\n"));
    }
}
