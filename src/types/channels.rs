//! HSL channel values as stored in theme stylesheets (`--primary: 222 47% 11%`).

use palette::{Hsl, IntoColor, LinSrgb, Srgb};

/// Hue, saturation and lightness as written in a custom property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslChannels {
    /// Degrees.
    pub hue: f32,
    /// 0.0..=1.0
    pub saturation: f32,
    /// 0.0..=1.0
    pub lightness: f32,
}

impl HslChannels {
    /// Parse `222 47% 11%`, `222deg 47% 11%`, `222, 47%, 11%` or the same
    /// wrapped in `hsl(...)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);

        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();
        let [hue, saturation, lightness] = parts.as_slice() else {
            return None;
        };

        let hue: f32 = hue.strip_suffix("deg").unwrap_or(hue).parse().ok()?;
        let saturation = parse_percent(saturation)?;
        let lightness = parse_percent(lightness)?;

        Some(Self {
            hue,
            saturation,
            lightness,
        })
    }

    /// WCAG relative luminance.
    pub fn relative_luminance(self) -> f32 {
        let hsl = Hsl::new(self.hue, self.saturation, self.lightness);
        let rgb: Srgb = hsl.into_color();
        let linear: LinSrgb = rgb.into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// WCAG contrast ratio between two colours, 1.0..=21.0.
    pub fn contrast_ratio(self, other: HslChannels) -> f32 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

fn parse_percent(s: &str) -> Option<f32> {
    let value: f32 = s.strip_suffix('%')?.parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_separated() {
        let c = HslChannels::parse("222 47% 11%").unwrap();
        assert_eq!(c.hue, 222.0);
        assert!((c.saturation - 0.47).abs() < 1e-6);
        assert!((c.lightness - 0.11).abs() < 1e-6);
    }

    #[test]
    fn test_parse_other_forms() {
        assert!(HslChannels::parse("210deg 40% 98%").is_some());
        assert!(HslChannels::parse("210, 40%, 98%").is_some());
        assert!(HslChannels::parse("hsl(210 40% 98%)").is_some());
    }

    #[test]
    fn test_parse_rejects() {
        assert!(HslChannels::parse("#ffffff").is_none());
        assert!(HslChannels::parse("210 40%").is_none());
        assert!(HslChannels::parse("210 40 98").is_none());
        assert!(HslChannels::parse("210 140% 98%").is_none());
    }

    #[test]
    fn test_contrast_black_white() {
        let black = HslChannels::parse("0 0% 0%").unwrap();
        let white = HslChannels::parse("0 0% 100%").unwrap();
        let ratio = black.contrast_ratio(white);
        assert!((ratio - 21.0).abs() < 0.01, "ratio was {}", ratio);
        assert!((white.contrast_ratio(white) - 1.0).abs() < 1e-4);
    }
}
