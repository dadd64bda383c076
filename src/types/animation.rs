//! Animation shorthand parsing.
//!
//! Follows the CSS `animation` grammar: tokens may appear in any order, the
//! first time is the duration and the second the delay, and a keyword is
//! assigned to the first property that accepts it and is still unset.

use std::fmt;
use std::time::Duration;

use crate::error::{Result, ThemeError};

/// A CSS time value, kept in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Time {
    pub millis: f64,
}

impl Time {
    /// Parse `200ms`, `0.2s`, `.5s`, `-1s`.
    pub fn parse(s: &str) -> Option<Self> {
        let (number, scale) = if let Some(n) = s.strip_suffix("ms") {
            (n, 1.0)
        } else if let Some(n) = s.strip_suffix('s') {
            (n, 1000.0)
        } else {
            return None;
        };

        if number.is_empty() || !number.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        if !number
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
        {
            return None;
        }

        let value: f64 = number.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Time {
            millis: value * scale,
        })
    }

    /// As a `Duration`, if non-negative and representable.
    pub fn to_duration(self) -> Option<Duration> {
        if self.millis < 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(self.millis / 1000.0).ok()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

/// `animation-iteration-count`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationCount {
    Infinite,
    Count(f64),
}

/// `animation-direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl Direction {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Direction::Normal),
            "reverse" => Some(Direction::Reverse),
            "alternate" => Some(Direction::Alternate),
            "alternate-reverse" => Some(Direction::AlternateReverse),
            _ => None,
        }
    }
}

/// `animation-fill-mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    None,
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "none" => Some(FillMode::None),
            "forwards" => Some(FillMode::Forwards),
            "backwards" => Some(FillMode::Backwards),
            "both" => Some(FillMode::Both),
            _ => None,
        }
    }
}

/// `animation-play-state`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

const TIMING_KEYWORDS: &[&str] = &[
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "linear",
    "step-start",
    "step-end",
];

const TIMING_FUNCTIONS: &[&str] = &["cubic-bezier(", "steps(", "linear("];

/// One parsed animation from a shorthand value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationShorthand {
    /// Keyframe name. `None` when the shorthand names no keyframes.
    pub name: Option<String>,
    pub duration: Option<Time>,
    pub timing: Option<String>,
    pub delay: Option<Time>,
    pub iterations: Option<IterationCount>,
    pub direction: Option<Direction>,
    pub fill_mode: Option<FillMode>,
    pub play_state: Option<PlayState>,
}

impl AnimationShorthand {
    /// Parse a single animation (no top-level commas).
    pub fn parse(value: &str) -> Result<Self> {
        let tokens = split_top_level(value, char::is_whitespace)?;
        if tokens.is_empty() {
            return Err(ThemeError::Parse {
                message: "Empty animation shorthand".to_string(),
                help: Some("Expected e.g. 'fade-in 200ms ease-out forwards'".to_string()),
            });
        }

        let mut anim = AnimationShorthand::default();
        for token in tokens {
            anim.accept(token, value)?;
        }
        Ok(anim)
    }

    fn accept(&mut self, token: &str, value: &str) -> Result<()> {
        if let Some(time) = Time::parse(token) {
            if self.duration.is_none() {
                self.duration = Some(time);
            } else if self.delay.is_none() {
                self.delay = Some(time);
            } else {
                return Err(unexpected(token, value, "more than two time values"));
            }
            return Ok(());
        }

        if token.ends_with(')') {
            if self.timing.is_none() && TIMING_FUNCTIONS.iter().any(|f| token.starts_with(f)) {
                self.timing = Some(token.to_string());
                return Ok(());
            }
            return Err(unexpected(token, value, "unknown function"));
        }

        if self.timing.is_none() && TIMING_KEYWORDS.contains(&token) {
            self.timing = Some(token.to_string());
            return Ok(());
        }

        if self.iterations.is_none() {
            if token == "infinite" {
                self.iterations = Some(IterationCount::Infinite);
                return Ok(());
            }
            if let Ok(n) = token.parse::<f64>() {
                if n < 0.0 || !n.is_finite() {
                    return Err(unexpected(token, value, "iteration count must be non-negative"));
                }
                self.iterations = Some(IterationCount::Count(n));
                return Ok(());
            }
        }

        if self.direction.is_none() {
            if let Some(d) = Direction::from_keyword(token) {
                self.direction = Some(d);
                return Ok(());
            }
        }

        if self.fill_mode.is_none() {
            if let Some(m) = FillMode::from_keyword(token) {
                self.fill_mode = Some(m);
                return Ok(());
            }
        }

        if self.play_state.is_none() {
            match token {
                "running" => {
                    self.play_state = Some(PlayState::Running);
                    return Ok(());
                }
                "paused" => {
                    self.play_state = Some(PlayState::Paused);
                    return Ok(());
                }
                _ => {}
            }
        }

        if self.name.is_none() && is_ident(token) {
            // `none` in the name slot means "no keyframes"
            if token != "none" {
                self.name = Some(token.to_string());
            }
            return Ok(());
        }

        Err(unexpected(token, value, "unrecognised token"))
    }

    /// The duration as a `Duration`.
    pub fn duration(&self) -> Option<Duration> {
        self.duration.and_then(Time::to_duration)
    }
}

/// Parse a full `animation` value, which may hold a comma-separated list.
///
/// `none` yields an empty list.
pub fn parse_animation_list(value: &str) -> Result<Vec<AnimationShorthand>> {
    if value.trim() == "none" {
        return Ok(vec![]);
    }
    split_top_level(value, |c| c == ',')?
        .into_iter()
        .map(AnimationShorthand::parse)
        .collect()
}

fn unexpected(token: &str, value: &str, why: &str) -> ThemeError {
    ThemeError::Parse {
        message: format!("Invalid animation '{}': '{}' ({})", value.trim(), token, why),
        help: Some("Expected <name> <duration> [<timing>] [<delay>] [<count>] [<fill-mode>]".to_string()),
    }
}

/// Split at separator characters outside parentheses. Empty pieces are dropped.
fn split_top_level(value: &str, is_sep: impl Fn(char) -> bool) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| ThemeError::Parse {
                    message: format!("Unbalanced ')' in '{}'", value),
                    help: None,
                })?;
            }
            c if depth == 0 && is_sep(c) => {
                let piece = value[start..i].trim();
                if !piece.is_empty() {
                    parts.push(piece);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ThemeError::Parse {
            message: format!("Unbalanced '(' in '{}'", value),
            help: None,
        });
    }

    let piece = value[start..].trim();
    if !piece.is_empty() {
        parts.push(piece);
    }
    Ok(parts)
}

/// CSS identifier check, sufficient for keyframe names.
pub fn is_ident(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let a = AnimationShorthand::parse("slide-in-up 200ms ease-out forwards").unwrap();
        assert_eq!(a.name.as_deref(), Some("slide-in-up"));
        assert_eq!(a.duration, Some(Time { millis: 200.0 }));
        assert_eq!(a.timing.as_deref(), Some("ease-out"));
        assert_eq!(a.fill_mode, Some(FillMode::Forwards));
        assert_eq!(a.delay, None);
        assert_eq!(a.duration(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_parse_order_independent() {
        let a = AnimationShorthand::parse("infinite 1s linear spin").unwrap();
        assert_eq!(a.name.as_deref(), Some("spin"));
        assert_eq!(a.iterations, Some(IterationCount::Infinite));
        assert_eq!(a.duration().unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_delay_and_bezier() {
        let a = AnimationShorthand::parse("ping 1s cubic-bezier(0, 0, 0.2, 1) 0.5s infinite").unwrap();
        assert_eq!(a.timing.as_deref(), Some("cubic-bezier(0, 0, 0.2, 1)"));
        assert_eq!(a.delay, Some(Time { millis: 500.0 }));
    }

    #[test]
    fn test_keyword_that_is_also_a_name() {
        // First `none` fills fill-mode, the ident after is the name
        let a = AnimationShorthand::parse("none both 1s").unwrap();
        assert_eq!(a.fill_mode, Some(FillMode::None));
        assert_eq!(a.name.as_deref(), Some("both"));
    }

    #[test]
    fn test_reject_bad_time() {
        assert!(AnimationShorthand::parse("fade-in 200xs ease-in").is_err());
        assert!(AnimationShorthand::parse("fade-in 1s 2s 3s").is_err());
        assert!(AnimationShorthand::parse("fade-in 1s bogus(1)").is_err());
        assert!(AnimationShorthand::parse("fade-in 1s (").is_err());
        assert!(AnimationShorthand::parse("   ").is_err());
    }

    #[test]
    fn test_reject_two_names() {
        assert!(AnimationShorthand::parse("fade-in fade-out 1s").is_err());
    }

    #[test]
    fn test_parse_list() {
        let list = parse_animation_list("spin 1s linear infinite, fade-in 200ms").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name.as_deref(), Some("fade-in"));

        assert!(parse_animation_list("none").unwrap().is_empty());
    }

    #[test]
    fn test_time_parse() {
        assert_eq!(Time::parse(".5s").unwrap().millis, 500.0);
        assert_eq!(Time::parse("-1s").unwrap().millis, -1000.0);
        assert!(Time::parse("-1s").unwrap().to_duration().is_none());
        assert!(Time::parse("ms").is_none());
        assert!(Time::parse("ease").is_none());
        assert!(Time::parse("1e3ms").is_none());
        assert!(Time::parse(&format!("{}s", "9".repeat(400))).is_none());

        let huge = Time::parse("99999999999999999999999999s").unwrap();
        assert!(huge.to_duration().is_none());
    }
}
