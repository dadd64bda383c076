//! Glob patterns for content scanning.
//!
//! Supports `*`, `**`, `?`, `[abc]`/`[a-z]`/`[!a]`, and `{a,b}` alternation.
//! A leading `./` is ignored and a leading `!` marks an exclusion.

use std::path::{Component, Path};

use crate::error::{Result, ThemeError};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(char),
    Star,
    Question,
    Class { negated: bool, ranges: Vec<(char, char)> },
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// `**`
    AnyDepth,
    Part(Vec<Token>),
}

/// A compiled content pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    negated: bool,
    alternatives: Vec<Vec<Segment>>,
}

impl GlobPattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let source = pattern.to_string();
        let trimmed = pattern.trim();

        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let body = body.strip_prefix("./").unwrap_or(body);

        if body.is_empty() {
            return Err(invalid(pattern, "pattern is empty"));
        }
        if body.starts_with('/') {
            return Err(invalid(pattern, "absolute patterns are not supported"));
        }

        let alternatives = expand_braces(body)
            .map_err(|why| invalid(pattern, &why))?
            .iter()
            .map(|alt| compile(alt).map_err(|why| invalid(pattern, &why)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source,
            negated,
            alternatives,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether this pattern excludes matches (`!pattern`).
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Match a path relative to the project root. Negation is not applied.
    pub fn matches(&self, relative: &Path) -> bool {
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let parts: Vec<&str> = parts.iter().map(|s| s.as_str()).collect();

        self.alternatives
            .iter()
            .any(|segments| match_segments(segments, &parts))
    }
}

fn invalid(pattern: &str, why: &str) -> ThemeError {
    ThemeError::Parse {
        message: format!("Invalid content pattern '{}': {}", pattern, why),
        help: Some("Use patterns like ./src/**/*.{rs,html}".to_string()),
    }
}

/// Expand `{a,b}` groups into separate patterns.
fn expand_braces(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let Some(open) = pattern.find('{') else {
        if pattern.contains('}') {
            return Err("unmatched '}'".to_string());
        }
        return Ok(vec![pattern.to_string()]);
    };

    if pattern[..open].contains('}') {
        return Err("unmatched '}'".to_string());
    }

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        let i = open + i;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(i),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| "unmatched '{'".to_string())?;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(splits);
    bounds.push(close);

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let alt = &pattern[window[0] + 1..window[1]];
        for tail in expand_braces(&format!("{}{}{}", prefix, alt, suffix))? {
            expanded.push(tail);
        }
    }
    Ok(expanded)
}

fn compile(pattern: &str) -> std::result::Result<Vec<Segment>, String> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|segment| {
            if segment == "**" {
                Ok(Segment::AnyDepth)
            } else {
                compile_segment(segment).map(Segment::Part)
            }
        })
        .collect()
}

fn compile_segment(segment: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                // `a**b` behaves like `a*b` within a segment
                if tokens.last() != Some(&Token::Star) {
                    tokens.push(Token::Star);
                }
            }
            '?' => tokens.push(Token::Question),
            '[' => {
                let negated = matches!(chars.peek(), Some('!') | Some('^'));
                if negated {
                    chars.next();
                }

                let mut ranges = Vec::new();
                let mut closed = false;
                while let Some(start) = chars.next() {
                    if start == ']' && !ranges.is_empty() {
                        closed = true;
                        break;
                    }
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('-') {
                        match lookahead.next() {
                            Some(end) if end != ']' => {
                                chars.next();
                                chars.next();
                                ranges.push((start, end));
                                continue;
                            }
                            _ => {}
                        }
                    }
                    ranges.push((start, start));
                }
                if !closed {
                    return Err("unmatched '['".to_string());
                }
                tokens.push(Token::Class { negated, ranges });
            }
            ']' => return Err("unmatched ']'".to_string()),
            other => tokens.push(Token::Literal(other)),
        }
    }

    Ok(tokens)
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> bool {
    match segments.split_first() {
        None => parts.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            (0..=parts.len()).any(|skip| match_segments(rest, &parts[skip..]))
        }
        Some((Segment::Part(tokens), rest)) => match parts.split_first() {
            Some((part, remaining)) => {
                let chars: Vec<char> = part.chars().collect();
                match_tokens(tokens, &chars) && match_segments(rest, remaining)
            }
            None => false,
        },
    }
}

fn match_tokens(tokens: &[Token], text: &[char]) -> bool {
    match tokens.split_first() {
        None => text.is_empty(),
        Some((Token::Star, rest)) => (0..=text.len()).any(|i| match_tokens(rest, &text[i..])),
        Some((token, rest)) => match text.split_first() {
            Some((c, remaining)) => {
                let hit = match token {
                    Token::Literal(l) => l == c,
                    Token::Question => true,
                    Token::Class { negated, ranges } => {
                        let inside = ranges.iter().any(|(lo, hi)| lo <= c && c <= hi);
                        inside != *negated
                    }
                    Token::Star => unreachable!("handled above"),
                };
                hit && match_tokens(rest, remaining)
            }
            None => false,
        },
    }
}
