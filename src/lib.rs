//! tokenwind - Theme token configs and utility CSS
//!
//! A library for loading and validating design-token theme configs
//! (colours backed by CSS custom properties, keyframes, animations, dark
//! mode) and generating the utility CSS a project actually uses.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{discover, resolve_project, scan_content, ConfigSource, ContentScan, GlobPattern, Project};
pub use error::{Result, ThemeError};
pub use parser::{extract_candidates, Stylesheet};
pub use render::{render_tailwind_config, CssRenderer, RenderOptions, RenderedCss};
pub use types::{
    AnimationShorthand, ColorRef, ColorToken, ConfigFormat, DarkMode, HslChannels, Keyframe,
    KeyframeOffset, ThemeConfig,
};
pub use validation::{validate_config, validate_project, Diagnostic, ProjectContext, Severity, ValidationResult};
