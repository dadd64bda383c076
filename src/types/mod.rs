//! Core domain types for tokenwind.
//!
//! - `ThemeConfig` - the configuration record
//! - `ColorRef` / `ColorToken` - colour tokens backed by custom properties
//! - `Keyframe` / `KeyframeOffset` - animation keyframes
//! - `AnimationShorthand` - parsed `animation` values
//! - `DarkMode` - dark variant activation strategy
//! - `HslChannels` - stylesheet channel values for contrast checks

mod animation;
mod channels;
mod colour;
mod config;
mod dark_mode;
mod keyframes;

pub use animation::{
    is_ident, parse_animation_list, AnimationShorthand, Direction, FillMode, IterationCount,
    PlayState, Time,
};
pub use channels::HslChannels;
pub use colour::{
    is_custom_property, ColorFunction, ColorRef, ColorToken, ALPHA_PLACEHOLDER, DEFAULT_KEY, ON_KEY,
};
pub use config::{ConfigFormat, ThemeConfig, ThemeExtension, ThemeSection};
pub use dark_mode::{DarkMode, DARK_CLASS};
pub use keyframes::{
    css_property_name, is_known_property, is_valid_property_name, parse_offset_selector, Keyframe,
    KeyframeOffset, StyleBlock, StyleValue,
};
