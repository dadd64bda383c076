//! Rendering module for tokenwind.
//!
//! Converts a theme config into utility CSS, or exports it as a
//! `tailwind.config.js` module for the upstream generator.

mod css;
mod js;

pub use css::{selector, CssRenderer, RenderOptions, RenderedCss, COLOR_PREFIXES};
pub use js::{is_js_identifier, render_tailwind_config};
