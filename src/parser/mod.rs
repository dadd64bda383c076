//! Parsers for the files around a theme config.
//!
//! The config itself is plain serde data (see `ThemeConfig::load`). This
//! module handles the two other inputs a build reads:
//!
//! - stylesheets, for the custom properties the colour tokens point at
//! - content files, for the class names actually in use
//!
//! # Usage
//!
//! ```ignore
//! use tokenwind::parser::{extract_candidates, Stylesheet};
//!
//! let sheet = Stylesheet::load("styles/theme.css".as_ref(), &config.dark_mode)?;
//! assert!(sheet.is_defined("--primary"));
//! ```

mod candidates;
mod stylesheet;

pub use candidates::{extract_candidates, extract_from_files};
pub use stylesheet::{Scheme, Stylesheet, VarDefinition};
