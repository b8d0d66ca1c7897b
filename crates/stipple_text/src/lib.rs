//! Font loading for Stipple
//!
//! This crate provides:
//! - A `FontFace` implementation over TrueType/OpenType data (via ttf-parser)
//! - A font registry that resolves families through fontdb and caches faces

pub mod font;
pub mod registry;

pub use font::TtfFont;
pub use registry::{FontRegistry, GenericFont};

use thiserror::Error;

/// Font loading errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoad(String),

    #[error("Failed to parse font: {0}")]
    FontParse(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
