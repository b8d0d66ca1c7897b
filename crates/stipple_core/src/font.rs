//! Font collaborator seam
//!
//! The text engine needs only glyph lookup and horizontal metrics; shaping,
//! hinting and rasterization stay with the font implementation and backend.

use std::fmt;

use crate::geometry::{Affine2D, Size};

/// Glyph index within a font
pub type GlyphId = u16;

/// Metrics source for the text engine
pub trait FontFace: fmt::Debug + Send + Sync {
    /// Family or PostScript name, used by backends to select a face
    fn name(&self) -> &str;

    /// Glyph for a code point; `0` (`.notdef`) when the font has none
    fn glyph_index(&self, c: char) -> GlyphId;

    /// Horizontal advance in font units
    fn glyph_advance(&self, glyph: GlyphId) -> u16;

    /// Ascender in font units
    fn ascent(&self) -> i16;

    fn units_per_em(&self) -> u16;

    /// Text-space advances for a run of glyphs
    ///
    /// Each advance is the glyph's horizontal advance scaled to `font_size`
    /// plus `character_spacing`. The text matrix is supplied for faces whose
    /// metrics depend on it; the default implementation does not use it.
    fn advances(
        &self,
        glyphs: &[GlyphId],
        font_size: f32,
        _text_matrix: &Affine2D,
        character_spacing: f32,
    ) -> Vec<Size> {
        let units_per_em = self.units_per_em().max(1) as f32;
        glyphs
            .iter()
            .map(|&glyph| {
                let advance = self.glyph_advance(glyph) as f32 * font_size / units_per_em;
                Size::new(advance + character_spacing, 0.0)
            })
            .collect()
    }

    /// Ascender scaled to `font_size`
    fn scaled_ascent(&self, font_size: f32) -> f32 {
        self.ascent() as f32 * font_size / self.units_per_em().max(1) as f32
    }
}
