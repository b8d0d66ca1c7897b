//! TrueType/OpenType font face
//!
//! Everything the text engine asks for is extracted once at load time, so
//! the face owns no font data and lookups never reparse tables.

use rustc_hash::FxHashMap;
use stipple_core::{FontFace, GlyphId};
use ttf_parser::{name_id, Face};

use crate::{Result, TextError};

/// Parsed font face with horizontal metrics
#[derive(Debug, Clone)]
pub struct TtfFont {
    name: String,
    /// Unicode code point -> glyph
    cmap: FxHashMap<u32, GlyphId>,
    /// Horizontal advance per glyph, in font units
    advances: Vec<u16>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

impl TtfFont {
    /// Parse the first face in `data`
    pub fn from_data(data: &[u8]) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    /// Parse face `index` of a font collection
    pub fn from_data_with_index(data: &[u8], index: u32) -> Result<Self> {
        let face = Face::parse(data, index).map_err(|e| TextError::FontParse(e.to_string()))?;

        let mut cmap = FxHashMap::default();
        if let Some(table) = face.tables().cmap {
            for subtable in table.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|code_point| {
                    if let Some(glyph) = subtable.glyph_index(code_point) {
                        cmap.entry(code_point).or_insert(glyph.0);
                    }
                });
            }
        }

        let advances = (0..face.number_of_glyphs())
            .map(|id| face.glyph_hor_advance(ttf_parser::GlyphId(id)).unwrap_or(0))
            .collect();

        let name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::FAMILY && name.is_unicode())
            .find_map(|name| name.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        tracing::debug!(
            font = %name,
            glyphs = face.number_of_glyphs(),
            mapped = cmap.len(),
            "parsed font face"
        );

        Ok(Self {
            name,
            cmap,
            advances,
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
        })
    }

    /// Descender in font units (usually negative)
    pub fn descender(&self) -> i16 {
        self.descender
    }

    pub fn glyph_count(&self) -> usize {
        self.advances.len()
    }

    /// Check if the font maps `c` to a real glyph
    pub fn has_char(&self, c: char) -> bool {
        self.cmap.contains_key(&u32::from(c))
    }
}

impl FontFace for TtfFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        self.cmap.get(&u32::from(c)).copied().unwrap_or(0)
    }

    fn glyph_advance(&self, glyph: GlyphId) -> u16 {
        self.advances.get(glyph as usize).copied().unwrap_or(0)
    }

    fn ascent(&self) -> i16 {
        self.ascender
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}
