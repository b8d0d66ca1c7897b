//! Text layout engine
//!
//! Glyphs are laid out in text space: positions start at the caret and
//! accumulate advances, and the text matrix maps them into user space. The
//! caret is the translation of the text matrix and moves by the total
//! advance after every run.

use std::sync::Arc;

use stipple_core::{
    Affine2D, FontFace, Glyph, GlyphId, Matrix, Point, RenderBackend, Size, TextDrawingMode,
};
use tracing::{debug, trace};

use crate::context::Context;
use crate::error::Result;

impl<B: RenderBackend> Context<B> {
    /// Current font, if any
    pub fn font(&self) -> Option<&Arc<dyn FontFace>> {
        self.states.current().font.as_ref()
    }

    /// Bind `font` for subsequent text calls; `None` unbinds it
    pub fn set_font(&mut self, font: Option<Arc<dyn FontFace>>) {
        if let Some(face) = &font {
            debug!(font = face.name(), "binding font");
            self.backend.set_font_face(face);
        }
        self.states.current_mut().font = font;
    }

    /// Show `text` at the caret, one glyph per code point
    ///
    /// Without a font this does nothing.
    pub fn show_text(&mut self, text: &str) -> Result<()> {
        let Some(font) = self.font().cloned() else {
            trace!("show_text without a font");
            return Ok(());
        };
        let glyphs: Vec<GlyphId> = text.chars().map(|c| font.glyph_index(c)).collect();
        self.show_glyphs(&glyphs)
    }

    /// Show glyphs at the caret using the font's advances
    pub fn show_glyphs(&mut self, glyphs: &[GlyphId]) -> Result<()> {
        let Some(font) = self.font().cloned() else {
            return Ok(());
        };
        let state = self.states.current();
        let advances = font.advances(
            glyphs,
            state.font_size,
            &self.text_matrix,
            state.character_spacing,
        );
        self.show_glyphs_with_advances(glyphs, &advances)
    }

    /// Show glyphs at the caret with explicit text-space advances
    ///
    /// The caret moves by the sum of the advances.
    pub fn show_glyphs_with_advances(
        &mut self,
        glyphs: &[GlyphId],
        advances: &[Size],
    ) -> Result<()> {
        let mut pen = Size::ZERO;
        let positions: Vec<Point> = advances
            .iter()
            .take(glyphs.len())
            .map(|advance| {
                let position = Point::ZERO.offset_by(pen);
                pen += *advance;
                position
            })
            .collect();

        self.show_glyphs_at_positions(&glyphs[..positions.len()], &positions)?;

        let caret = self.text_position().offset_by(self.text_matrix.transform_size(pen));
        self.set_text_position(caret);
        Ok(())
    }

    /// Show glyphs at text-space `positions`, relative to the caret
    ///
    /// This does not move the caret.
    pub fn show_glyphs_at_positions(
        &mut self,
        glyphs: &[GlyphId],
        positions: &[Point],
    ) -> Result<()> {
        let Some(font) = self.font().cloned() else {
            return Ok(());
        };
        let state = self.states.current();
        let (font_size, mode) = (state.font_size, state.text_drawing_mode);

        let placed: Vec<Glyph> = glyphs
            .iter()
            .zip(positions)
            .map(|(&glyph, &position)| {
                let (x, y): (f64, f64) = self.text_matrix.transform_point(position).into();
                Glyph {
                    index: glyph as u64,
                    x,
                    y,
                }
            })
            .collect();
        if placed.is_empty() {
            return Ok(());
        }

        // Glyph space to user space: the text matrix's linear part, then the
        // font size, with the origin dropped to the ascender.
        let ascent = font.scaled_ascent(font_size);
        let font_matrix = self
            .text_matrix
            .linear()
            .then(&Affine2D::new(font_size, 0.0, 0.0, font_size, 0.0, ascent));
        let font_matrix = Matrix::from(font_matrix);
        if font_matrix.invert().is_none() {
            trace!(font_size, "degenerate font matrix, nothing to show");
            return Ok(());
        }
        self.backend.set_font_matrix(&font_matrix);
        trace!(count = placed.len(), ?mode, "showing glyphs");

        if mode == TextDrawingMode::Fill {
            let source = self.fill_source();
            self.backend.set_source(&source);
            for glyph in placed {
                self.backend.show_glyph(glyph);
            }
            return self.check_status();
        }
        if !(mode.fills() || mode.strokes() || mode.clips()) {
            return self.check_status();
        }

        // Outline modes work on the glyph path; the caller's path is put back.
        let saved_path = self.backend.copy_path();
        self.backend.new_path();
        self.backend.glyph_path(&placed);
        if mode.fills() {
            let source = self.fill_source();
            self.backend.set_source(&source);
            self.backend.fill_preserve();
        }
        if mode.strokes() {
            let source = self.stroke_source();
            self.backend.set_source(&source);
            self.backend.stroke_preserve();
        }
        if mode.clips() {
            self.backend.clip();
        }
        self.replay_raw_path(&saved_path);
        self.check_status()
    }

    /// Show `text` through the backend's own text API
    ///
    /// The backend lays the text out; its cursor movement is added to the
    /// caret and the previous current point is put back.
    pub fn show_toy_text(&mut self, text: &str) -> Result<()> {
        let font_matrix = Matrix::from(
            self.text_matrix.then(&Affine2D::scale(self.font_size(), self.font_size())),
        );
        if font_matrix.invert().is_none() {
            trace!(font_size = self.font_size(), "degenerate font matrix, nothing to show");
            return Ok(());
        }

        let previous = self.backend.current_point();
        self.backend.move_to(0.0, 0.0);
        self.backend.set_font_matrix(&font_matrix);
        let source = self.fill_source();
        self.backend.set_source(&source);
        self.backend.show_text(text);

        let delta = self.backend.current_point().map(Point::from).unwrap_or(Point::ZERO);
        let caret = self.text_position() + delta;
        self.set_text_position(caret);

        match previous {
            Some((x, y)) => self.backend.move_to(x, y),
            None => self.backend.new_path(),
        }
        self.check_status()
    }
}
