//! Scene Demo
//!
//! Draws a small scene (shadowed card, translucent layer, tangent-rounded
//! outline and a line of text) into the recording backend, then prints the
//! backend calls as JSON.
//!
//! Run with `RUST_LOG=stipple_paint=trace` to see the context's tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use stipple_core::{
    Color, DrawingMode, FontFace, GlyphId, LineJoin, Point, RecordingBackend, Rect, Shadow, Size,
};
use stipple_paint::{Context, ContextConfig};
use stipple_text::{FontRegistry, GenericFont};
use tracing_subscriber::EnvFilter;

/// Monospaced stand-in for machines without system fonts: every glyph is
/// 0.6 em wide
#[derive(Debug)]
struct DemoFace;

impl FontFace for DemoFace {
    fn name(&self) -> &str {
        "Demo Mono"
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        u16::try_from(u32::from(c)).unwrap_or(0)
    }

    fn glyph_advance(&self, _glyph: GlyphId) -> u16 {
        1229
    }

    fn ascent(&self) -> i16 {
        1638
    }

    fn units_per_em(&self) -> u16 {
        2048
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ContextConfig::new().with_line_width(2.0).with_font_size(14.0);
    let mut ctx = Context::with_config(RecordingBackend::new(), Size::new(320.0, 200.0), config)?;

    ctx.begin_page()?;

    // Card with a drop shadow
    ctx.save()?;
    ctx.set_fill_color(Color::from_hex(0xF5F5F7));
    ctx.set_stroke_color(Color::from_hex(0x1C1C1E));
    ctx.set_shadow(Some(Shadow::new(
        Size::new(3.0, 4.0),
        8.0,
        Color::rgba(0.0, 0.0, 0.0, 0.35),
    )));
    ctx.add_rect(Rect::new(20.0, 20.0, 180.0, 110.0));
    ctx.draw_path(DrawingMode::FillStroke)?;
    ctx.restore()?;

    // Translucent overlay clipped to the card
    ctx.save()?;
    ctx.set_alpha(0.6);
    ctx.begin_transparency_layer(Some(Rect::new(20.0, 20.0, 180.0, 110.0)))?;
    ctx.set_fill_color(Color::from_hex(0x0A84FF));
    ctx.add_arc(Point::new(190.0, 120.0), 60.0, 0.0, 2.0 * PI, false);
    ctx.fill_path()?;
    ctx.end_transparency_layer()?;
    ctx.restore()?;

    // Outline with rounded corners from tangent arcs
    ctx.set_line_join(LineJoin::Round);
    ctx.move_to(Point::new(230.0, 40.0));
    ctx.add_arc_to(Point::new(300.0, 40.0), Point::new(300.0, 110.0), 12.0);
    ctx.add_arc_to(Point::new(300.0, 110.0), Point::new(230.0, 110.0), 12.0);
    ctx.add_quad_curve_to(Point::new(230.0, 40.0), Point::new(215.0, 75.0));
    ctx.close_path();
    ctx.stroke_path()?;

    // Caption
    let font: Arc<dyn FontFace> = match FontRegistry::new().load_generic(GenericFont::SansSerif) {
        Ok(face) => face,
        Err(e) => {
            tracing::warn!("{e}, using the built-in demo face");
            Arc::new(DemoFace)
        }
    };
    ctx.set_font(Some(font));
    ctx.set_fill_color(Color::BLACK);
    ctx.set_text_position(Point::new(24.0, 150.0));
    ctx.show_text("stipple")?;
    tracing::info!(caret = ?ctx.text_position(), "caption laid out");

    ctx.end_page()?;
    ctx.flush()?;

    let backend = ctx.into_backend();
    println!("{}", serde_json::to_string_pretty(backend.ops())?);
    Ok(())
}
