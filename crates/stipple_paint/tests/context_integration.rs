//! Integration tests for the drawing context over the recording backend
//!
//! These tests verify that:
//! - save/restore round-trips every context attribute
//! - restore underflow is reported and leaves state alone
//! - curve synthesis emits the expected cubic control points
//! - paint, shadow and text calls reach the backend in the expected order
//! - backend failures surface as errors

use std::sync::Arc;

use stipple_core::{
    Affine2D, BackendOp, Color, DrawingMode, FillRule, FontFace, GlyphId, PathElement, Point,
    RecordingBackend, Rect, RenderBackend, Shadow, Size, Status, TextDrawingMode,
};
use stipple_paint::{Context, ContextError};

#[derive(Debug)]
struct StubFace;

impl FontFace for StubFace {
    fn name(&self) -> &str {
        "Stub"
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        if c.is_ascii() {
            c as GlyphId
        } else {
            0
        }
    }

    fn glyph_advance(&self, _glyph: GlyphId) -> u16 {
        600
    }

    fn ascent(&self) -> i16 {
        750
    }

    fn units_per_em(&self) -> u16 {
        1000
    }
}

fn context() -> Context<RecordingBackend> {
    let mut ctx =
        Context::new(RecordingBackend::new(), Size::new(100.0, 100.0)).expect("context");
    ctx.backend_mut().clear_ops();
    ctx
}

/// Everything the state stack carries, in comparable form
#[derive(Debug, PartialEq)]
struct Snapshot {
    alpha: f32,
    fill: Option<Color>,
    stroke: Option<Color>,
    font: Option<String>,
    font_size: f32,
    character_spacing: f32,
    text_drawing_mode: TextDrawingMode,
    shadow: Option<Shadow>,
}

fn snapshot(ctx: &Context<RecordingBackend>) -> Snapshot {
    Snapshot {
        alpha: ctx.alpha(),
        fill: ctx.fill_color(),
        stroke: ctx.stroke_color(),
        font: ctx.font().map(|f| f.name().to_string()),
        font_size: ctx.font_size(),
        character_spacing: ctx.character_spacing(),
        text_drawing_mode: ctx.text_drawing_mode(),
        shadow: ctx.shadow(),
    }
}

fn mutate_everything(ctx: &mut Context<RecordingBackend>) {
    ctx.set_fill_color(Color::GREEN);
    ctx.set_stroke_color(Color::BLUE);
    ctx.set_alpha(0.3);
    ctx.set_font(Some(Arc::new(StubFace)));
    ctx.set_font_size(42.0);
    ctx.set_character_spacing(2.0);
    ctx.set_text_drawing_mode(TextDrawingMode::FillStroke);
    ctx.set_shadow(Some(Shadow::new(Size::new(1.0, 2.0), 3.0, Color::BLACK)));
}

#[test]
fn test_save_restore_round_trips_every_attribute() {
    let mut ctx = context();
    ctx.set_fill_color(Color::RED);
    ctx.set_font_size(12.0);
    let before = snapshot(&ctx);

    ctx.save().expect("save");
    mutate_everything(&mut ctx);
    assert_ne!(snapshot(&ctx), before);
    ctx.restore().expect("restore");

    assert_eq!(snapshot(&ctx), before);
}

#[test]
fn test_restore_without_save_fails_and_keeps_state() {
    let mut ctx = context();
    ctx.set_alpha(0.7);
    let before = snapshot(&ctx);

    assert_eq!(ctx.restore(), Err(ContextError::InvalidRestore));
    assert_eq!(snapshot(&ctx), before);
    assert_eq!(ctx.backend().status(), Status::Success);
}

#[test]
fn test_nested_saves_unwind_to_root() {
    const DEPTH: usize = 5;
    let mut ctx = context();
    let root = snapshot(&ctx);

    for level in 0..DEPTH {
        ctx.save().expect("save");
        ctx.set_font_size(level as f32 + 1.0);
        ctx.set_alpha(1.0 / (level as f32 + 2.0));
    }
    assert_eq!(ctx.save_depth(), DEPTH);

    for _ in 0..DEPTH {
        ctx.restore().expect("restore");
    }
    assert_eq!(snapshot(&ctx), root);
    assert_eq!(ctx.restore(), Err(ContextError::InvalidRestore));
}

#[test]
fn test_quad_curve_matches_degree_elevation() {
    let cases = [
        (Point::new(0.0, 0.0), Point::new(30.0, 60.0), Point::new(90.0, 0.0)),
        (Point::new(-12.0, 7.5), Point::new(3.0, -9.0), Point::new(42.0, 18.0)),
        (Point::new(5.0, 5.0), Point::new(5.0, 5.0), Point::new(5.0, 5.0)),
    ];

    for (start, control, end) in cases {
        let mut ctx = context();
        ctx.move_to(start);
        ctx.add_quad_curve_to(end, control);

        let PathElement::CurveTo {
            control1,
            control2,
            end: emitted_end,
        } = ctx.current_path().elements()[1]
        else {
            panic!("expected a cubic");
        };
        let expected1 = Point::new(
            (start.x + 2.0 * control.x) / 3.0,
            (start.y + 2.0 * control.y) / 3.0,
        );
        let expected2 = Point::new(
            (2.0 * control.x + end.x) / 3.0,
            (2.0 * control.y + end.y) / 3.0,
        );
        assert!(control1.distance(expected1) < 1e-4, "{control1:?} vs {expected1:?}");
        assert!(control2.distance(expected2) < 1e-4, "{control2:?} vs {expected2:?}");
        assert_eq!(emitted_end, end);
    }
}

#[test]
fn test_tangent_arc_degenerate_cases() {
    let mut ctx = context();
    ctx.move_to(Point::new(0.0, 0.0));
    ctx.add_arc_to(Point::new(5.0, 5.0), Point::new(10.0, 10.0), 4.0);
    assert_eq!(
        ctx.current_path().elements().last(),
        Some(&PathElement::LineTo(Point::new(5.0, 5.0)))
    );

    let before = ctx.current_path();
    ctx.add_arc_to(Point::new(5.0, 5.0), Point::new(0.0, 10.0), 4.0);
    assert_eq!(ctx.current_path(), before);
}

#[test]
fn test_arc_direction_selects_backend_primitive() {
    let mut ctx = context();
    ctx.add_arc(Point::new(50.0, 50.0), 10.0, 0.0, 1.0, false);
    ctx.add_arc(Point::new(50.0, 50.0), 10.0, 1.0, 0.0, true);

    let arcs: Vec<_> = ctx
        .backend_mut()
        .take_ops()
        .into_iter()
        .filter(|op| matches!(op, BackendOp::Arc { .. } | BackendOp::ArcNegative { .. }))
        .collect();
    assert_eq!(
        arcs,
        vec![
            BackendOp::Arc {
                xc: 50.0,
                yc: 50.0,
                radius: 10.0,
                angle1: 0.0,
                angle2: 1.0
            },
            BackendOp::ArcNegative {
                xc: 50.0,
                yc: 50.0,
                radius: 10.0,
                angle1: 1.0,
                angle2: 0.0
            },
        ]
    );
    assert!(ctx.backend().ops().is_empty());
}

#[test]
fn test_even_odd_fill_stroke_sequence() {
    let mut ctx = context();
    ctx.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    ctx.draw_path(DrawingMode::EvenOddFillStroke).expect("draw");

    let sequence: Vec<_> = ctx
        .backend()
        .ops()
        .iter()
        .filter(|op| {
            matches!(
                op,
                BackendOp::SetFillRule(_)
                    | BackendOp::Fill
                    | BackendOp::FillPreserve
                    | BackendOp::Stroke
                    | BackendOp::StrokePreserve
            )
        })
        .cloned()
        .collect();
    assert_eq!(
        sequence,
        vec![
            BackendOp::SetFillRule(FillRule::EvenOdd),
            BackendOp::FillPreserve,
            BackendOp::SetFillRule(FillRule::Winding),
            BackendOp::Stroke,
        ]
    );
    assert!(ctx.is_path_empty());
}

#[test]
fn test_page_lifecycle() {
    let mut ctx = context();
    ctx.begin_page().expect("begin page");
    ctx.end_page().expect("end page");

    assert_eq!(ctx.backend().ops(), &[BackendOp::CopyPage, BackendOp::ShowPage]);
    assert_eq!(ctx.backend().page_count(), 2);
}

#[test]
fn test_alpha_updates_fill_and_stroke() {
    let mut ctx = context();
    ctx.set_fill_color(Color::rgb(0.2, 0.4, 0.6));
    ctx.set_stroke_color(Color::rgb(0.9, 0.1, 0.3));

    ctx.set_alpha(0.5);

    assert_eq!(ctx.fill_color(), Some(Color::rgba(0.2, 0.4, 0.6, 0.5)));
    assert_eq!(ctx.stroke_color(), Some(Color::rgba(0.9, 0.1, 0.3, 0.5)));

    // The derived paint follows the rewritten color
    ctx.add_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    ctx.fill_path().expect("fill");
    let source = ctx.backend().last_source().expect("source");
    assert_eq!(source.solid_rgba().map(|rgba| rgba[3]), Some(0.5));
}

#[test]
fn test_red_rect_fill() {
    let mut ctx = context();
    ctx.set_fill_color(Color::RED);
    ctx.begin_path();
    ctx.add_rect(Rect::new(10.0, 10.0, 50.0, 50.0));
    ctx.fill_path().expect("fill");

    let ops = ctx.backend().ops();
    assert_eq!(ops[0], BackendOp::NewPath);
    assert_eq!(
        ops[1],
        BackendOp::Rectangle {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0
        }
    );
    assert!(matches!(
        &ops[2],
        BackendOp::SetSource(p) if p.solid_rgba() == Some([1.0, 0.0, 0.0, 1.0])
    ));
    assert_eq!(ops[3], BackendOp::Fill);
    assert_eq!(ops.len(), 4);
}

#[test]
fn test_alpha_restored_after_scope() {
    let mut ctx = context();
    ctx.save().expect("save");
    ctx.set_alpha(0.5);
    ctx.restore().expect("restore");

    assert_eq!(ctx.alpha(), 1.0);
}

#[test]
fn test_show_text_without_font_is_noop() {
    let mut ctx = context();
    assert!(ctx.font().is_none());

    ctx.show_text("A").expect("no error");
    assert!(ctx.backend().ops().is_empty());
}

#[test]
fn test_text_matrix_survives_restore() {
    let mut ctx = context();
    ctx.set_font(Some(Arc::new(StubFace)));
    ctx.set_font_size(10.0);

    ctx.save().expect("save");
    ctx.set_text_matrix(Affine2D::scale(2.0, 2.0));
    ctx.show_text("ab").expect("show");
    let inside = ctx.text_matrix();
    ctx.restore().expect("restore");

    assert_eq!(ctx.text_matrix(), inside);
    assert_eq!(ctx.text_position(), Point::new(24.0, 0.0));
}

#[test]
fn test_shadowed_fill_composites_in_order() {
    let mut ctx = context();
    ctx.set_fill_color(Color::RED);
    ctx.set_shadow(Some(Shadow::new(
        Size::new(4.0, 4.0),
        6.0,
        Color::rgba(0.0, 0.0, 0.0, 0.5),
    )));
    ctx.add_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
    ctx.fill_path().expect("fill");

    let kinds: Vec<&str> = ctx
        .backend()
        .ops()
        .iter()
        .filter_map(|op| match op {
            BackendOp::PushGroup { .. } => Some("push_group"),
            BackendOp::FillPreserve => Some("fill_preserve"),
            BackendOp::PopGroup { .. } => Some("pop_group"),
            BackendOp::CreateAlphaSurface { .. } => Some("alpha_surface"),
            BackendOp::PaintAlphaMask { .. } => Some("alpha_mask"),
            BackendOp::MaskSurface { .. } => Some("mask"),
            BackendOp::Paint => Some("paint"),
            BackendOp::NewPath => Some("new_path"),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "push_group",
            "fill_preserve",
            "pop_group",
            "alpha_surface",
            "alpha_mask",
            "mask",
            "paint",
            "new_path",
        ]
    );

    let alpha_surface = ctx.backend().ops().iter().find_map(|op| match op {
        BackendOp::CreateAlphaSurface { width, height, .. } => Some((*width, *height)),
        _ => None,
    });
    assert_eq!(alpha_surface, Some((112, 112)));
    assert_eq!(ctx.backend().save_depth(), 0);
    assert_eq!(ctx.backend().group_depth(), 0);
}

#[test]
fn test_backend_failure_surfaces_verbatim() {
    let mut ctx = context();
    ctx.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    ctx.backend_mut().fail_next(Status::InvalidMatrix);

    assert_eq!(ctx.stroke_path(), Err(ContextError::Backend(Status::InvalidMatrix)));

    // The status is sticky
    assert_eq!(ctx.save(), Err(ContextError::Backend(Status::InvalidMatrix)));
    assert_eq!(ctx.save_depth(), 0);
}

#[test]
fn test_layer_inside_saved_scope() {
    let mut ctx = context();
    ctx.save().expect("save");
    ctx.set_alpha(0.25);
    ctx.begin_transparency_layer(Some(Rect::new(0.0, 0.0, 50.0, 50.0))).expect("begin");
    ctx.set_fill_color(Color::BLUE);
    ctx.add_rect(Rect::new(5.0, 5.0, 10.0, 10.0));
    ctx.fill_path().expect("fill");
    ctx.end_transparency_layer().expect("end");
    ctx.restore().expect("restore");

    assert!(ctx.backend().ops().contains(&BackendOp::PaintWithAlpha(0.25)));
    assert_eq!(ctx.backend().save_depth(), 0);
    assert_eq!(ctx.backend().status(), Status::Success);
}
