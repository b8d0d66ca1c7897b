//! Recording backend
//!
//! A headless [`RenderBackend`] that performs no rasterization and instead
//! records every primitive it receives. It keeps enough real state (path
//! buffer, transform, gstate stack, group stack, sticky status) for the
//! drawing context to behave exactly as it would over a rasterizer, which
//! makes it the backend of choice for tests and demos.
//!
//! Path coordinates are stored as issued, in user space. Arcs are expanded
//! into cubic Béziers and rectangles into closed line subpaths, the way a
//! vector backend reports them on readback.

use std::f64::consts::TAU;
use std::sync::Arc;

use lyon::geom::euclid::Angle;
use lyon::geom::{point, vector, CubicBezierSegment};
use serde::Serialize;

use crate::backend::{Glyph, Matrix, RawPath, RawPathItem, RenderBackend, Status};
use crate::font::FontFace;
use crate::style::{Extend, FillRule, LineCap, LineJoin};

/// What a recorded pattern paints
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PatternKind {
    Solid { rgba: [f64; 4] },
    Group { group: u32 },
    Surface { surface: u32 },
}

/// Pattern handle handed out by [`RecordingBackend`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordedPattern {
    pub id: u32,
    pub kind: PatternKind,
    pub matrix: Matrix,
    pub extend: Extend,
}

impl RecordedPattern {
    /// Color of a solid pattern
    pub fn solid_rgba(&self) -> Option<[f64; 4]> {
        match self.kind {
            PatternKind::Solid { rgba } => Some(rgba),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SurfaceKind {
    Image,
    AlphaMask,
}

/// Surface handle handed out by [`RecordingBackend`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordedSurface {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub kind: SurfaceKind,
}

/// One recorded backend call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum BackendOp {
    Save,
    Restore,
    CopyPage,
    ShowPage,
    Flush,

    Scale { sx: f64, sy: f64 },
    Translate { tx: f64, ty: f64 },
    Rotate { radians: f64 },
    Transform(Matrix),
    IdentityMatrix,

    NewPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CurveTo { x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Arc { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
    ArcNegative { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
    GlyphPath(Vec<Glyph>),

    SetFillRule(FillRule),
    Fill,
    FillPreserve,
    Stroke,
    StrokePreserve,
    Clip,
    ClipPreserve,
    Paint,
    PaintWithAlpha(f64),
    MaskSurface { surface: u32, x: f64, y: f64 },

    SetSource(RecordedPattern),
    PushGroup { group: u32 },
    PopGroup { group: u32 },
    CreateAlphaSurface { surface: u32, width: u32, height: u32 },
    PaintAlphaMask { surface: u32, source: RecordedPattern, dx: f64, dy: f64 },

    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetMiterLimit(f64),
    SetDash { dashes: Vec<f64>, offset: f64 },
    SetTolerance(f64),
    SetAntialias(bool),

    SetFontFace { name: String },
    SetFontMatrix(Matrix),
    ShowGlyph(Glyph),
    ShowText(String),
}

#[derive(Clone, Debug)]
struct GraphicsState {
    matrix: Matrix,
    fill_rule: FillRule,
    line_width: f64,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f64,
    dash: Vec<f64>,
    dash_offset: f64,
    tolerance: f64,
    antialias: bool,
    font_face: Option<Arc<dyn FontFace>>,
    font_matrix: Matrix,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            fill_rule: FillRule::Winding,
            line_width: 2.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: Vec::new(),
            dash_offset: 0.0,
            tolerance: 0.1,
            antialias: true,
            font_face: None,
            font_matrix: Matrix::scaling(10.0, 10.0),
        }
    }
}

/// Backend that records calls instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<BackendOp>,
    status: Status,
    pending_failure: Option<Status>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    /// Open groups: (group id, saved-state depth at push)
    groups: Vec<(u32, usize)>,
    path: RawPath,
    current_point: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
    next_id: u32,
    pages: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded operations
    pub fn ops(&self) -> &[BackendOp] {
        &self.ops
    }

    /// Take the recorded operations
    pub fn take_ops(&mut self) -> Vec<BackendOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Latch `status` as the result of the next recorded call
    pub fn fail_next(&mut self, status: Status) {
        self.pending_failure = Some(status);
    }

    /// Number of gstate saves not yet restored (groups included)
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn group_depth(&self) -> usize {
        self.groups.len()
    }

    /// Pages emitted by `copy_page`/`show_page`
    pub fn page_count(&self) -> u32 {
        self.pages
    }

    /// Source most recently set with `set_source`
    pub fn last_source(&self) -> Option<&RecordedPattern> {
        self.ops.iter().rev().find_map(|op| match op {
            BackendOp::SetSource(pattern) => Some(pattern),
            _ => None,
        })
    }

    /// Allocate an image surface for `draw_image`
    pub fn create_image_surface(&mut self, width: u32, height: u32) -> RecordedSurface {
        RecordedSurface {
            id: self.next_id(),
            width,
            height,
            kind: SurfaceKind::Image,
        }
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn set_error(&mut self, status: Status) {
        if self.status.is_success() && !status.is_success() {
            tracing::trace!(?status, "recording backend latched error");
            self.status = status;
        }
    }

    fn record(&mut self, op: BackendOp) {
        self.ops.push(op);
        if let Some(status) = self.pending_failure.take() {
            self.set_error(status);
        }
    }

    fn pattern(&mut self, kind: PatternKind) -> RecordedPattern {
        RecordedPattern {
            id: self.next_id(),
            kind,
            matrix: Matrix::IDENTITY,
            extend: Extend::None,
        }
    }

    fn path_move_to(&mut self, x: f64, y: f64) {
        // Consecutive moves collapse into the last one.
        if let [.., RawPathItem::Header {
            kind: RawPath::MOVE_TO,
            ..
        }, RawPathItem::Point { x: px, y: py }] = self.path.data.as_mut_slice()
        {
            *px = x;
            *py = y;
        } else {
            self.path.push_move_to(x, y);
        }
        self.current_point = Some((x, y));
        self.subpath_start = Some((x, y));
    }

    fn path_line_to(&mut self, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.path_move_to(x, y);
            return;
        }
        self.path.push_line_to(x, y);
        self.current_point = Some((x, y));
    }

    fn path_clear(&mut self) {
        self.path = RawPath::default();
        self.current_point = None;
        self.subpath_start = None;
    }

    fn path_arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let start = (xc + radius * angle1.cos(), yc + radius * angle1.sin());
        self.path_line_to(start.0, start.1);

        let sweep = angle2 - angle1;
        if sweep == 0.0 || !sweep.is_finite() || radius <= 0.0 {
            return;
        }

        let arc = lyon::geom::Arc {
            center: point(xc, yc),
            radii: vector(radius, radius),
            start_angle: Angle::radians(angle1),
            sweep_angle: Angle::radians(sweep),
            x_rotation: Angle::radians(0.0),
        };
        let path = &mut self.path;
        let mut end = start;
        arc.for_each_cubic_bezier(&mut |segment: &CubicBezierSegment<f64>| {
            path.push_curve_to(
                segment.ctrl1.x,
                segment.ctrl1.y,
                segment.ctrl2.x,
                segment.ctrl2.y,
                segment.to.x,
                segment.to.y,
            );
            end = (segment.to.x, segment.to.y);
        });
        self.current_point = Some(end);
    }

    /// Advance of `text` in user space for the current face and font matrix
    fn text_advance(&self, text: &str) -> (f64, f64) {
        let width_em: f64 = match &self.state.font_face {
            Some(face) => {
                let units_per_em = face.units_per_em().max(1) as f64;
                text.chars()
                    .map(|c| face.glyph_advance(face.glyph_index(c)) as f64 / units_per_em)
                    .sum()
            }
            None => 0.5 * text.chars().count() as f64,
        };
        self.state.font_matrix.transform_distance(width_em, 0.0)
    }
}

/// Non-negative sweep for an arc that travels `delta` radians in its own
/// direction; backwards deltas wrap into one turn and sweeps past two turns
/// are folded down.
fn arc_sweep(delta: f64) -> f64 {
    if delta < 0.0 {
        delta.rem_euclid(TAU)
    } else if delta > 2.0 * TAU {
        delta.rem_euclid(TAU) + TAU
    } else {
        delta
    }
}

impl RenderBackend for RecordingBackend {
    type Pattern = RecordedPattern;
    type Surface = RecordedSurface;

    fn status(&self) -> Status {
        self.status
    }

    fn save(&mut self) {
        self.record(BackendOp::Save);
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        self.record(BackendOp::Restore);
        let floor = self.groups.last().map_or(0, |&(_, depth)| depth + 1);
        if self.saved.len() <= floor {
            self.set_error(Status::InvalidRestore);
            return;
        }
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn copy_page(&mut self) {
        self.record(BackendOp::CopyPage);
        self.pages += 1;
    }

    fn show_page(&mut self) {
        self.record(BackendOp::ShowPage);
        self.pages += 1;
    }

    fn flush(&mut self) {
        self.record(BackendOp::Flush);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.record(BackendOp::Scale { sx, sy });
        if sx == 0.0 || sy == 0.0 {
            self.set_error(Status::InvalidMatrix);
            return;
        }
        self.state.matrix = Matrix::multiply(&Matrix::scaling(sx, sy), &self.state.matrix);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.record(BackendOp::Translate { tx, ty });
        self.state.matrix = Matrix::multiply(&Matrix::translation(tx, ty), &self.state.matrix);
    }

    fn rotate(&mut self, radians: f64) {
        self.record(BackendOp::Rotate { radians });
        self.state.matrix = Matrix::multiply(&Matrix::rotation(radians), &self.state.matrix);
    }

    fn transform(&mut self, matrix: &Matrix) {
        self.record(BackendOp::Transform(*matrix));
        if matrix.invert().is_none() {
            self.set_error(Status::InvalidMatrix);
            return;
        }
        self.state.matrix = Matrix::multiply(matrix, &self.state.matrix);
    }

    fn matrix(&self) -> Matrix {
        self.state.matrix
    }

    fn identity_matrix(&mut self) {
        self.record(BackendOp::IdentityMatrix);
        self.state.matrix = Matrix::IDENTITY;
    }

    fn new_path(&mut self) {
        self.record(BackendOp::NewPath);
        self.path_clear();
    }

    fn close_path(&mut self) {
        self.record(BackendOp::ClosePath);
        if self.current_point.is_none() {
            return;
        }
        self.path.push_close_path();
        self.current_point = self.subpath_start;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(BackendOp::MoveTo { x, y });
        self.path_move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(BackendOp::LineTo { x, y });
        self.path_line_to(x, y);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.record(BackendOp::CurveTo {
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
        });
        if self.current_point.is_none() {
            self.path_move_to(x1, y1);
        }
        self.path.push_curve_to(x1, y1, x2, y2, x3, y3);
        self.current_point = Some((x3, y3));
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(BackendOp::Rectangle {
            x,
            y,
            width,
            height,
        });
        self.path_move_to(x, y);
        self.path.push_line_to(x + width, y);
        self.path.push_line_to(x + width, y + height);
        self.path.push_line_to(x, y + height);
        self.path.push_close_path();
        self.current_point = Some((x, y));
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.record(BackendOp::Arc {
            xc,
            yc,
            radius,
            angle1,
            angle2,
        });
        let sweep = arc_sweep(angle2 - angle1);
        self.path_arc(xc, yc, radius, angle1, angle1 + sweep);
    }

    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.record(BackendOp::ArcNegative {
            xc,
            yc,
            radius,
            angle1,
            angle2,
        });
        let sweep = arc_sweep(angle1 - angle2);
        self.path_arc(xc, yc, radius, angle1, angle1 - sweep);
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        self.current_point
    }

    fn copy_path(&self) -> RawPath {
        self.path.clone()
    }

    fn glyph_path(&mut self, glyphs: &[Glyph]) {
        self.record(BackendOp::GlyphPath(glyphs.to_vec()));
        // Outlines are not synthesized; each glyph contributes its origin.
        for glyph in glyphs {
            self.path.push_move_to(glyph.x, glyph.y);
            self.current_point = Some((glyph.x, glyph.y));
            self.subpath_start = self.current_point;
        }
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.record(BackendOp::SetFillRule(rule));
        self.state.fill_rule = rule;
    }

    fn fill_rule(&self) -> FillRule {
        self.state.fill_rule
    }

    fn fill(&mut self) {
        self.record(BackendOp::Fill);
        self.path_clear();
    }

    fn fill_preserve(&mut self) {
        self.record(BackendOp::FillPreserve);
    }

    fn stroke(&mut self) {
        self.record(BackendOp::Stroke);
        self.path_clear();
    }

    fn stroke_preserve(&mut self) {
        self.record(BackendOp::StrokePreserve);
    }

    fn clip(&mut self) {
        self.record(BackendOp::Clip);
        self.path_clear();
    }

    fn clip_preserve(&mut self) {
        self.record(BackendOp::ClipPreserve);
    }

    fn paint(&mut self) {
        self.record(BackendOp::Paint);
    }

    fn paint_with_alpha(&mut self, alpha: f64) {
        self.record(BackendOp::PaintWithAlpha(alpha));
    }

    fn mask_surface(&mut self, mask: &RecordedSurface, x: f64, y: f64) {
        self.record(BackendOp::MaskSurface {
            surface: mask.id,
            x,
            y,
        });
        if mask.kind != SurfaceKind::AlphaMask {
            self.set_error(Status::SurfaceTypeMismatch);
        }
    }

    fn solid_pattern(&mut self, rgba: [f64; 4]) -> RecordedPattern {
        self.pattern(PatternKind::Solid { rgba })
    }

    fn surface_pattern(&mut self, surface: &RecordedSurface) -> RecordedPattern {
        self.pattern(PatternKind::Surface {
            surface: surface.id,
        })
    }

    fn set_pattern_matrix(&mut self, pattern: &mut RecordedPattern, matrix: &Matrix) {
        if matrix.invert().is_none() {
            self.set_error(Status::InvalidMatrix);
            return;
        }
        pattern.matrix = *matrix;
    }

    fn set_pattern_extend(&mut self, pattern: &mut RecordedPattern, extend: Extend) {
        pattern.extend = extend;
    }

    fn set_source(&mut self, pattern: &RecordedPattern) {
        self.record(BackendOp::SetSource(pattern.clone()));
    }

    fn push_group(&mut self) {
        let group = self.next_id();
        self.record(BackendOp::PushGroup { group });
        self.groups.push((group, self.saved.len()));
        self.saved.push(self.state.clone());
    }

    fn pop_group(&mut self) -> RecordedPattern {
        let Some((group, depth)) = self.groups.pop() else {
            self.record(BackendOp::PopGroup { group: 0 });
            self.set_error(Status::InvalidPopGroup);
            return self.pattern(PatternKind::Solid { rgba: [0.0; 4] });
        };
        self.record(BackendOp::PopGroup { group });
        if self.saved.len() != depth + 1 {
            self.set_error(Status::InvalidPopGroup);
        }
        self.saved.truncate(depth + 1);
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
        self.pattern(PatternKind::Group { group })
    }

    fn create_alpha_surface(&mut self, width: u32, height: u32) -> RecordedSurface {
        let surface = RecordedSurface {
            id: self.next_id(),
            width,
            height,
            kind: SurfaceKind::AlphaMask,
        };
        self.record(BackendOp::CreateAlphaSurface {
            surface: surface.id,
            width,
            height,
        });
        surface
    }

    fn paint_alpha_mask(
        &mut self,
        target: &mut RecordedSurface,
        source: &RecordedPattern,
        dx: f64,
        dy: f64,
    ) {
        self.record(BackendOp::PaintAlphaMask {
            surface: target.id,
            source: source.clone(),
            dx,
            dy,
        });
    }

    fn surface_size(&self, surface: &RecordedSurface) -> (u32, u32) {
        (surface.width, surface.height)
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(BackendOp::SetLineWidth(width));
        self.state.line_width = width;
    }

    fn line_width(&self) -> f64 {
        self.state.line_width
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.record(BackendOp::SetLineCap(cap));
        self.state.line_cap = cap;
    }

    fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.record(BackendOp::SetLineJoin(join));
        self.state.line_join = join;
    }

    fn line_join(&self) -> LineJoin {
        self.state.line_join
    }

    fn set_miter_limit(&mut self, limit: f64) {
        self.record(BackendOp::SetMiterLimit(limit));
        self.state.miter_limit = limit;
    }

    fn miter_limit(&self) -> f64 {
        self.state.miter_limit
    }

    fn set_dash(&mut self, dashes: &[f64], offset: f64) {
        self.record(BackendOp::SetDash {
            dashes: dashes.to_vec(),
            offset,
        });
        let all_zero = !dashes.is_empty() && dashes.iter().all(|&d| d == 0.0);
        if dashes.iter().any(|&d| d < 0.0) || all_zero {
            self.set_error(Status::InvalidDash);
            return;
        }
        self.state.dash = dashes.to_vec();
        self.state.dash_offset = offset;
    }

    fn dash(&self) -> (Vec<f64>, f64) {
        (self.state.dash.clone(), self.state.dash_offset)
    }

    fn set_tolerance(&mut self, tolerance: f64) {
        self.record(BackendOp::SetTolerance(tolerance));
        self.state.tolerance = tolerance;
    }

    fn tolerance(&self) -> f64 {
        self.state.tolerance
    }

    fn set_antialias(&mut self, antialias: bool) {
        self.record(BackendOp::SetAntialias(antialias));
        self.state.antialias = antialias;
    }

    fn antialias(&self) -> bool {
        self.state.antialias
    }

    fn set_font_face(&mut self, face: &Arc<dyn FontFace>) {
        self.record(BackendOp::SetFontFace {
            name: face.name().to_string(),
        });
        self.state.font_face = Some(Arc::clone(face));
    }

    fn set_font_matrix(&mut self, matrix: &Matrix) {
        self.record(BackendOp::SetFontMatrix(*matrix));
        if matrix.invert().is_none() {
            self.set_error(Status::InvalidMatrix);
            return;
        }
        self.state.font_matrix = *matrix;
    }

    fn show_glyph(&mut self, glyph: Glyph) {
        self.record(BackendOp::ShowGlyph(glyph));
    }

    fn show_text(&mut self, text: &str) {
        self.record(BackendOp::ShowText(text.to_string()));
        let (x, y) = self.current_point.unwrap_or((0.0, 0.0));
        let (dx, dy) = self.text_advance(text);
        self.path_move_to(x + dx, y + dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_records_calls() {
        let mut backend = RecordingBackend::new();
        backend.move_to(1.0, 2.0);
        backend.line_to(3.0, 4.0);
        backend.fill();

        assert_eq!(
            backend.ops(),
            &[
                BackendOp::MoveTo { x: 1.0, y: 2.0 },
                BackendOp::LineTo { x: 3.0, y: 4.0 },
                BackendOp::Fill,
            ]
        );
        assert!(backend.copy_path().is_empty());
        assert_eq!(backend.current_point(), None);
    }

    #[test]
    fn test_consecutive_moves_collapse() {
        let mut backend = RecordingBackend::new();
        backend.move_to(1.0, 1.0);
        backend.move_to(5.0, 5.0);

        let mut expected = RawPath::default();
        expected.push_move_to(5.0, 5.0);
        assert_eq!(backend.copy_path(), expected);
    }

    #[test]
    fn test_rectangle_readback() {
        let mut backend = RecordingBackend::new();
        backend.rectangle(10.0, 10.0, 50.0, 50.0);

        let mut expected = RawPath::default();
        expected.push_move_to(10.0, 10.0);
        expected.push_line_to(60.0, 10.0);
        expected.push_line_to(60.0, 60.0);
        expected.push_line_to(10.0, 60.0);
        expected.push_close_path();
        assert_eq!(backend.copy_path(), expected);
        assert_eq!(backend.current_point(), Some((10.0, 10.0)));
    }

    #[test]
    fn test_arc_expands_to_curves() {
        let mut backend = RecordingBackend::new();
        backend.arc(0.0, 0.0, 10.0, 0.0, std::f64::consts::PI);

        let path = backend.copy_path();
        assert_eq!(
            path.data[0],
            RawPathItem::Header {
                kind: RawPath::MOVE_TO,
                length: 2
            }
        );
        let curves = path
            .data
            .iter()
            .filter(|item| {
                matches!(
                    item,
                    RawPathItem::Header {
                        kind: RawPath::CURVE_TO,
                        ..
                    }
                )
            })
            .count();
        assert!(curves >= 2);

        let (x, y) = backend.current_point().expect("arc sets a current point");
        assert!((x + 10.0).abs() < 1e-6 && y.abs() < 1e-6);
    }

    #[test]
    fn test_arc_angles_wrap() {
        use std::f64::consts::{FRAC_PI_2, PI};

        let mut backend = RecordingBackend::new();
        backend.arc(0.0, 0.0, 10.0, 0.0, -1e20);
        backend.arc_negative(0.0, 0.0, 10.0, 0.0, 1e20);
        backend.arc(0.0, 0.0, 10.0, f64::NAN, 1.0);
        assert!(backend.copy_path().data.len() < 200);

        assert!((arc_sweep(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(arc_sweep(TAU), TAU);
        assert!(arc_sweep(1e20) <= 2.0 * TAU);
    }

    #[test]
    fn test_restore_underflow_latches_status() {
        let mut backend = RecordingBackend::new();
        backend.save();
        backend.restore();
        assert_eq!(backend.status(), Status::Success);

        backend.restore();
        assert_eq!(backend.status(), Status::InvalidRestore);

        // The first failure sticks
        backend.pop_group();
        assert_eq!(backend.status(), Status::InvalidRestore);
    }

    #[test]
    fn test_groups_save_and_restore_state() {
        let mut backend = RecordingBackend::new();
        backend.push_group();
        backend.set_line_width(7.0);
        let pattern = backend.pop_group();

        assert!(matches!(pattern.kind, PatternKind::Group { .. }));
        assert_eq!(backend.line_width(), 2.0);
        assert_eq!(backend.group_depth(), 0);
        assert_eq!(backend.status(), Status::Success);
    }

    #[test]
    fn test_restore_cannot_cross_group_boundary() {
        let mut backend = RecordingBackend::new();
        backend.push_group();
        backend.restore();
        assert_eq!(backend.status(), Status::InvalidRestore);
    }

    #[test]
    fn test_fail_next() {
        let mut backend = RecordingBackend::new();
        backend.fail_next(Status::NoMemory);
        assert_eq!(backend.status(), Status::Success);
        backend.fill();
        assert_eq!(backend.status(), Status::NoMemory);
    }

    #[test]
    fn test_show_text_advances_current_point() {
        let mut backend = RecordingBackend::new();
        backend.move_to(0.0, 0.0);
        backend.set_font_matrix(&Matrix::scaling(20.0, 20.0));
        backend.show_text("abc");

        // 0.5 em per character without a face
        assert_eq!(backend.current_point(), Some((30.0, 0.0)));
    }

    #[test]
    fn test_ops_serialize() {
        let mut backend = RecordingBackend::new();
        backend.set_fill_rule(FillRule::EvenOdd);
        backend.rectangle(0.0, 0.0, 1.0, 1.0);
        let json = serde_json::to_string(backend.ops()).expect("serializable");
        assert!(json.contains("EvenOdd"));
        assert!(json.contains("Rectangle"));
    }
}
