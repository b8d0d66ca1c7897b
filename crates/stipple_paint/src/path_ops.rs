//! Path construction and readback
//!
//! Every call forwards to the backend, which owns the authoritative current
//! path. Quadratic curves and tangent arcs are synthesized here first.

use stipple_core::{
    quad_to_cubic, tangent_arc, Path, PathElement, Point, RawPath, Rect, RenderBackend,
    TangentArc,
};
use tracing::trace;

use crate::context::Context;

impl<B: RenderBackend> Context<B> {
    /// Discard the current path
    pub fn begin_path(&mut self) {
        self.backend.new_path();
    }

    pub fn close_path(&mut self) {
        self.backend.close_path();
    }

    pub fn move_to(&mut self, point: Point) {
        let (x, y) = point.into();
        self.backend.move_to(x, y);
    }

    pub fn add_line_to(&mut self, point: Point) {
        let (x, y) = point.into();
        self.backend.line_to(x, y);
    }

    /// Polyline through `points`, starting a new subpath at the first one
    pub fn add_lines(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for point in rest {
            self.add_line_to(*point);
        }
    }

    pub fn add_curve_to(&mut self, end: Point, control1: Point, control2: Point) {
        let (x1, y1) = control1.into();
        let (x2, y2) = control2.into();
        let (x3, y3) = end.into();
        self.backend.curve_to(x1, y1, x2, y2, x3, y3);
    }

    /// Quadratic Bézier from the current point, emitted as the equivalent cubic
    pub fn add_quad_curve_to(&mut self, end: Point, control: Point) {
        let start = self.current_point().unwrap_or(control);
        let (control1, control2) = quad_to_cubic(start, control, end);
        self.add_curve_to(end, control1, control2);
    }

    pub fn add_rect(&mut self, rect: Rect) {
        self.backend.rectangle(
            rect.x() as f64,
            rect.y() as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
    }

    /// Arc around `center` from `start_angle` to `end_angle` (radians)
    ///
    /// A line joins the current point to the start of the arc.
    pub fn add_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) {
        let (xc, yc) = center.into();
        let (radius, start, end) = (radius as f64, start_angle as f64, end_angle as f64);
        if clockwise {
            self.backend.arc_negative(xc, yc, radius, start, end);
        } else {
            self.backend.arc(xc, yc, radius, start, end);
        }
    }

    /// Arc of `radius` tangent to the lines current point → `tangent1_end`
    /// and `tangent1_end` → `tangent2_end`
    ///
    /// Without a current point this starts a subpath at `tangent1_end`.
    pub fn add_arc_to(&mut self, tangent1_end: Point, tangent2_end: Point, radius: f32) {
        let Some(current) = self.current_point() else {
            self.move_to(tangent1_end);
            return;
        };

        match tangent_arc(current, tangent1_end, tangent2_end, radius) {
            TangentArc::None => {}
            TangentArc::Line(point) => self.add_line_to(point),
            TangentArc::Arc(arc) => {
                trace!(?arc, "tangent arc");
                self.add_arc(
                    arc.center,
                    arc.radius,
                    arc.start_angle,
                    arc.end_angle,
                    arc.clockwise,
                );
            }
        }
    }

    /// Replay a structured path into the current path
    pub fn add_path(&mut self, path: &Path) {
        for element in path.elements() {
            match *element {
                PathElement::MoveTo(point) => self.move_to(point),
                PathElement::LineTo(point) => self.add_line_to(point),
                PathElement::CurveTo {
                    control1,
                    control2,
                    end,
                } => self.add_curve_to(end, control1, control2),
                PathElement::CloseSubpath => self.close_path(),
            }
        }
    }

    /// Snapshot of the backend's current path
    pub fn current_path(&self) -> Path {
        Path::from_raw(&self.backend.copy_path())
    }

    pub fn current_point(&self) -> Option<Point> {
        self.backend.current_point().map(Point::from)
    }

    pub fn is_path_empty(&self) -> bool {
        self.backend.copy_path().is_empty()
    }

    /// Put back a path saved with `copy_path` after an operation consumed it
    pub(crate) fn replay_raw_path(&mut self, raw: &RawPath) {
        self.backend.new_path();
        if !raw.is_empty() {
            self.add_path(&Path::from_raw(raw));
        }
    }
}
