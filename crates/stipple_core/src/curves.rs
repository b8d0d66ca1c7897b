//! Curve synthesis helpers
//!
//! Pure geometry used by path construction: degree elevation of quadratic
//! Béziers and the tangent-arc solver. None of these fail; degenerate
//! inputs resolve to an explicit fallback instead.

use crate::geometry::Point;

/// Cubic control points equivalent to the quadratic `start -> control -> end`
///
/// Returns `(control1, control2)` where
/// `control1 = (start + 2 * control) / 3` and `control2 = (2 * control + end) / 3`.
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> (Point, Point) {
    let control1 = Point::new(
        start.x / 3.0 + 2.0 * control.x / 3.0,
        start.y / 3.0 + 2.0 * control.y / 3.0,
    );
    let control2 = Point::new(
        2.0 * control.x / 3.0 + end.x / 3.0,
        2.0 * control.y / 3.0 + end.y / 3.0,
    );
    (control1, control2)
}

/// Circular arc described by center, radius and angles (radians)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub center: Point,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl ArcSegment {
    /// Point on the circle at `angle`
    pub fn point_at(&self, angle: f32) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }
}

/// Outcome of fitting an arc between two tangent lines
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TangentArc {
    /// Current point coincides with the first tangent end; nothing to add
    None,
    /// Tangents are parallel; a straight line to the first tangent end
    Line(Point),
    /// Arc tangent to both segments
    Arc(ArcSegment),
}

/// Fit a circle of `radius` tangent to `current -> tangent1_end` and
/// `tangent1_end -> tangent2_end`.
pub fn tangent_arc(
    current: Point,
    tangent1_end: Point,
    tangent2_end: Point,
    radius: f32,
) -> TangentArc {
    let (x0, y0) = (current.x as f64, current.y as f64);
    let (x1, y1) = (tangent1_end.x as f64, tangent1_end.y as f64);
    let (x2, y2) = (tangent2_end.x as f64, tangent2_end.y as f64);
    let radius = radius as f64;

    let dx0 = x0 - x1;
    let dy0 = y0 - y1;
    let dx2 = x2 - x1;
    let dy2 = y2 - y1;

    let xl0 = (dx0 * dx0 + dy0 * dy0).sqrt();
    if xl0 == 0.0 {
        return TangentArc::None;
    }

    let xl2 = (dx2 * dx2 + dy2 * dy2).sqrt();
    let san = dx2 * dy0 - dx0 * dy2;
    if san == 0.0 {
        return TangentArc::Line(tangent1_end);
    }

    // Unit normals of both tangents, pointing toward the circle center.
    let (n0x, n0y, n2x, n2y) = if san < 0.0 {
        (-dy0 / xl0, dx0 / xl0, dy2 / xl2, -dx2 / xl2)
    } else {
        (dy0 / xl0, -dx0 / xl0, -dy2 / xl2, dx2 / xl2)
    };

    let t = (dx2 * n2y - dx2 * n0y - dy2 * n2x + dy2 * n0x) / san;
    let center = Point::new(
        (x1 + radius * (t * dx0 + n0x)) as f32,
        (y1 + radius * (t * dy0 + n0y)) as f32,
    );

    TangentArc::Arc(ArcSegment {
        center,
        radius: radius as f32,
        start_angle: (-n0y).atan2(-n0x) as f32,
        end_angle: (-n2y).atan2(-n2x) as f32,
        clockwise: san < 0.0,
    })
}
