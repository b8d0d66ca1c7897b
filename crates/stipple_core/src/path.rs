//! Structured path representation
//!
//! A [`Path`] is a read-only projection of what a backend holds. It is what
//! callers get back from path readback and what they hand to
//! `add_path` to replay one path into another.

use smallvec::SmallVec;

use crate::backend::{RawPath, RawPathItem};
use crate::geometry::{Point, Rect};

/// Path element
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    CurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    CloseSubpath,
}

/// A 2D path composed of elements
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    elements: SmallVec<[PathElement; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.push(PathElement::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.push(PathElement::LineTo(Point::new(x, y)));
        self
    }

    pub fn curve_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.push(PathElement::CurveTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.push(PathElement::CloseSubpath);
        self
    }

    /// Closed rectangle subpath
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.max_x(), rect.y())
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.x(), rect.max_y())
            .close()
    }

    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Decode a backend path buffer
    ///
    /// # Panics
    ///
    /// Panics on an element kind the backend contract does not define, or on
    /// a header whose point count does not match its kind. Either means the
    /// backend broke its contract.
    pub fn from_raw(raw: &RawPath) -> Self {
        let mut path = Path::new();
        let mut items = raw.data.iter();

        while let Some(item) = items.next() {
            let RawPathItem::Header { kind, length } = *item else {
                panic!("path data out of sync: expected a header, found {item:?}");
            };
            let points: SmallVec<[Point; 3]> = items
                .by_ref()
                .take(length.saturating_sub(1))
                .map(|item| match *item {
                    RawPathItem::Point { x, y } => Point::from((x, y)),
                    RawPathItem::Header { .. } => {
                        panic!("path data out of sync: header inside element of kind {kind}")
                    }
                })
                .collect();

            let element = match (kind, points.as_slice()) {
                (RawPath::MOVE_TO, [p]) => PathElement::MoveTo(*p),
                (RawPath::LINE_TO, [p]) => PathElement::LineTo(*p),
                (RawPath::CURVE_TO, [c1, c2, end]) => PathElement::CurveTo {
                    control1: *c1,
                    control2: *c2,
                    end: *end,
                },
                (RawPath::CLOSE_PATH, []) => PathElement::CloseSubpath,
                (kind, points) => panic!(
                    "unknown path element kind {kind} with {} point(s)",
                    points.len()
                ),
            };
            path.push(element);
        }

        path
    }
}
