//! Core geometry types
//!
//! Everything the drawing context exchanges with its callers is expressed in
//! these `f32` types. Backends work in `f64`; conversion happens at the seam.

use std::ops::{Add, AddAssign, Mul, Sub};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Offset this point by a size
    pub fn offset_by(&self, delta: Size) -> Point {
        Point::new(self.x + delta.width, self.y + delta.height)
    }

    pub(crate) fn to_f64(self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }

    pub(crate) fn from_f64((x, y): (f64, f64)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from(point: (f64, f64)) -> Self {
        Point::from_f64(point)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        point.to_f64()
    }
}

/// 2D size, also used as a displacement (advances, shadow offsets)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl AddAssign for Size {
    fn add_assign(&mut self, rhs: Size) {
        self.width += rhs.width;
        self.height += rhs.height;
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }
}

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self {
            elements: [a, b, c, d, tx, ty],
        }
    }

    pub fn translation(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn rotation(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Apply only the linear part (no translation), for displacements
    pub fn transform_size(&self, size: Size) -> Size {
        let [a, b, c, d, _, _] = self.elements;
        Size::new(
            a * size.width + c * size.height,
            b * size.width + d * size.height,
        )
    }

    /// Translation component
    pub fn offset(&self) -> Point {
        Point::new(self.elements[4], self.elements[5])
    }

    /// Copy of this transform with its translation replaced
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.elements[4] = offset.x;
        self.elements[5] = offset.y;
        self
    }

    /// Copy of this transform with the translation removed
    pub fn linear(self) -> Self {
        self.with_offset(Point::ZERO)
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.max_x(), 40.0);
        assert_eq!(r.max_y(), 60.0);
        assert!(!r.is_empty());
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
    }

    #[test]
    fn test_affine_composition_order() {
        let scale = Affine2D::scale(2.0, 2.0);
        let translate = Affine2D::translation(10.0, 0.0);

        // translate first, then scale
        let t = scale.then(&translate);
        assert!(approx(t.transform_point(Point::new(1.0, 1.0)), Point::new(22.0, 2.0)));

        // scale first, then translate
        let t = translate.then(&scale);
        assert!(approx(t.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0)));
    }

    #[test]
    fn test_affine_rotation() {
        let t = Affine2D::rotation(std::f32::consts::FRAC_PI_2);
        assert!(approx(t.transform_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_transform_size_ignores_translation() {
        let t = Affine2D::new(2.0, 0.0, 0.0, 3.0, 100.0, 100.0);
        assert_eq!(t.transform_size(Size::new(1.0, 1.0)), Size::new(2.0, 3.0));
        assert_eq!(t.offset(), Point::new(100.0, 100.0));
        assert_eq!(t.linear().offset(), Point::ZERO);
    }
}
