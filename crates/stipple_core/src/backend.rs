//! Rendering backend seam
//!
//! The drawing context never rasterizes anything itself. It translates its
//! calls into the primitives of a [`RenderBackend`], a vector rasterizer with
//! a cairo-like model:
//!
//! ```text
//! Context call ──► path / source / group primitives ──► backend
//!                                                         │
//!               status() ◄── sticky error status ◄────────┘
//! ```
//!
//! Mutating calls return nothing. The first failure is latched and reported
//! by [`RenderBackend::status`]; the context checks it after each operation.
//! All scalars crossing this seam are `f64`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::font::FontFace;
use crate::geometry::Affine2D;
use crate::style::{Extend, FillRule, LineCap, LineJoin};

/// Backend status code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Error, Serialize)]
pub enum Status {
    #[default]
    #[error("no error has occurred")]
    Success,
    #[error("out of memory")]
    NoMemory,
    #[error("restore() without matching save()")]
    InvalidRestore,
    #[error("no saved group to pop")]
    InvalidPopGroup,
    #[error("no current point defined")]
    NoCurrentPoint,
    #[error("invalid matrix (not invertible)")]
    InvalidMatrix,
    #[error("invalid value for an input path")]
    InvalidPathData,
    #[error("invalid dash setting")]
    InvalidDash,
    #[error("target surface has been finished")]
    SurfaceFinished,
    #[error("surface type mismatch")]
    SurfaceTypeMismatch,
    #[error("font type mismatch")]
    FontTypeMismatch,
    #[error("invalid glyph index")]
    InvalidIndex,
    #[error("backend error code {0}")]
    Other(i32),
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    /// `Ok(())` on success, the status itself otherwise
    pub fn into_result(self) -> Result<(), Status> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Backend affine matrix
///
/// `x' = xx * x + xy * y + x0`, `y' = yx * x + yy * y + y0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Matrix {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        x0: 0.0,
        y0: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            x0: tx,
            y0: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            xx: sx,
            yy: sy,
            ..Self::IDENTITY
        }
    }

    pub fn rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            xx: c,
            yx: s,
            xy: -s,
            yy: c,
            x0: 0.0,
            y0: 0.0,
        }
    }

    /// Product whose effect is to apply `first`, then `second`
    pub fn multiply(first: &Matrix, second: &Matrix) -> Matrix {
        Matrix {
            xx: first.xx * second.xx + first.yx * second.xy,
            yx: first.xx * second.yx + first.yx * second.yy,
            xy: first.xy * second.xx + first.yy * second.xy,
            yy: first.xy * second.yx + first.yy * second.yy,
            x0: first.x0 * second.xx + first.y0 * second.xy + second.x0,
            y0: first.x0 * second.yx + first.y0 * second.yy + second.y0,
        }
    }

    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.xx * x + self.xy * y + self.x0,
            self.yx * x + self.yy * y + self.y0,
        )
    }

    pub fn transform_distance(&self, dx: f64, dy: f64) -> (f64, f64) {
        (self.xx * dx + self.xy * dy, self.yx * dx + self.yy * dy)
    }

    pub fn invert(&self) -> Option<Matrix> {
        let det = self.xx * self.yy - self.yx * self.xy;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Matrix {
            xx: self.yy * inv,
            yx: -self.yx * inv,
            xy: -self.xy * inv,
            yy: self.xx * inv,
            x0: (self.xy * self.y0 - self.yy * self.x0) * inv,
            y0: (self.yx * self.x0 - self.xx * self.y0) * inv,
        })
    }
}

impl From<Affine2D> for Matrix {
    fn from(t: Affine2D) -> Self {
        let [a, b, c, d, tx, ty] = t.elements.map(|e| e as f64);
        Matrix {
            xx: a,
            yx: b,
            xy: c,
            yy: d,
            x0: tx,
            y0: ty,
        }
    }
}

impl From<Matrix> for Affine2D {
    fn from(m: Matrix) -> Self {
        Affine2D::new(
            m.xx as f32,
            m.yx as f32,
            m.xy as f32,
            m.yy as f32,
            m.x0 as f32,
            m.y0 as f32,
        )
    }
}

/// One entry of a backend path buffer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum RawPathItem {
    /// Starts an element; `length` counts this header plus its points
    Header { kind: u32, length: usize },
    Point { x: f64, y: f64 },
}

/// Flat path buffer as reported by a backend
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RawPath {
    pub data: Vec<RawPathItem>,
}

impl RawPath {
    pub const MOVE_TO: u32 = 0;
    pub const LINE_TO: u32 = 1;
    pub const CURVE_TO: u32 = 2;
    pub const CLOSE_PATH: u32 = 3;

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push_move_to(&mut self, x: f64, y: f64) {
        self.data.push(RawPathItem::Header {
            kind: Self::MOVE_TO,
            length: 2,
        });
        self.data.push(RawPathItem::Point { x, y });
    }

    pub fn push_line_to(&mut self, x: f64, y: f64) {
        self.data.push(RawPathItem::Header {
            kind: Self::LINE_TO,
            length: 2,
        });
        self.data.push(RawPathItem::Point { x, y });
    }

    pub fn push_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.data.push(RawPathItem::Header {
            kind: Self::CURVE_TO,
            length: 4,
        });
        self.data.push(RawPathItem::Point { x: x1, y: y1 });
        self.data.push(RawPathItem::Point { x: x2, y: y2 });
        self.data.push(RawPathItem::Point { x: x3, y: y3 });
    }

    pub fn push_close_path(&mut self) {
        self.data.push(RawPathItem::Header {
            kind: Self::CLOSE_PATH,
            length: 1,
        });
    }
}

/// A glyph placed in user space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Glyph {
    pub index: u64,
    pub x: f64,
    pub y: f64,
}

/// Vector rasterization backend consumed by the drawing context
pub trait RenderBackend {
    /// Paintable source: solid color, popped group, or surface
    type Pattern: Clone + fmt::Debug;
    /// Pixel storage: images and alpha masks
    type Surface: fmt::Debug;

    /// First failure latched since creation, or `Success`
    fn status(&self) -> Status;

    // ─────────────────────────────────────────────────────────────────────────
    // Graphics state and pages
    // ─────────────────────────────────────────────────────────────────────────

    fn save(&mut self);
    fn restore(&mut self);
    /// Emit the current page, keeping its contents
    fn copy_page(&mut self);
    /// Emit the current page and start a blank one
    fn show_page(&mut self);
    fn flush(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // Transform
    // ─────────────────────────────────────────────────────────────────────────

    fn scale(&mut self, sx: f64, sy: f64);
    fn translate(&mut self, tx: f64, ty: f64);
    fn rotate(&mut self, radians: f64);
    /// Prepend `matrix` to the current transform
    fn transform(&mut self, matrix: &Matrix);
    fn matrix(&self) -> Matrix;
    fn identity_matrix(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // Path construction
    // ─────────────────────────────────────────────────────────────────────────

    fn new_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Arc in the direction of increasing angles
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    /// Arc in the direction of decreasing angles
    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    fn current_point(&self) -> Option<(f64, f64)>;
    fn copy_path(&self) -> RawPath;
    /// Append glyph outlines for the current font face and font matrix
    fn glyph_path(&mut self, glyphs: &[Glyph]);

    // ─────────────────────────────────────────────────────────────────────────
    // Painting
    // ─────────────────────────────────────────────────────────────────────────

    fn set_fill_rule(&mut self, rule: FillRule);
    fn fill_rule(&self) -> FillRule;
    fn fill(&mut self);
    fn fill_preserve(&mut self);
    fn stroke(&mut self);
    fn stroke_preserve(&mut self);
    fn clip(&mut self);
    fn clip_preserve(&mut self);
    fn paint(&mut self);
    fn paint_with_alpha(&mut self, alpha: f64);
    /// Paint the current source through the alpha channel of `mask`,
    /// placed at `(x, y)` in user space
    fn mask_surface(&mut self, mask: &Self::Surface, x: f64, y: f64);

    // ─────────────────────────────────────────────────────────────────────────
    // Sources
    // ─────────────────────────────────────────────────────────────────────────

    fn solid_pattern(&mut self, rgba: [f64; 4]) -> Self::Pattern;
    fn surface_pattern(&mut self, surface: &Self::Surface) -> Self::Pattern;
    fn set_pattern_matrix(&mut self, pattern: &mut Self::Pattern, matrix: &Matrix);
    fn set_pattern_extend(&mut self, pattern: &mut Self::Pattern, extend: Extend);
    fn set_source(&mut self, pattern: &Self::Pattern);

    // ─────────────────────────────────────────────────────────────────────────
    // Offscreen groups and masks
    // ─────────────────────────────────────────────────────────────────────────

    /// Redirect drawing to an offscreen group (implies a gstate save)
    fn push_group(&mut self);
    /// Close the innermost group and return its contents as a pattern
    ///
    /// The pattern is bound to the user transform in effect at pop time:
    /// painting it under that same transform puts the contents back where
    /// they were drawn.
    fn pop_group(&mut self) -> Self::Pattern;
    fn create_alpha_surface(&mut self, width: u32, height: u32) -> Self::Surface;
    /// Paint the alpha channel of `source` into `target`, offset by `(dx, dy)`
    fn paint_alpha_mask(
        &mut self,
        target: &mut Self::Surface,
        source: &Self::Pattern,
        dx: f64,
        dy: f64,
    );
    fn surface_size(&self, surface: &Self::Surface) -> (u32, u32);

    // ─────────────────────────────────────────────────────────────────────────
    // Stroke attributes
    // ─────────────────────────────────────────────────────────────────────────

    fn set_line_width(&mut self, width: f64);
    fn line_width(&self) -> f64;
    fn set_line_cap(&mut self, cap: LineCap);
    fn line_cap(&self) -> LineCap;
    fn set_line_join(&mut self, join: LineJoin);
    fn line_join(&self) -> LineJoin;
    fn set_miter_limit(&mut self, limit: f64);
    fn miter_limit(&self) -> f64;
    fn set_dash(&mut self, dashes: &[f64], offset: f64);
    fn dash(&self) -> (Vec<f64>, f64);
    fn set_tolerance(&mut self, tolerance: f64);
    fn tolerance(&self) -> f64;
    fn set_antialias(&mut self, antialias: bool);
    fn antialias(&self) -> bool;

    // ─────────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────────

    fn set_font_face(&mut self, face: &Arc<dyn FontFace>);
    fn set_font_matrix(&mut self, matrix: &Matrix);
    fn show_glyph(&mut self, glyph: Glyph);
    /// Toy text API: shape `text` with the current face and advance the
    /// current point past it
    fn show_text(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_matrix_multiply_order() {
        let m = Matrix::multiply(&Matrix::translation(-10.0, -20.0), &Matrix::scaling(2.0, 4.0));
        // translate first, then scale
        assert!(approx(m.transform_point(10.0, 20.0), (0.0, 0.0)));
        assert!(approx(m.transform_point(11.0, 21.0), (2.0, 4.0)));
    }

    #[test]
    fn test_matrix_affine_round_trip() {
        let t = Affine2D::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m = Matrix::from(t);
        assert_eq!((m.xx, m.yx, m.xy, m.yy, m.x0, m.y0), (1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(Affine2D::from(m), t);
    }

    #[test]
    fn test_matrix_invert() {
        let m = Matrix::multiply(&Matrix::rotation(0.3), &Matrix::translation(4.0, 5.0));
        let inv = m.invert().expect("invertible");
        let (x, y) = m.transform_point(7.0, -2.0);
        assert!(approx(inv.transform_point(x, y), (7.0, -2.0)));
        assert!(Matrix::scaling(0.0, 0.0).invert().is_none());
    }

    #[test]
    fn test_status_into_result() {
        assert_eq!(Status::Success.into_result(), Ok(()));
        assert_eq!(Status::NoMemory.into_result(), Err(Status::NoMemory));
        assert_eq!(
            Status::InvalidRestore.to_string(),
            "restore() without matching save()"
        );
    }
}
