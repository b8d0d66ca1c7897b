//! Stipple Core
//!
//! Shared vocabulary for the Stipple drawing context and its collaborators.
//!
//! # Features
//!
//! - Geometry and affine transforms (`f32` at the API surface)
//! - Colors, stroke attributes and drawing modes
//! - Structured paths and the flat path buffer backends report
//! - Tangent-arc and quadratic-to-cubic curve helpers
//! - The [`RenderBackend`] and [`FontFace`] collaborator seams
//! - A headless [`RecordingBackend`] for tests and demos

pub mod backend;
pub mod color;
pub mod curves;
pub mod font;
pub mod geometry;
pub mod path;
pub mod recording;
pub mod style;

pub use backend::{Glyph, Matrix, RawPath, RawPathItem, RenderBackend, Status};
pub use color::Color;
pub use curves::{quad_to_cubic, tangent_arc, ArcSegment, TangentArc};
pub use font::{FontFace, GlyphId};
pub use geometry::{Affine2D, Point, Rect, Size};
pub use path::{Path, PathElement};
pub use recording::{
    BackendOp, PatternKind, RecordedPattern, RecordedSurface, RecordingBackend, SurfaceKind,
};
pub use style::{
    DrawingMode, Extend, FillRule, LineCap, LineDash, LineJoin, Shadow, TextDrawingMode,
};
