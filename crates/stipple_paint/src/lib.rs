//! Stipple Paint
//!
//! A stateful 2D drawing context over a vector rasterization backend.
//!
//! # Features
//!
//! - Save/restore graphics state stack
//! - Path construction (lines, cubic and quadratic curves, arcs, tangent arcs)
//! - Fill (nonzero and even-odd), stroke, clip and composite drawing modes
//! - Drop shadows and transparency layers via offscreen groups
//! - Text layout against a separate text matrix
//!
//! # Example
//!
//! ```
//! use stipple_core::{Color, Rect, RecordingBackend, Size};
//! use stipple_paint::Context;
//!
//! let mut ctx = Context::new(RecordingBackend::new(), Size::new(100.0, 100.0))?;
//! ctx.set_fill_color(Color::RED);
//! ctx.begin_path();
//! ctx.add_rect(Rect::new(10.0, 10.0, 50.0, 50.0));
//! ctx.fill_path()?;
//! # Ok::<(), stipple_paint::ContextError>(())
//! ```

mod compositor;
pub mod config;
pub mod context;
pub mod error;
mod paint;
mod path_ops;
pub mod state;
mod text;

pub use config::{ContextConfig, ShadowPadding};
pub use context::Context;
pub use error::{ContextError, Result};
pub use state::{GraphicsState, Paint};
