//! Paint pipeline: fill, stroke, clip and image drawing

use stipple_core::{DrawingMode, Extend, FillRule, Matrix, Rect, RenderBackend};
use tracing::trace;

use crate::context::Context;
use crate::error::Result;

impl<B: RenderBackend> Context<B> {
    /// Fill the current path with the nonzero winding rule, consuming it
    pub fn fill_path(&mut self) -> Result<()> {
        self.fill(FillRule::Winding)
    }

    /// Fill the current path with the even-odd rule, consuming it
    pub fn eo_fill(&mut self) -> Result<()> {
        self.fill(FillRule::EvenOdd)
    }

    /// Fill the current path with `rule`, consuming it
    pub fn fill(&mut self, rule: FillRule) -> Result<()> {
        self.fill_path_with(rule, false)
    }

    /// Fill the current path with `rule`, keeping it when `preserve` is set
    pub fn fill_path_with(&mut self, rule: FillRule, preserve: bool) -> Result<()> {
        self.paint_with_shadow(preserve, |ctx, keep| {
            ctx.fill_once(rule, keep);
            ctx.check_status()
        })
    }

    /// Stroke the current path, consuming it
    pub fn stroke_path(&mut self) -> Result<()> {
        self.paint_with_shadow(false, |ctx, preserve| {
            ctx.stroke_once(preserve);
            ctx.check_status()
        })
    }

    /// Fill and/or stroke the current path according to `mode`
    ///
    /// Combined modes fill first and keep the path for the stroke.
    pub fn draw_path(&mut self, mode: DrawingMode) -> Result<()> {
        let rule = mode.fill_rule();
        self.paint_with_shadow(false, |ctx, preserve| {
            match mode {
                DrawingMode::Fill | DrawingMode::EvenOddFill => ctx.fill_once(rule, preserve),
                DrawingMode::FillStroke | DrawingMode::EvenOddFillStroke => {
                    ctx.fill_once(rule, true);
                    ctx.stroke_once(preserve);
                }
                DrawingMode::Stroke => ctx.stroke_once(preserve),
            }
            ctx.check_status()
        })
    }

    /// Intersect the clip with the current path, consuming it
    pub fn clip(&mut self, rule: FillRule) -> Result<()> {
        self.with_fill_rule(rule, |backend| backend.clip());
        self.check_status()
    }

    /// Replace the current path with `rect` and clip to it
    pub fn clip_to_rect(&mut self, rect: Rect) -> Result<()> {
        self.begin_path();
        self.add_rect(rect);
        self.clip(FillRule::Winding)
    }

    /// Clip-based erase
    ///
    /// Paints the fill source through an empty clip, so nothing is drawn and
    /// the current path is consumed.
    pub fn clear(&mut self) -> Result<()> {
        let source = self.fill_source();
        self.backend.save();
        self.backend.set_source(&source);
        self.backend.new_path();
        self.backend.clip();
        self.backend.paint();
        self.backend.restore();
        self.check_status()
    }

    /// Paint `image` scaled into `rect`
    ///
    /// The current path, transform and source are left as they were.
    pub fn draw_image(&mut self, image: &B::Surface, rect: Rect) -> Result<()> {
        let (width, height) = self.backend.surface_size(image);
        if rect.is_empty() || width == 0 || height == 0 {
            trace!(?rect, width, height, "skipping empty image draw");
            return Ok(());
        }

        // Pattern space maps the destination rect onto the image pixels.
        let to_image = Matrix::multiply(
            &Matrix::translation(-rect.x() as f64, -rect.y() as f64),
            &Matrix::scaling(
                width as f64 / rect.width() as f64,
                height as f64 / rect.height() as f64,
            ),
        );

        let saved_path = self.backend.copy_path();
        let alpha = self.alpha() as f64;

        self.backend.save();
        let mut pattern = self.backend.surface_pattern(image);
        self.backend.set_pattern_matrix(&mut pattern, &to_image);
        self.backend.set_pattern_extend(&mut pattern, Extend::Pad);
        self.backend.set_source(&pattern);
        self.backend.new_path();
        self.add_rect(rect);
        self.backend.clip();
        self.backend.paint_with_alpha(alpha);
        self.backend.restore();

        self.replay_raw_path(&saved_path);
        self.check_status()
    }

    pub(crate) fn fill_once(&mut self, rule: FillRule, preserve: bool) {
        let source = self.fill_source();
        self.backend.set_source(&source);
        self.with_fill_rule(rule, |backend| {
            if preserve {
                backend.fill_preserve();
            } else {
                backend.fill();
            }
        });
    }

    pub(crate) fn stroke_once(&mut self, preserve: bool) {
        let source = self.stroke_source();
        self.backend.set_source(&source);
        if preserve {
            self.backend.stroke_preserve();
        } else {
            self.backend.stroke();
        }
    }

    /// Run `op` with the backend fill rule set to `rule`, then put the
    /// previous rule back
    fn with_fill_rule(&mut self, rule: FillRule, op: impl FnOnce(&mut B)) {
        let previous = self.backend.fill_rule();
        if previous != rule {
            self.backend.set_fill_rule(rule);
        }
        op(&mut self.backend);
        if previous != rule {
            self.backend.set_fill_rule(previous);
        }
    }
}
