//! Transparency layers and drop shadows
//!
//! Both redirect drawing into an offscreen group and composite the result
//! back onto the destination:
//!
//! ```text
//! shadow:  push_group ─► draw ─► pop_group = content
//!          content ─► alpha mask (canvas + 2·pad)
//!          shadow color through mask at offset, then content on top
//!
//! layer:   [clip] save ─► alpha = 1, no shadow ─► push_group
//!          ... drawing ...
//!          pop_group ─► restore ─► paint with restored alpha ─► [unclip]
//! ```

use stipple_core::{Rect, RenderBackend};
use tracing::{debug, trace, warn};

use crate::context::Context;
use crate::error::{ContextError, Result};

impl<B: RenderBackend> Context<B> {
    /// Redirect drawing into an offscreen layer, optionally clipped to `rect`
    ///
    /// Inside the layer alpha is 1 and no shadow is applied; both take effect
    /// when the layer is composited by
    /// [`end_transparency_layer`](Self::end_transparency_layer).
    pub fn begin_transparency_layer(&mut self, rect: Option<Rect>) -> Result<()> {
        if let Some(rect) = rect {
            self.backend.save();
            self.clip_to_rect(rect)?;
        }
        self.save()?;

        let state = self.states.current_mut();
        state.set_alpha(1.0);
        state.shadow = None;

        self.backend.push_group();
        self.layers.push(rect.is_some());
        debug!(depth = self.layers.len(), clipped = rect.is_some(), "begin transparency layer");
        self.check_status()
    }

    /// Composite the innermost layer with the alpha in effect before it began
    pub fn end_transparency_layer(&mut self) -> Result<()> {
        let Some(clipped) = self.layers.pop() else {
            warn!("end_transparency_layer() without matching begin");
            return Err(ContextError::UnbalancedTransparencyLayer);
        };

        let layer = self.backend.pop_group();
        self.restore()?;

        let alpha = self.alpha() as f64;
        self.backend.set_source(&layer);
        self.backend.paint_with_alpha(alpha);
        if clipped {
            self.backend.restore();
        }
        debug!(depth = self.layers.len(), alpha, "end transparency layer");
        self.check_status()
    }

    /// Open transparency layers
    pub fn transparency_layer_depth(&self) -> usize {
        self.layers.len()
    }

    /// Run a paint operation, wrapping it in the shadow passes when a shadow
    /// is set
    ///
    /// `draw` receives whether it must keep the current path. Under a shadow
    /// it always does; the path is consumed afterwards unless `preserve`.
    pub(crate) fn paint_with_shadow<F>(&mut self, preserve: bool, mut draw: F) -> Result<()>
    where
        F: FnMut(&mut Self, bool) -> Result<()>,
    {
        let Some(shadow) = self.states.current().shadow else {
            return draw(self, preserve);
        };

        // Content pass
        self.backend.push_group();
        let drawn = draw(self, true);
        let content = self.backend.pop_group();
        drawn?;

        // Mask pass
        let pad = self.config.shadow_padding.resolve(shadow.radius);
        let width = (self.size.width + 2.0 * pad).ceil().max(0.0) as u32;
        let height = (self.size.height + 2.0 * pad).ceil().max(0.0) as u32;
        trace!(width, height, pad, "shadow mask pass");
        let mut mask = self.backend.create_alpha_surface(width, height);
        self.backend.paint_alpha_mask(&mut mask, &content, pad as f64, pad as f64);

        // The mask is in device space; the content group keeps the user
        // transform it was popped under.
        self.backend.save();
        self.backend.identity_matrix();
        let color = self.backend.solid_pattern(shadow.color.to_f64_array());
        self.backend.set_source(&color);
        self.backend.mask_surface(
            &mask,
            (shadow.offset.width - pad) as f64,
            (shadow.offset.height - pad) as f64,
        );
        self.backend.restore();
        self.backend.set_source(&content);
        self.backend.paint();
        trace!(?shadow, "shadow composited");

        if !preserve {
            self.backend.new_path();
        }
        self.check_status()
    }
}
