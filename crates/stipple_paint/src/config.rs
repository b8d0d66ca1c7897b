//! Context configuration

use stipple_core::TextDrawingMode;

/// How much room the shadow compositor leaves around the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ShadowPadding {
    /// Pad by the shadow radius
    #[default]
    Radius,
    /// Pad by a constant amount in pixels
    Fixed(f32),
}

impl ShadowPadding {
    /// Padding for a shadow of `radius`
    pub fn resolve(self, radius: f32) -> f32 {
        match self {
            ShadowPadding::Radius => radius.max(0.0),
            ShadowPadding::Fixed(px) => px.max(0.0),
        }
    }
}

/// Configuration applied when a context is created.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextConfig {
    /// Initial stroke width.
    pub line_width: f32,
    /// Whether the backend should antialias.
    pub antialias: bool,
    /// Curve flattening tolerance.
    pub tolerance: f32,
    /// Offscreen padding used by shadow rendering.
    pub shadow_padding: ShadowPadding,
    /// Font size of the root graphics state.
    pub font_size: f32,
    /// Text drawing mode of the root graphics state.
    pub text_drawing_mode: TextDrawingMode,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            antialias: true,
            tolerance: 0.1,
            shadow_padding: ShadowPadding::Radius,
            font_size: 0.0,
            text_drawing_mode: TextDrawingMode::Fill,
        }
    }
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial line width.
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Enable or disable antialiasing.
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_shadow_padding(mut self, padding: ShadowPadding) -> Self {
        self.shadow_padding = padding;
        self
    }

    /// Set the font size of the root state.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_text_drawing_mode(mut self, mode: TextDrawingMode) -> Self {
        self.text_drawing_mode = mode;
        self
    }
}
