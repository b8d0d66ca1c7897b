//! Drawing context - the stateful API over a rendering backend
//!
//! `Context` owns the state stack and the text matrix and borrows everything
//! else (transform, path, stroke attributes) from the backend. Path and
//! attribute calls forward immediately; operations that paint, composite or
//! touch the state stack check the backend status and return a [`Result`].

use stipple_core::{
    Affine2D, Color, LineCap, LineDash, LineJoin, Matrix, Point, RenderBackend, Shadow, Size,
    TextDrawingMode,
};
use tracing::{debug, warn};

use crate::config::ContextConfig;
use crate::error::{ContextError, Result};
use crate::state::{GraphicsState, Paint, StateStack};

/// Stateful 2D drawing context
pub struct Context<B: RenderBackend> {
    pub(crate) backend: B,
    pub(crate) size: Size,
    pub(crate) config: ContextConfig,
    pub(crate) states: StateStack<B::Pattern>,
    pub(crate) text_matrix: Affine2D,
    /// One entry per open transparency layer: whether it clipped
    pub(crate) layers: Vec<bool>,
}

impl<B: RenderBackend> Context<B> {
    /// Create a context drawing into `backend`, whose canvas is `size`
    pub fn new(backend: B, size: Size) -> Result<Self> {
        Self::with_config(backend, size, ContextConfig::default())
    }

    pub fn with_config(backend: B, size: Size, config: ContextConfig) -> Result<Self> {
        let root = GraphicsState::new(config.font_size, config.text_drawing_mode);
        let mut context = Self {
            backend,
            size,
            config,
            states: StateStack::new(root),
            text_matrix: Affine2D::IDENTITY,
            layers: Vec::new(),
        };
        context.check_status()?;

        context.backend.set_line_width(context.config.line_width as f64);
        context.backend.set_antialias(context.config.antialias);
        context.backend.set_tolerance(context.config.tolerance as f64);
        context.check_status()?;

        debug!(width = size.width, height = size.height, "created drawing context");
        Ok(context)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Map the backend's sticky status to a result
    pub(crate) fn check_status(&self) -> Result<()> {
        self.backend.status().into_result().map_err(|status| {
            warn!(%status, "backend reported failure");
            ContextError::Backend(status)
        })
    }

    // =========================================================================
    // Pages
    // =========================================================================

    pub fn begin_page(&mut self) -> Result<()> {
        debug!("begin page");
        self.backend.copy_page();
        self.check_status()
    }

    pub fn end_page(&mut self) -> Result<()> {
        debug!("end page");
        self.backend.show_page();
        self.check_status()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.backend.flush();
        self.check_status()
    }

    // =========================================================================
    // Transform
    // =========================================================================

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.backend.scale(sx as f64, sy as f64);
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.backend.translate(tx as f64, ty as f64);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.backend.rotate(angle as f64);
    }

    /// Prepend `transform` to the current transform
    pub fn concatenate(&mut self, transform: Affine2D) {
        self.backend.transform(&Matrix::from(transform));
    }

    pub fn current_transform(&self) -> Affine2D {
        self.backend.matrix().into()
    }

    // =========================================================================
    // State stack
    // =========================================================================

    /// Push a copy of the graphics state
    pub fn save(&mut self) -> Result<()> {
        self.backend.save();
        self.check_status()?;
        self.states.push();
        debug!(depth = self.states.depth(), "saved graphics state");
        Ok(())
    }

    /// Pop back to the state of the matching [`save`](Self::save)
    pub fn restore(&mut self) -> Result<()> {
        if self.states.depth() == 0 {
            warn!("restore() without matching save()");
            return Err(ContextError::InvalidRestore);
        }
        self.backend.restore();
        self.states.pop();
        debug!(depth = self.states.depth(), "restored graphics state");
        self.check_status()
    }

    /// [`save`](Self::save), panicking on failure
    pub fn save_or_abort(&mut self) {
        if let Err(err) = self.save() {
            panic!("save() failed: {err}");
        }
    }

    /// [`restore`](Self::restore), panicking on failure
    pub fn restore_or_abort(&mut self) {
        if let Err(err) = self.restore() {
            panic!("restore() failed: {err}");
        }
    }

    /// Number of saves not yet restored
    pub fn save_depth(&self) -> usize {
        self.states.depth()
    }

    // =========================================================================
    // Paint attributes
    // =========================================================================

    pub fn alpha(&self) -> f32 {
        self.states.current().alpha
    }

    /// Set the global alpha, rewriting the alpha of solid fill and stroke colors
    ///
    /// Pattern paints are used as given; bake any opacity into the pattern
    /// itself. Images drawn with [`draw_image`](Self::draw_image) are
    /// composited with this alpha.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.states.current_mut().set_alpha(alpha);
    }

    /// Fill color, `None` when unset or when the fill is a pattern
    pub fn fill_color(&self) -> Option<Color> {
        self.states.current().fill.as_ref().and_then(Paint::color)
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.states.current_mut().fill = Some(Paint::Solid(color));
    }

    /// Fill with a backend pattern; the global alpha does not apply to it
    pub fn set_fill_pattern(&mut self, pattern: B::Pattern) {
        self.states.current_mut().fill = Some(Paint::Pattern(pattern));
    }

    pub fn fill_paint(&self) -> Option<&Paint<B::Pattern>> {
        self.states.current().fill.as_ref()
    }

    pub fn stroke_color(&self) -> Option<Color> {
        self.states.current().stroke.as_ref().and_then(Paint::color)
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.states.current_mut().stroke = Some(Paint::Solid(color));
    }

    /// Stroke with a backend pattern; the global alpha does not apply to it
    pub fn set_stroke_pattern(&mut self, pattern: B::Pattern) {
        self.states.current_mut().stroke = Some(Paint::Pattern(pattern));
    }

    pub fn stroke_paint(&self) -> Option<&Paint<B::Pattern>> {
        self.states.current().stroke.as_ref()
    }

    pub fn shadow(&self) -> Option<Shadow> {
        self.states.current().shadow
    }

    /// Set or clear the drop shadow applied to subsequent paint operations
    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.states.current_mut().shadow = shadow;
    }

    /// Backend pattern for the current fill (opaque black when unset)
    pub(crate) fn fill_source(&mut self) -> B::Pattern {
        let paint = self.states.current().fill.clone();
        self.resolve_paint(paint)
    }

    /// Backend pattern for the current stroke (opaque black when unset)
    pub(crate) fn stroke_source(&mut self) -> B::Pattern {
        let paint = self.states.current().stroke.clone();
        self.resolve_paint(paint)
    }

    fn resolve_paint(&mut self, paint: Option<Paint<B::Pattern>>) -> B::Pattern {
        match paint {
            Some(Paint::Pattern(pattern)) => pattern,
            Some(Paint::Solid(color)) => self.backend.solid_pattern(color.to_f64_array()),
            None => self.backend.solid_pattern(Color::BLACK.to_f64_array()),
        }
    }

    // =========================================================================
    // Line attributes
    // =========================================================================

    pub fn line_width(&self) -> f32 {
        self.backend.line_width() as f32
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.backend.set_line_width(width as f64);
    }

    pub fn line_cap(&self) -> LineCap {
        self.backend.line_cap()
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.backend.set_line_cap(cap);
    }

    pub fn line_join(&self) -> LineJoin {
        self.backend.line_join()
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.backend.set_line_join(join);
    }

    pub fn miter_limit(&self) -> f32 {
        self.backend.miter_limit() as f32
    }

    pub fn set_miter_limit(&mut self, limit: f32) {
        self.backend.set_miter_limit(limit as f64);
    }

    pub fn line_dash(&self) -> LineDash {
        let (lengths, phase) = self.backend.dash();
        LineDash::new(phase as f32, lengths.into_iter().map(|l| l as f32).collect())
    }

    pub fn set_line_dash(&mut self, dash: &LineDash) {
        let lengths: Vec<f64> = dash.lengths.iter().map(|&l| l as f64).collect();
        self.backend.set_dash(&lengths, dash.phase as f64);
    }

    pub fn tolerance(&self) -> f32 {
        self.backend.tolerance() as f32
    }

    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.backend.set_tolerance(tolerance as f64);
    }

    pub fn should_antialias(&self) -> bool {
        self.backend.antialias()
    }

    pub fn set_should_antialias(&mut self, antialias: bool) {
        self.backend.set_antialias(antialias);
    }

    // =========================================================================
    // Text attributes
    // =========================================================================

    pub fn font_size(&self) -> f32 {
        self.states.current().font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.states.current_mut().font_size = size;
    }

    pub fn character_spacing(&self) -> f32 {
        self.states.current().character_spacing
    }

    /// Extra advance added after every glyph, in text space
    pub fn set_character_spacing(&mut self, spacing: f32) {
        self.states.current_mut().character_spacing = spacing;
    }

    pub fn text_drawing_mode(&self) -> TextDrawingMode {
        self.states.current().text_drawing_mode
    }

    pub fn set_text_drawing_mode(&mut self, mode: TextDrawingMode) {
        self.states.current_mut().text_drawing_mode = mode;
    }

    /// Text matrix; not part of the saved state, so it survives `restore`
    pub fn text_matrix(&self) -> Affine2D {
        self.text_matrix
    }

    pub fn set_text_matrix(&mut self, matrix: Affine2D) {
        self.text_matrix = matrix;
    }

    /// Text caret (the translation of the text matrix)
    pub fn text_position(&self) -> Point {
        self.text_matrix.offset()
    }

    pub fn set_text_position(&mut self, position: Point) {
        self.text_matrix = self.text_matrix.with_offset(position);
    }
}
