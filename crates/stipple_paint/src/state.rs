//! Graphics state stack
//!
//! The context's own half of the graphics state (the backend keeps the
//! transform, path and stroke attributes). States are plain values: `save`
//! pushes a copy of the top, `restore` truncates it away.

use std::sync::Arc;

use stipple_core::{Color, FontFace, Shadow, TextDrawingMode};

/// Paint source for fills and strokes
///
/// Solid colors stay colors until a paint operation needs a backend pattern,
/// so changing alpha can never leave a stale pattern behind.
#[derive(Clone, Debug)]
pub enum Paint<P> {
    Solid(Color),
    Pattern(P),
}

impl<P> Paint<P> {
    pub fn color(&self) -> Option<Color> {
        match self {
            Paint::Solid(color) => Some(*color),
            Paint::Pattern(_) => None,
        }
    }

    /// Rewrite the alpha of a solid color; patterns are left alone
    fn apply_alpha(&mut self, alpha: f32) {
        if let Paint::Solid(color) = self {
            *color = color.with_alpha(alpha);
        }
    }
}

impl<P> From<Color> for Paint<P> {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// One entry of the state stack
#[derive(Clone, Debug)]
pub struct GraphicsState<P> {
    pub alpha: f32,
    pub fill: Option<Paint<P>>,
    pub stroke: Option<Paint<P>>,
    pub shadow: Option<Shadow>,
    pub font: Option<Arc<dyn FontFace>>,
    pub font_size: f32,
    pub character_spacing: f32,
    pub text_drawing_mode: TextDrawingMode,
}

impl<P> GraphicsState<P> {
    pub fn new(font_size: f32, text_drawing_mode: TextDrawingMode) -> Self {
        Self {
            alpha: 1.0,
            fill: None,
            stroke: None,
            shadow: None,
            font: None,
            font_size,
            character_spacing: 0.0,
            text_drawing_mode,
        }
    }

    /// Set alpha and fold it into the solid fill and stroke colors
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        if let Some(fill) = &mut self.fill {
            fill.apply_alpha(alpha);
        }
        if let Some(stroke) = &mut self.stroke {
            stroke.apply_alpha(alpha);
        }
    }
}

/// Stack of graphics states; index 0 is the root
#[derive(Debug)]
pub struct StateStack<P> {
    states: Vec<GraphicsState<P>>,
}

impl<P: Clone> StateStack<P> {
    pub fn new(root: GraphicsState<P>) -> Self {
        Self { states: vec![root] }
    }

    pub fn current(&self) -> &GraphicsState<P> {
        &self.states[self.states.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut GraphicsState<P> {
        let top = self.states.len() - 1;
        &mut self.states[top]
    }

    /// Push a copy of the current state
    pub fn push(&mut self) {
        let copy = self.current().clone();
        self.states.push(copy);
    }

    /// Pop the current state; `None` at the root
    pub fn pop(&mut self) -> Option<GraphicsState<P>> {
        if self.states.len() > 1 {
            self.states.pop()
        } else {
            None
        }
    }

    /// Number of saves not yet restored
    pub fn depth(&self) -> usize {
        self.states.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = GraphicsState<()>;

    #[test]
    fn test_push_copies_and_pop_discards() {
        let mut stack = StateStack::new(State::new(12.0, TextDrawingMode::Fill));
        stack.current_mut().fill = Some(Paint::Solid(Color::RED));

        stack.push();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current().fill.as_ref().and_then(Paint::color), Some(Color::RED));

        stack.current_mut().fill = Some(Paint::Solid(Color::BLUE));
        stack.current_mut().font_size = 30.0;
        assert!(stack.pop().is_some());

        assert_eq!(stack.current().fill.as_ref().and_then(Paint::color), Some(Color::RED));
        assert_eq!(stack.current().font_size, 12.0);
    }

    #[test]
    fn test_pop_at_root_fails() {
        let mut stack = StateStack::new(State::new(0.0, TextDrawingMode::Fill));
        assert!(stack.pop().is_none());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_alpha_rewrites_solid_colors() {
        let mut state = State::new(0.0, TextDrawingMode::Fill);
        state.fill = Some(Paint::Solid(Color::RED));
        state.stroke = Some(Paint::Pattern(()));

        state.set_alpha(0.25);

        assert_eq!(
            state.fill.as_ref().and_then(Paint::color),
            Some(Color::rgba(1.0, 0.0, 0.0, 0.25))
        );
        assert!(matches!(state.stroke, Some(Paint::Pattern(()))));
    }
}
