//! Paint attribute types shared by the context and its backends

use serde::Serialize;

use crate::color::Color;
use crate::geometry::Size;

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Tie-break policy for self-intersecting paths
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FillRule {
    /// Nonzero winding
    #[default]
    Winding,
    EvenOdd,
}

/// How a pattern behaves outside its natural extent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Extend {
    #[default]
    None,
    Repeat,
    Reflect,
    Pad,
}

/// Composite path drawing mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawingMode {
    #[default]
    Fill,
    EvenOddFill,
    FillStroke,
    EvenOddFillStroke,
    Stroke,
}

impl DrawingMode {
    pub fn fill_rule(self) -> FillRule {
        match self {
            DrawingMode::EvenOddFill | DrawingMode::EvenOddFillStroke => FillRule::EvenOdd,
            _ => FillRule::Winding,
        }
    }
}

/// How glyphs are rendered by the text engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDrawingMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
}

impl TextDrawingMode {
    pub fn fills(self) -> bool {
        matches!(
            self,
            TextDrawingMode::Fill
                | TextDrawingMode::FillStroke
                | TextDrawingMode::FillClip
                | TextDrawingMode::FillStrokeClip
        )
    }

    pub fn strokes(self) -> bool {
        matches!(
            self,
            TextDrawingMode::Stroke
                | TextDrawingMode::FillStroke
                | TextDrawingMode::StrokeClip
                | TextDrawingMode::FillStrokeClip
        )
    }

    pub fn clips(self) -> bool {
        matches!(
            self,
            TextDrawingMode::FillClip
                | TextDrawingMode::StrokeClip
                | TextDrawingMode::FillStrokeClip
                | TextDrawingMode::Clip
        )
    }
}

/// Dash pattern for strokes (empty lengths for a solid line)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineDash {
    pub phase: f32,
    pub lengths: Vec<f32>,
}

impl LineDash {
    pub fn new(phase: f32, lengths: Vec<f32>) -> Self {
        Self { phase, lengths }
    }
}

/// Drop shadow configuration
///
/// The radius sizes the offscreen padding around the canvas; the shadow
/// itself is composited without blur.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shadow {
    pub offset: Size,
    pub radius: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: Size, radius: f32, color: Color) -> Self {
        Self {
            offset,
            radius,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_drawing_mode_flags() {
        assert!(TextDrawingMode::Fill.fills());
        assert!(!TextDrawingMode::Fill.strokes());
        assert!(!TextDrawingMode::Fill.clips());

        assert!(TextDrawingMode::FillStrokeClip.fills());
        assert!(TextDrawingMode::FillStrokeClip.strokes());
        assert!(TextDrawingMode::FillStrokeClip.clips());

        let invisible = TextDrawingMode::Invisible;
        assert!(!invisible.fills() && !invisible.strokes() && !invisible.clips());

        assert!(TextDrawingMode::Clip.clips());
        assert!(!TextDrawingMode::Clip.fills());
    }

    #[test]
    fn test_drawing_mode_fill_rule() {
        assert_eq!(DrawingMode::Fill.fill_rule(), FillRule::Winding);
        assert_eq!(DrawingMode::EvenOddFill.fill_rule(), FillRule::EvenOdd);
        assert_eq!(DrawingMode::EvenOddFillStroke.fill_rule(), FillRule::EvenOdd);
        assert_eq!(DrawingMode::Stroke.fill_rule(), FillRule::Winding);
    }
}
