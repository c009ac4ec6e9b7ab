//! The drawing surface the host hands to the renderers every frame.
//!
//! The engine never owns pixels: renderers emit draw instructions through
//! [`RenderSurface`] and the host executes them (canvas, gizmos, recorder).

use bevy::color::Color;
use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Dash style of a stroke, stored in options as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
    LargeDashed,
    SparseDotted,
}

impl LineStyle {
    /// On/off dash lengths in pixels for a given line width
    pub fn dash_pattern(&self, width: f32) -> Vec<f32> {
        let w = width.max(1.0);
        match self {
            LineStyle::Solid => Vec::new(),
            LineStyle::Dotted => vec![w, w],
            LineStyle::Dashed => vec![2.0 * w, 2.0 * w],
            LineStyle::LargeDashed => vec![6.0 * w, 6.0 * w],
            LineStyle::SparseDotted => vec![w, 4.0 * w],
        }
    }
}

impl TryFrom<u8> for LineStyle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineStyle::Solid),
            1 => Ok(LineStyle::Dotted),
            2 => Ok(LineStyle::Dashed),
            3 => Ok(LineStyle::LargeDashed),
            4 => Ok(LineStyle::SparseDotted),
            other => Err(format!("unknown line style {}", other)),
        }
    }
}

impl From<LineStyle> for u8 {
    fn from(style: LineStyle) -> Self {
        match style {
            LineStyle::Solid => 0,
            LineStyle::Dotted => 1,
            LineStyle::Dashed => 2,
            LineStyle::LargeDashed => 3,
            LineStyle::SparseDotted => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub style: LineStyle,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12.0,
            bold: false,
            italic: false,
        }
    }
}

/// One laid-out line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Top-left corner of the line box before rotation
    pub position: Vec2,
    pub font: FontSpec,
    pub color: Color,
    /// Rotation in radians around `pivot`
    pub angle: f32,
    pub pivot: Vec2,
}

/// Sink for the per-frame draw instructions of the tools.
pub trait RenderSurface {
    /// Device pixels per logical pixel
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    /// Visible area in pane pixels; dashed strokes are cut to it
    fn clip_rect(&self) -> Option<Rect> {
        None
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, stroke: &StrokeStyle);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &StrokeStyle);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_text(&mut self, run: &TextRun);
}

/// A recorded draw instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        stroke: StrokeStyle,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        stroke: StrokeStyle,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text(TextRun),
}

/// Surface that records instructions for hosts that replay them later.
#[derive(Debug, Default, Clone)]
pub struct DrawCommandList {
    pub commands: Vec<DrawCommand>,
}

impl DrawCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text runs in draw order
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }
}

impl RenderSurface for DrawCommandList {
    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            stroke: *stroke,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, run: &TextRun) {
        self.commands.push(DrawCommand::Text(run.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_numeric_codes() {
        let style: LineStyle = serde_json::from_str("2").unwrap();
        assert_eq!(style, LineStyle::Dashed);
        assert_eq!(serde_json::to_string(&LineStyle::SparseDotted).unwrap(), "4");
        assert!(serde_json::from_str::<LineStyle>("9").is_err());
    }

    #[test]
    fn test_dash_patterns_scale_with_width() {
        assert!(LineStyle::Solid.dash_pattern(2.0).is_empty());
        assert_eq!(LineStyle::Dashed.dash_pattern(2.0), vec![4.0, 4.0]);
        assert_eq!(LineStyle::SparseDotted.dash_pattern(1.0), vec![1.0, 4.0]);
    }

    #[test]
    fn test_command_list_records_in_order() {
        let mut list = DrawCommandList::new();
        let stroke = StrokeStyle::solid(Color::WHITE, 1.0);
        list.stroke_polyline(&[Vec2::ZERO, Vec2::ONE], false, &stroke);
        list.fill_circle(Vec2::ONE, 3.0, Color::BLACK);
        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands[0], DrawCommand::Polyline { .. }));
        assert!(matches!(list.commands[1], DrawCommand::FillCircle { .. }));
    }
}
