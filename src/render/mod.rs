//! Renderers that turn pixel-space tool geometry into draw instructions.
//!
//! Every renderer is a value holder: the pane view refills it with
//! `set_data` whenever the tool is invalidated, and the same data then
//! serves both `draw` and `hit_test` until the next rebuild.

mod anchor;
mod circle;
mod composite;
mod crosshair;
mod hit;
mod polygon;
mod rectangle;
mod segment;
mod surface;
mod text;

pub use anchor::{AnchorData, AnchorRenderer};
pub use circle::{CircleData, CircleRenderer};
pub use composite::CompositeRenderer;
pub use crosshair::{CrosshairData, CrosshairRenderer};
pub use hit::{HitTestResult, HitTestType};
pub use polygon::{PolygonData, PolygonRenderer};
pub use rectangle::{RectangleData, RectangleRenderer};
pub use segment::{LineEnd, SegmentData, SegmentRenderer};
pub use surface::{
    DrawCommand, DrawCommandList, FontSpec, LineStyle, RenderSurface, StrokeStyle, TextRun,
};
pub use text::{TextAlign, TextBox, TextData, TextRenderer};

use bevy::math::Vec2;

use crate::geometry::canvas::dash_segments;

/// A drawable piece of a tool in pane pixels.
pub trait PaneRenderer: Send + Sync {
    fn draw(&self, surface: &mut dyn RenderSurface);

    /// Hit test in pane pixels; `None` when the point misses.
    fn hit_test(&self, point: Vec2) -> Option<HitTestResult>;
}

/// Stroke a polyline, splitting it into dashes when the style asks for it.
pub(crate) fn stroke_styled(
    surface: &mut dyn RenderSurface,
    points: &[Vec2],
    closed: bool,
    stroke: &StrokeStyle,
) {
    if points.len() < 2 || stroke.width <= 0.0 {
        return;
    }
    if stroke.style == LineStyle::Solid {
        surface.stroke_polyline(points, closed, stroke);
        return;
    }

    let mut path = points.to_vec();
    if closed {
        path.push(points[0]);
    }
    let solid = StrokeStyle::solid(stroke.color, stroke.width);
    let clip = surface.clip_rect().map(|rect| rect.inflate(stroke.width));
    let pattern = stroke.style.dash_pattern(stroke.width);
    for (start, end) in dash_segments(&path, &pattern, clip) {
        surface.stroke_polyline(&[start, end], false, &solid);
    }
}

/// Hit tolerance for a stroke of the given width
pub(crate) fn stroke_tolerance(base: f32, width: f32) -> f32 {
    base.max(width / 2.0 + 1.0)
}
