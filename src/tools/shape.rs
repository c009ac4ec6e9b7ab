//! The geometry contract every drawing tool implements.

use bevy::color::Color;
use bevy::math::Rect;
use serde_json::Value;

use crate::model::{AnchorPoint, CoordinateAdapter, LogicalPoint};
use crate::options::color_or;
use crate::render::CompositeRenderer;

/// How many points a tool takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsCount {
    Fixed(usize),
    /// Any number of points; creation ends on a double click or pointer release
    Unbounded,
}

impl PointsCount {
    /// Numeric form used by hosts (`-1` for unbounded)
    pub fn as_raw(&self) -> i64 {
        match self {
            PointsCount::Fixed(n) => *n as i64,
            PointsCount::Unbounded => -1,
        }
    }

    /// Whether `len` points complete the tool
    pub fn is_complete(&self, len: usize) -> bool {
        match self {
            PointsCount::Fixed(n) => len >= *n,
            PointsCount::Unbounded => len >= 2,
        }
    }

    pub fn accepts_more(&self, len: usize) -> bool {
        match self {
            PointsCount::Fixed(n) => len < *n,
            PointsCount::Unbounded => true,
        }
    }
}

/// Gesture that places a tool's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationMode {
    /// One click per point
    #[default]
    ClickClick,
    /// Press, drag to record points, release
    ClickDrag,
}

/// Everything a shape needs to build its renderers for one frame.
pub struct BuildContext<'a> {
    /// Points projected to pixels, including the live point while creating
    pub anchors: &'a [AnchorPoint],
    pub points: &'a [LogicalPoint],
    pub options: &'a Value,
    pub pane: Rect,
    pub adapter: CoordinateAdapter<'a>,
    pub finished: bool,
    pub hit_tolerance: f32,
}

impl BuildContext<'_> {
    pub fn anchor(&self, index: usize) -> Option<&AnchorPoint> {
        self.anchors.get(index)
    }
}

/// Shape-specific behaviour plugged into a [`crate::tools::LineTool`].
pub trait ToolShape: Send + Sync {
    fn points_count(&self) -> PointsCount;

    fn creation_mode(&self) -> CreationMode {
        CreationMode::ClickClick
    }

    /// Shape defaults, merged under the caller's options at creation
    fn default_options(&self) -> Value;

    /// Append this frame's renderers for the tool body.
    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer);

    /// Handles shown while the tool is hovered, selected or edited.
    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        ctx.anchors.to_vec()
    }

    /// Move the point behind handle `index` to `to`.
    fn move_point(&self, points: &mut [LogicalPoint], index: usize, to: LogicalPoint) {
        if let Some(point) = points.get_mut(index) {
            *point = to;
        }
    }

    /// Colour used for the tool's price-axis labels
    fn accent_color(&self, options: &Value) -> Color {
        const CANDIDATES: [&str; 4] = [
            "/line/color",
            "/rectangle/border/color",
            "/circle/border/color",
            "/text/font/color",
        ];
        CANDIDATES
            .iter()
            .find_map(|pointer| options.pointer(pointer).and_then(Value::as_str))
            .map(|color| color_or(color, Color::WHITE))
            .unwrap_or(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_count_completion() {
        assert!(!PointsCount::Fixed(2).is_complete(1));
        assert!(PointsCount::Fixed(2).is_complete(2));
        assert!(!PointsCount::Fixed(2).accepts_more(2));
        assert!(PointsCount::Unbounded.accepts_more(100));
        assert_eq!(PointsCount::Unbounded.as_raw(), -1);
        assert_eq!(PointsCount::Fixed(3).as_raw(), 3);
    }
}
