//! Straight line segments with extensions and arrow ends.

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::hit::{HitTestResult, HitTestType};
use super::surface::{RenderSurface, StrokeStyle};
use super::{PaneRenderer, stroke_styled, stroke_tolerance};
use crate::constants::HIT_TOLERANCE;
use crate::geometry::canvas::arrow_head;
use crate::geometry::{extend_and_clip_segment, point_near_segment};

/// Decoration at one end of a line, stored as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LineEnd {
    #[default]
    Normal,
    Arrow,
}

impl TryFrom<u8> for LineEnd {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineEnd::Normal),
            1 => Ok(LineEnd::Arrow),
            other => Err(format!("unknown line end {}", other)),
        }
    }
}

impl From<LineEnd> for u8 {
    fn from(end: LineEnd) -> Self {
        match end {
            LineEnd::Normal => 0,
            LineEnd::Arrow => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentData {
    pub start: Vec2,
    pub end: Vec2,
    pub stroke: StrokeStyle,
    pub extend_left: bool,
    pub extend_right: bool,
    pub start_end: LineEnd,
    pub end_end: LineEnd,
    /// Pane rectangle the extensions are clipped to
    pub bounds: Rect,
    pub hit_tolerance: f32,
    pub hit_kind: HitTestType,
}

impl SegmentData {
    pub fn new(start: Vec2, end: Vec2, stroke: StrokeStyle, bounds: Rect) -> Self {
        Self {
            start,
            end,
            stroke,
            extend_left: false,
            extend_right: false,
            start_end: LineEnd::Normal,
            end_end: LineEnd::Normal,
            bounds,
            hit_tolerance: HIT_TOLERANCE,
            hit_kind: HitTestType::Regular,
        }
    }

    pub fn extended(mut self, left: bool, right: bool) -> Self {
        self.extend_left = left;
        self.extend_right = right;
        self
    }
}

#[derive(Debug, Default)]
pub struct SegmentRenderer {
    data: Option<SegmentData>,
    /// Endpoints after extension and clipping
    visible: Option<(Vec2, Vec2)>,
}

impl SegmentRenderer {
    pub fn new(data: SegmentData) -> Self {
        let mut renderer = Self::default();
        renderer.set_data(data);
        renderer
    }

    pub fn set_data(&mut self, data: SegmentData) {
        self.visible = if data.extend_left || data.extend_right {
            extend_and_clip_segment(
                data.start,
                data.end,
                data.extend_left,
                data.extend_right,
                data.bounds,
            )
        } else {
            Some((data.start, data.end))
        };
        self.data = Some(data);
    }

    pub fn visible_segment(&self) -> Option<(Vec2, Vec2)> {
        self.visible
    }
}

impl PaneRenderer for SegmentRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let (Some(data), Some((a, b))) = (&self.data, self.visible) else {
            return;
        };
        // Far-off endpoints are cut to the pane before stroking
        let drawn = if data.bounds.is_empty() {
            Some((a, b))
        } else {
            extend_and_clip_segment(a, b, false, false, data.bounds.inflate(data.stroke.width))
        };
        if let Some((a, b)) = drawn {
            stroke_styled(surface, &[a, b], false, &data.stroke);
        }

        // Arrows sit on the original endpoints, not on the extensions
        let arrow_stroke = StrokeStyle::solid(data.stroke.color, data.stroke.width);
        if data.start_end == LineEnd::Arrow
            && let Some(head) = arrow_head(data.end, data.start, data.stroke.width)
        {
            surface.stroke_polyline(&head, false, &arrow_stroke);
        }
        if data.end_end == LineEnd::Arrow
            && let Some(head) = arrow_head(data.start, data.end, data.stroke.width)
        {
            surface.stroke_polyline(&head, false, &arrow_stroke);
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        let (data, (a, b)) = (self.data.as_ref()?, self.visible?);
        let tolerance = stroke_tolerance(data.hit_tolerance, data.stroke.width);
        point_near_segment(point, a, b, tolerance).then(|| HitTestResult::new(data.hit_kind))
    }
}
