//! Interactive point handles drawn on top of a tool.

use bevy::color::Color;
use bevy::math::{Rect, Vec2};

use super::PaneRenderer;
use super::hit::HitTestResult;
use super::surface::{RenderSurface, StrokeStyle};
use crate::constants::{ANCHOR_HIT_PADDING, ANCHOR_RADIUS};
use crate::geometry::{point_in_rect, rect_corners};
use crate::model::AnchorPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct AnchorData {
    pub anchors: Vec<AnchorPoint>,
    pub radius: f32,
    pub color: Color,
    pub background: Color,
    /// Handle being dragged, drawn slightly larger
    pub active_index: Option<usize>,
}

impl AnchorData {
    pub fn new(anchors: Vec<AnchorPoint>, color: Color) -> Self {
        Self {
            anchors,
            radius: ANCHOR_RADIUS,
            color,
            background: Color::WHITE,
            active_index: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AnchorRenderer {
    data: Option<AnchorData>,
}

impl AnchorRenderer {
    pub fn new(data: AnchorData) -> Self {
        Self { data: Some(data) }
    }

    pub fn set_data(&mut self, data: AnchorData) {
        self.data = Some(data);
    }

    fn radius_for(data: &AnchorData, anchor: &AnchorPoint) -> f32 {
        if data.active_index == Some(anchor.point_index) {
            data.radius + 1.0
        } else {
            data.radius
        }
    }
}

impl PaneRenderer for AnchorRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let Some(data) = &self.data else {
            return;
        };
        let stroke = StrokeStyle::solid(data.color, 1.0);

        for anchor in &data.anchors {
            let radius = Self::radius_for(data, anchor);
            if anchor.square {
                let rect = Rect::from_center_half_size(anchor.position, Vec2::splat(radius));
                let corners = rect_corners(rect);
                surface.fill_polygon(&corners, data.background);
                surface.stroke_polyline(&corners, true, &stroke);
            } else {
                surface.fill_circle(anchor.position, radius, data.background);
                surface.stroke_circle(anchor.position, radius, &stroke);
            }
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        // Later handles are drawn on top
        data.anchors.iter().rev().find_map(|anchor| {
            let reach = Self::radius_for(data, anchor) + ANCHOR_HIT_PADDING;
            let hit = if anchor.square {
                let rect = Rect::from_center_half_size(anchor.position, Vec2::splat(reach));
                point_in_rect(point, rect)
            } else {
                point.distance(anchor.position) <= reach
            };
            hit.then(|| HitTestResult::anchor(anchor.point_index, anchor.cursor))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CursorHint;
    use crate::render::{DrawCommandList, HitTestType};

    fn anchors() -> Vec<AnchorPoint> {
        vec![
            AnchorPoint::new(Vec2::new(10.0, 10.0), 0),
            AnchorPoint::new(Vec2::new(100.0, 10.0), 1).with_cursor(CursorHint::ResizeEw),
        ]
    }

    #[test]
    fn test_hit_reports_point_index_and_cursor() {
        let renderer = AnchorRenderer::new(AnchorData::new(anchors(), Color::WHITE));
        let hit = renderer.hit_test(Vec2::new(104.0, 12.0)).unwrap();
        assert_eq!(hit.kind, HitTestType::ChangePoint);
        assert_eq!(hit.point_index, Some(1));
        assert_eq!(hit.cursor, CursorHint::ResizeEw);
        assert!(renderer.hit_test(Vec2::new(50.0, 10.0)).is_none());
    }

    #[test]
    fn test_padding_extends_reach() {
        let renderer = AnchorRenderer::new(AnchorData::new(anchors(), Color::WHITE));
        let reach = ANCHOR_RADIUS + ANCHOR_HIT_PADDING;
        assert!(renderer.hit_test(Vec2::new(10.0 + reach - 0.1, 10.0)).is_some());
        assert!(renderer.hit_test(Vec2::new(10.0 + reach + 0.5, 10.0)).is_none());
    }

    #[test]
    fn test_each_handle_fills_then_strokes() {
        let renderer = AnchorRenderer::new(AnchorData::new(anchors(), Color::WHITE));
        let mut list = DrawCommandList::new();
        renderer.draw(&mut list);
        assert_eq!(list.len(), 4);
    }
}
