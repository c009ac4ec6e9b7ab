//! Axis-aligned rectangles with optional fill and horizontal extensions.

use bevy::color::Color;
use bevy::math::{Rect, Vec2};

use super::hit::{HitTestResult, HitTestType};
use super::surface::{RenderSurface, StrokeStyle};
use super::{PaneRenderer, stroke_styled, stroke_tolerance};
use crate::constants::HIT_TOLERANCE;
use crate::geometry::{point_in_rect, point_near_rect_edge, rect_corners, rect_from_corners};

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleData {
    pub corner_a: Vec2,
    pub corner_b: Vec2,
    pub border: Option<StrokeStyle>,
    pub fill: Option<Color>,
    pub extend_left: bool,
    pub extend_right: bool,
    pub bounds: Rect,
    pub hit_tolerance: f32,
}

impl RectangleData {
    pub fn new(corner_a: Vec2, corner_b: Vec2, bounds: Rect) -> Self {
        Self {
            corner_a,
            corner_b,
            border: None,
            fill: None,
            extend_left: false,
            extend_right: false,
            bounds,
            hit_tolerance: HIT_TOLERANCE,
        }
    }
}

#[derive(Debug, Default)]
pub struct RectangleRenderer {
    data: Option<RectangleData>,
    rect: Option<Rect>,
}

impl RectangleRenderer {
    pub fn new(data: RectangleData) -> Self {
        let mut renderer = Self::default();
        renderer.set_data(data);
        renderer
    }

    pub fn set_data(&mut self, data: RectangleData) {
        let mut rect = rect_from_corners(data.corner_a, data.corner_b);
        if data.extend_left {
            rect.min.x = rect.min.x.min(data.bounds.min.x);
        }
        if data.extend_right {
            rect.max.x = rect.max.x.max(data.bounds.max.x);
        }
        self.rect = Some(rect);
        self.data = Some(data);
    }

    /// The drawn rectangle after extensions
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }
}

impl PaneRenderer for RectangleRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let (Some(data), Some(rect)) = (&self.data, self.rect) else {
            return;
        };
        let corners = rect_corners(rect);
        if let Some(fill) = data.fill {
            surface.fill_polygon(&corners, fill);
        }
        if let Some(border) = &data.border {
            stroke_styled(surface, &corners, true, border);
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        let (data, rect) = (self.data.as_ref()?, self.rect?);
        let width = data.border.map(|b| b.width).unwrap_or(0.0);
        let tolerance = stroke_tolerance(data.hit_tolerance, width);

        if point_near_rect_edge(point, rect, tolerance) {
            return Some(HitTestResult::new(HitTestType::Regular));
        }
        if data.fill.is_some() && point_in_rect(point, rect) {
            return Some(HitTestResult::new(HitTestType::MovePointBackground));
        }
        None
    }
}
