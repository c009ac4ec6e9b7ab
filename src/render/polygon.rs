//! Open polylines and closed polygons (paths, brushes, triangles, bands).

use bevy::color::Color;
use bevy::math::Vec2;

use super::hit::{HitTestResult, HitTestType};
use super::surface::{RenderSurface, StrokeStyle};
use super::{PaneRenderer, stroke_styled, stroke_tolerance};
use crate::constants::HIT_TOLERANCE;
use crate::geometry::{point_in_polygon, point_near_polygon_edge, point_near_polyline};

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonData {
    pub points: Vec<Vec2>,
    pub closed: bool,
    pub stroke: Option<StrokeStyle>,
    pub fill: Option<Color>,
    pub hit_tolerance: f32,
}

impl PolygonData {
    pub fn polyline(points: Vec<Vec2>, stroke: StrokeStyle) -> Self {
        Self {
            points,
            closed: false,
            stroke: Some(stroke),
            fill: None,
            hit_tolerance: HIT_TOLERANCE,
        }
    }

    pub fn polygon(points: Vec<Vec2>, stroke: Option<StrokeStyle>, fill: Option<Color>) -> Self {
        Self {
            points,
            closed: true,
            stroke,
            fill,
            hit_tolerance: HIT_TOLERANCE,
        }
    }
}

#[derive(Debug, Default)]
pub struct PolygonRenderer {
    data: Option<PolygonData>,
}

impl PolygonRenderer {
    pub fn new(data: PolygonData) -> Self {
        Self { data: Some(data) }
    }

    pub fn set_data(&mut self, data: PolygonData) {
        self.data = Some(data);
    }
}

impl PaneRenderer for PolygonRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let Some(data) = &self.data else {
            return;
        };
        if data.closed
            && data.points.len() >= 3
            && let Some(fill) = data.fill
        {
            surface.fill_polygon(&data.points, fill);
        }
        if let Some(stroke) = &data.stroke {
            stroke_styled(surface, &data.points, data.closed, stroke);
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let width = data.stroke.map(|s| s.width).unwrap_or(0.0);
        let tolerance = stroke_tolerance(data.hit_tolerance, width);

        let on_edge = if data.closed {
            point_near_polygon_edge(point, &data.points, tolerance)
        } else {
            point_near_polyline(point, &data.points, tolerance)
        };
        if on_edge && data.stroke.is_some() {
            return Some(HitTestResult::new(HitTestType::Regular));
        }
        if data.closed && data.fill.is_some() && point_in_polygon(point, &data.points) {
            return Some(HitTestResult::new(HitTestType::MovePointBackground));
        }
        None
    }
}
