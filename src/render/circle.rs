//! Circles given by a center and a radius in pixels.

use bevy::color::Color;
use bevy::math::Vec2;

use super::hit::{HitTestResult, HitTestType};
use super::surface::{RenderSurface, StrokeStyle};
use super::{PaneRenderer, stroke_styled, stroke_tolerance};
use crate::constants::HIT_TOLERANCE;
use crate::geometry::canvas::circle_outline;
use crate::geometry::distance_to_circle_edge;

#[derive(Debug, Clone, PartialEq)]
pub struct CircleData {
    pub center: Vec2,
    pub radius: f32,
    pub stroke: Option<StrokeStyle>,
    pub fill: Option<Color>,
    pub hit_tolerance: f32,
}

impl CircleData {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            stroke: None,
            fill: None,
            hit_tolerance: HIT_TOLERANCE,
        }
    }
}

#[derive(Debug, Default)]
pub struct CircleRenderer {
    data: Option<CircleData>,
}

impl CircleRenderer {
    pub fn new(data: CircleData) -> Self {
        Self { data: Some(data) }
    }

    pub fn set_data(&mut self, data: CircleData) {
        self.data = Some(data);
    }
}

impl PaneRenderer for CircleRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let Some(data) = &self.data else {
            return;
        };
        if !data.radius.is_finite() || data.radius <= 0.0 {
            return;
        }
        if let Some(fill) = data.fill {
            surface.fill_circle(data.center, data.radius, fill);
        }
        if let Some(stroke) = &data.stroke {
            if stroke.style == super::LineStyle::Solid {
                surface.stroke_circle(data.center, data.radius, stroke);
            } else {
                let outline = circle_outline(data.center, data.radius);
                stroke_styled(surface, &outline, true, stroke);
            }
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        let data = self.data.as_ref()?;
        let width = data.stroke.map(|s| s.width).unwrap_or(0.0);
        let tolerance = stroke_tolerance(data.hit_tolerance, width);

        if distance_to_circle_edge(point, data.center, data.radius) <= tolerance {
            return Some(HitTestResult::new(HitTestType::Regular));
        }
        if data.fill.is_some() && point.distance(data.center) <= data.radius {
            return Some(HitTestResult::new(HitTestType::MovePointBackground));
        }
        None
    }
}
