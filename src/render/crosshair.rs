//! Shared crosshair drawn above every tool.

use bevy::math::Vec2;

use super::hit::HitTestResult;
use super::surface::{RenderSurface, StrokeStyle};
use super::{PaneRenderer, stroke_styled};

#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairData {
    pub position: Vec2,
    pub pane_size: Vec2,
    pub stroke: StrokeStyle,
}

#[derive(Debug, Default)]
pub struct CrosshairRenderer {
    data: Option<CrosshairData>,
}

impl CrosshairRenderer {
    pub fn new(data: CrosshairData) -> Self {
        Self { data: Some(data) }
    }

    pub fn set_data(&mut self, data: CrosshairData) {
        self.data = Some(data);
    }
}

impl PaneRenderer for CrosshairRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let Some(data) = &self.data else {
            return;
        };
        let Vec2 { x, y } = data.position;
        if x < 0.0 || y < 0.0 || x > data.pane_size.x || y > data.pane_size.y {
            return;
        }
        stroke_styled(
            surface,
            &[Vec2::new(x, 0.0), Vec2::new(x, data.pane_size.y)],
            false,
            &data.stroke,
        );
        stroke_styled(
            surface,
            &[Vec2::new(0.0, y), Vec2::new(data.pane_size.x, y)],
            false,
            &data.stroke,
        );
    }

    /// The crosshair never intercepts the pointer
    fn hit_test(&self, _point: Vec2) -> Option<HitTestResult> {
        None
    }
}

#[cfg(test)]
mod tests {
    use bevy::color::Color;

    use super::*;
    use crate::render::DrawCommandList;

    #[test]
    fn test_outside_pane_draws_nothing() {
        let renderer = CrosshairRenderer::new(CrosshairData {
            position: Vec2::new(-1.0, 10.0),
            pane_size: Vec2::new(100.0, 100.0),
            stroke: StrokeStyle::solid(Color::WHITE, 1.0),
        });
        let mut list = DrawCommandList::new();
        renderer.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_draws_two_lines() {
        let renderer = CrosshairRenderer::new(CrosshairData {
            position: Vec2::new(50.0, 10.0),
            pane_size: Vec2::new(100.0, 100.0),
            stroke: StrokeStyle::solid(Color::WHITE, 1.0),
        });
        let mut list = DrawCommandList::new();
        renderer.draw(&mut list);
        assert_eq!(list.len(), 2);
        assert!(renderer.hit_test(Vec2::new(50.0, 10.0)).is_none());
    }
}
