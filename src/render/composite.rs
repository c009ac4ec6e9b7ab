//! Ordered stack of renderers making up one tool.

use bevy::math::Vec2;

use super::PaneRenderer;
use super::hit::HitTestResult;
use super::surface::RenderSurface;

/// Draws children in append order and hit-tests them in reverse, so the
/// last appended renderer is both on top and the first to be hit.
#[derive(Default)]
pub struct CompositeRenderer {
    renderers: Vec<Box<dyn PaneRenderer>>,
}

impl CompositeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, renderer: impl PaneRenderer + 'static) {
        self.renderers.push(Box::new(renderer));
    }

    pub fn append_boxed(&mut self, renderer: Box<dyn PaneRenderer>) {
        self.renderers.push(renderer);
    }

    pub fn clear(&mut self) {
        self.renderers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }
}

impl PaneRenderer for CompositeRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        for renderer in &self.renderers {
            renderer.draw(surface);
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        self.renderers
            .iter()
            .rev()
            .find_map(|renderer| renderer.hit_test(point))
    }
}

impl std::fmt::Debug for CompositeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRenderer")
            .field("len", &self.renderers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use bevy::color::Color;
    use bevy::math::Rect;

    use super::*;
    use crate::common::CursorHint;
    use crate::render::{
        DrawCommand, DrawCommandList, HitTestType, RectangleData, RectangleRenderer,
        SegmentData, SegmentRenderer, StrokeStyle,
    };

    /// Renderer that always hits with a distinguishable cursor
    struct Marker(CursorHint);

    impl PaneRenderer for Marker {
        fn draw(&self, _surface: &mut dyn RenderSurface) {}

        fn hit_test(&self, _point: Vec2) -> Option<HitTestResult> {
            Some(HitTestResult::new(HitTestType::Regular).with_cursor(self.0))
        }
    }

    #[test]
    fn test_last_appended_wins_hit_test() {
        let mut composite = CompositeRenderer::new();
        composite.append(Marker(CursorHint::Move));
        composite.append(Marker(CursorHint::Crosshair));
        let hit = composite.hit_test(Vec2::ZERO).unwrap();
        assert_eq!(hit.cursor, CursorHint::Crosshair);
    }

    #[test]
    fn test_draw_in_append_order() {
        let pane = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut rect = RectangleData::new(Vec2::ZERO, Vec2::splat(10.0), pane);
        rect.fill = Some(Color::BLACK);

        let mut composite = CompositeRenderer::new();
        composite.append(RectangleRenderer::new(rect));
        composite.append(SegmentRenderer::new(SegmentData::new(
            Vec2::ZERO,
            Vec2::ONE,
            StrokeStyle::solid(Color::WHITE, 1.0),
            pane,
        )));

        let mut list = DrawCommandList::new();
        composite.draw(&mut list);
        assert!(matches!(list.commands[0], DrawCommand::FillPolygon { .. }));
        assert!(matches!(list.commands[1], DrawCommand::Polyline { .. }));
    }

    #[test]
    fn test_clear_and_empty() {
        let mut composite = CompositeRenderer::new();
        assert!(composite.is_empty());
        assert!(composite.hit_test(Vec2::ZERO).is_none());
        composite.append(Marker(CursorHint::Move));
        assert_eq!(composite.len(), 1);
        composite.clear();
        assert!(composite.is_empty());
    }
}
