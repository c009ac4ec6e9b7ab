//! Per-tool cache of pixel geometry and renderers.

use bevy::color::Color;
use bevy::log::trace;
use bevy::math::{Rect, Vec2};
use serde_json::Value;

use super::shape::{BuildContext, ToolShape};
use crate::constants::{ANCHOR_RADIUS, HIT_TOLERANCE};
use crate::model::{AnchorPoint, CoordinateAdapter, LogicalPoint};
use crate::render::{
    AnchorData, AnchorRenderer, CompositeRenderer, HitTestResult, PaneRenderer, RenderSurface,
};

/// Host-tunable interaction sizes shared by every view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub hit_tolerance: f32,
    pub anchor_radius: f32,
    pub anchor_color: Color,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            hit_tolerance: HIT_TOLERANCE,
            anchor_radius: ANCHOR_RADIUS,
            anchor_color: Color::srgb_u8(41, 98, 255),
        }
    }
}

/// Snapshot of the tool state a rebuild reads.
pub struct ViewInput<'a> {
    pub shape: &'a dyn ToolShape,
    pub points: &'a [LogicalPoint],
    /// Live pointer position while the tool is being placed
    pub current_point: Option<LogicalPoint>,
    pub options: &'a Value,
    pub visible: bool,
    pub finished: bool,
    pub show_anchors: bool,
    pub active_index: Option<usize>,
}

/// Pixel-space view of one tool.
///
/// The composite renderer is rebuilt only while the view is invalidated.
/// When the host cannot resolve a point the view stays invalidated and
/// draws nothing, so the next frame tries again.
#[derive(Debug)]
pub struct PaneView {
    invalidated: bool,
    renderer: CompositeRenderer,
    anchors: Vec<AnchorPoint>,
}

impl Default for PaneView {
    fn default() -> Self {
        Self {
            invalidated: true,
            renderer: CompositeRenderer::new(),
            anchors: Vec::new(),
        }
    }
}

impl PaneView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Projected points of the last successful rebuild
    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    /// Rebuild the renderers if needed. Returns `false` when the geometry
    /// could not be resolved this frame.
    pub fn update(
        &mut self,
        adapter: CoordinateAdapter,
        input: &ViewInput,
        settings: &ViewSettings,
    ) -> bool {
        if !self.invalidated {
            return true;
        }
        self.renderer.clear();
        self.anchors.clear();

        let mut points = input.points.to_vec();
        if !input.finished
            && let Some(current) = input.current_point
        {
            points.push(current);
        }

        let Some(anchors) = adapter.to_screen_all(&points) else {
            trace!("Tool geometry unresolved, skipping frame");
            return false;
        };

        if input.visible && !anchors.is_empty() {
            let size = adapter.pane_size();
            let ctx = BuildContext {
                anchors: &anchors,
                points: &points,
                options: input.options,
                pane: Rect::from_corners(Vec2::ZERO, size),
                adapter,
                finished: input.finished,
                hit_tolerance: settings.hit_tolerance,
            };
            input.shape.build_renderers(&ctx, &mut self.renderer);

            if input.show_anchors {
                let handles = input.shape.anchors(&ctx);
                if !handles.is_empty() {
                    let mut data = AnchorData::new(handles, settings.anchor_color);
                    data.radius = settings.anchor_radius;
                    data.active_index = input.active_index;
                    self.renderer.append(AnchorRenderer::new(data));
                }
            }
        }

        self.anchors = anchors;
        self.invalidated = false;
        true
    }

    /// Draw the cached renderers; nothing while unresolved.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if !self.invalidated {
            self.renderer.draw(surface);
        }
    }

    pub fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        if self.invalidated {
            return None;
        }
        self.renderer.hit_test(point)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::LinearScales;
    use crate::render::DrawCommandList;
    use crate::tools::shapes::TrendLine;

    fn scales() -> LinearScales {
        LinearScales::new((0.0, 1000.0), (0.0, 100.0), Vec2::new(1000.0, 500.0))
    }

    fn input<'a>(points: &'a [LogicalPoint], options: &'a Value) -> ViewInput<'a> {
        ViewInput {
            shape: &TrendLine,
            points,
            current_point: None,
            options,
            visible: true,
            finished: true,
            show_anchors: false,
            active_index: None,
        }
    }

    #[test]
    fn test_rebuild_only_when_invalidated() {
        let scales = scales();
        let options = TrendLine.default_options();
        let points = [LogicalPoint::new(100.0, 50.0), LogicalPoint::new(300.0, 50.0)];
        let mut view = PaneView::new();

        assert!(view.update(CoordinateAdapter::new(&scales), &input(&points, &options), &ViewSettings::default()));
        assert!(!view.is_invalidated());
        assert!(view.hit_test(Vec2::new(200.0, 250.0)).is_some());

        // Stale input is ignored until the view is invalidated again
        let moved = [LogicalPoint::new(100.0, 10.0), LogicalPoint::new(300.0, 10.0)];
        view.update(CoordinateAdapter::new(&scales), &input(&moved, &options), &ViewSettings::default());
        assert!(view.hit_test(Vec2::new(200.0, 250.0)).is_some());

        view.invalidate();
        view.update(CoordinateAdapter::new(&scales), &input(&moved, &options), &ViewSettings::default());
        assert!(view.hit_test(Vec2::new(200.0, 250.0)).is_none());
        assert!(view.hit_test(Vec2::new(200.0, 450.0)).is_some());
    }

    #[test]
    fn test_unresolved_scales_draw_nothing_and_stay_invalidated() {
        let scales = LinearScales::unresolved();
        let options = json!({});
        let points = [LogicalPoint::new(100.0, 50.0), LogicalPoint::new(300.0, 50.0)];
        let mut view = PaneView::new();

        assert!(!view.update(CoordinateAdapter::new(&scales), &input(&points, &options), &ViewSettings::default()));
        assert!(view.is_invalidated());

        let mut list = DrawCommandList::new();
        view.draw(&mut list);
        assert!(list.is_empty());
        assert!(view.hit_test(Vec2::new(200.0, 250.0)).is_none());
    }

    #[test]
    fn test_anchor_renderer_is_last() {
        let scales = scales();
        let options = TrendLine.default_options();
        let points = [LogicalPoint::new(100.0, 50.0), LogicalPoint::new(300.0, 50.0)];
        let mut view = PaneView::new();
        let mut with_anchors = input(&points, &options);
        with_anchors.show_anchors = true;
        view.update(CoordinateAdapter::new(&scales), &with_anchors, &ViewSettings::default());

        // The handle wins over the line it sits on
        let hit = view.hit_test(Vec2::new(100.0, 250.0)).unwrap();
        assert_eq!(hit.point_index, Some(0));
    }

    #[test]
    fn test_current_point_extends_unfinished_tool() {
        let scales = scales();
        let options = TrendLine.default_options();
        let points = [LogicalPoint::new(100.0, 50.0)];
        let mut view = PaneView::new();
        let mut creating = input(&points, &options);
        creating.finished = false;
        creating.current_point = Some(LogicalPoint::new(300.0, 50.0));
        view.update(CoordinateAdapter::new(&scales), &creating, &ViewSettings::default());
        assert_eq!(view.anchors().len(), 2);
        assert!(view.hit_test(Vec2::new(200.0, 250.0)).is_some());
    }

    #[test]
    fn test_hidden_tool_is_not_hit() {
        let scales = scales();
        let options = TrendLine.default_options();
        let points = [LogicalPoint::new(100.0, 50.0), LogicalPoint::new(300.0, 50.0)];
        let mut view = PaneView::new();
        let mut hidden = input(&points, &options);
        hidden.visible = false;
        view.update(CoordinateAdapter::new(&scales), &hidden, &ViewSettings::default());
        assert!(view.hit_test(Vec2::new(200.0, 250.0)).is_none());
    }
}
