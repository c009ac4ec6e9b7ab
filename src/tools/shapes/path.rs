//! Multi-point tools: click-by-click paths and freehand strokes.

use serde_json::{Value, json};

use crate::model::AnchorPoint;
use crate::options::views::{BackgroundView, LineView, section};
use crate::render::{CompositeRenderer, PolygonData, PolygonRenderer};
use crate::tools::shape::{BuildContext, CreationMode, PointsCount, ToolShape};

fn build_polyline(ctx: &BuildContext, out: &mut CompositeRenderer) {
    if ctx.anchors.len() < 2 {
        return;
    }
    let line: LineView = section(ctx.options, "line");
    let background: BackgroundView = section(ctx.options, "background");
    let points = ctx.anchors.iter().map(|a| a.position).collect();

    let mut data = match background.fill() {
        Some(fill) if ctx.anchors.len() >= 3 => {
            PolygonData::polygon(points, Some(line.stroke()), Some(fill))
        }
        _ => PolygonData::polyline(points, line.stroke()),
    };
    data.hit_tolerance = ctx.hit_tolerance;
    out.append(PolygonRenderer::new(data));
}

/// First and last point handles of a freehand stroke
fn end_anchors(ctx: &BuildContext) -> Vec<AnchorPoint> {
    match ctx.anchors {
        [] => Vec::new(),
        [only] => vec![*only],
        [first, .., last] => vec![*first, *last],
    }
}

/// Polyline placed one click per point, finished with a double click.
pub struct Path;

impl ToolShape for Path {
    fn points_count(&self) -> PointsCount {
        PointsCount::Unbounded
    }

    fn default_options(&self) -> Value {
        json!({
            "line": { "color": "#2962ff", "width": 2, "style": 0 },
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_polyline(ctx, out);
    }
}

/// Freehand stroke recorded while dragging, optionally filled.
pub struct Brush;

impl ToolShape for Brush {
    fn points_count(&self) -> PointsCount {
        PointsCount::Unbounded
    }

    fn creation_mode(&self) -> CreationMode {
        CreationMode::ClickDrag
    }

    fn default_options(&self) -> Value {
        json!({
            "line": { "color": "#00bcd4", "width": 2, "style": 0 },
            "background": { "color": "" },
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_polyline(ctx, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        end_anchors(ctx)
    }
}

/// Wide translucent freehand stroke.
pub struct Highlighter;

impl ToolShape for Highlighter {
    fn points_count(&self) -> PointsCount {
        PointsCount::Unbounded
    }

    fn creation_mode(&self) -> CreationMode {
        CreationMode::ClickDrag
    }

    fn default_options(&self) -> Value {
        json!({
            "line": { "color": "rgba(242, 54, 69, 0.3)", "width": 16, "style": 0 },
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_polyline(ctx, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        end_anchors(ctx)
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use super::*;
    use crate::render::{HitTestType, PaneRenderer};
    use crate::tools::shapes::tests::{TestFrame, build};

    #[test]
    fn test_path_hits_each_leg() {
        let frame = TestFrame::new(vec![(100.0, 80.0), (300.0, 80.0), (300.0, 40.0)]);
        let renderer = build(&Path, &frame, &Path.default_options());
        assert!(renderer.hit_test(Vec2::new(200.0, 100.0)).is_some());
        assert!(renderer.hit_test(Vec2::new(300.0, 200.0)).is_some());
        assert!(renderer.hit_test(Vec2::new(200.0, 200.0)).is_none());
    }

    #[test]
    fn test_filled_brush_hits_interior() {
        let frame = TestFrame::new(vec![(100.0, 80.0), (300.0, 80.0), (200.0, 40.0)]);
        let mut options = Brush.default_options();
        options["background"]["color"] = json!("#00bcd4");
        let renderer = build(&Brush, &frame, &options);
        let hit = renderer.hit_test(Vec2::new(200.0, 150.0)).unwrap();
        assert_eq!(hit.kind, HitTestType::MovePointBackground);
    }

    #[test]
    fn test_highlighter_is_wide() {
        let frame = TestFrame::new(vec![(100.0, 80.0), (300.0, 80.0)]);
        let renderer = build(&Highlighter, &frame, &Highlighter.default_options());
        // Half the 16px width plus one pixel
        assert!(renderer.hit_test(Vec2::new(200.0, 108.0)).is_some());
        assert_eq!(Highlighter.creation_mode(), CreationMode::ClickDrag);
    }

    #[test]
    fn test_brush_shows_end_handles_only() {
        let frame = TestFrame::new(vec![(100.0, 80.0), (150.0, 70.0), (200.0, 60.0)]);
        let options = Brush.default_options();
        let anchors = Brush.anchors(&frame.context(&options));
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[1].point_index, 2);
    }
}
