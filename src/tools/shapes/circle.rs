//! Circle spanned by a center point and a point on its rim.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{append_text, text_defaults};
use crate::common::CursorHint;
use crate::model::AnchorPoint;
use crate::options::views::{BackgroundView, BorderView, section};
use crate::render::{CircleData, CircleRenderer, CompositeRenderer};
use crate::tools::shape::{BuildContext, PointsCount, ToolShape};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct CircleView {
    background: BackgroundView,
    border: BorderView,
}

pub struct Circle;

impl ToolShape for Circle {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        json!({
            "circle": {
                "background": { "color": "rgba(255, 152, 0, 0.2)" },
                "border": { "color": "#ff9800", "width": 1, "style": 0, "radius": 0 },
            },
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        let (Some(center), Some(rim)) = (ctx.anchor(0), ctx.anchor(1)) else {
            return;
        };
        let view: CircleView = section(ctx.options, "circle");

        let mut data = CircleData::new(center.position, center.position.distance(rim.position));
        data.fill = view.background.fill();
        data.stroke = view.border.stroke();
        data.hit_tolerance = ctx.hit_tolerance;
        out.append(CircleRenderer::new(data));

        append_text(ctx, center.position, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        ctx.anchors
            .iter()
            .map(|a| {
                if a.point_index == 0 {
                    a.with_cursor(CursorHint::Move)
                } else {
                    a.with_cursor(CursorHint::ResizeEw)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec2;

    use super::*;
    use crate::render::{HitTestType, PaneRenderer};
    use crate::tools::shapes::tests::{TestFrame, build};

    #[test]
    fn test_radius_follows_rim_point() {
        // Center (500, 250), rim 100px to the right
        let frame = TestFrame::new(vec![(500.0, 50.0), (600.0, 50.0)]);
        let renderer = build(&Circle, &frame, &Circle.default_options());
        let rim = renderer.hit_test(Vec2::new(500.0, 150.0)).unwrap();
        assert_eq!(rim.kind, HitTestType::Regular);
        let inside = renderer.hit_test(Vec2::new(520.0, 260.0)).unwrap();
        assert_eq!(inside.kind, HitTestType::MovePointBackground);
        assert!(renderer.hit_test(Vec2::new(700.0, 250.0)).is_none());
    }
}
