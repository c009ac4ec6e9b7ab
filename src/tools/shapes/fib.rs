//! Fibonacci retracement levels between two price points.

use bevy::color::{Alpha, Color};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::options::{color_or, price_precision};
use crate::options::views::{ExtendView, FontView, LineView, section};
use crate::render::{
    CompositeRenderer, RectangleData, RectangleRenderer, SegmentData, SegmentRenderer,
    StrokeStyle, TextAlign, TextData, TextRenderer,
};
use crate::tools::shape::{BuildContext, PointsCount, ToolShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct LevelView {
    coeff: f64,
    color: String,
    opacity: f32,
    visible: bool,
}

impl Default for LevelView {
    fn default() -> Self {
        Self {
            coeff: 0.0,
            color: "#787b86".to_string(),
            opacity: 0.0,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct LabelsView {
    visible: bool,
    font: FontView,
}

impl Default for LabelsView {
    fn default() -> Self {
        Self {
            visible: true,
            font: FontView {
                size: 12.0,
                ..Default::default()
            },
        }
    }
}

pub struct FibRetracement;

impl FibRetracement {
    /// Price of a level: coefficient 0 sits on the second point, 1 on the first.
    fn level_price(first: f64, second: f64, coeff: f64) -> f64 {
        second + (first - second) * coeff
    }
}

impl ToolShape for FibRetracement {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        let level = |coeff: f64, color: &str| {
            json!({ "coeff": coeff, "color": color, "opacity": 0.15, "visible": true })
        };
        json!({
            "line": { "color": "#787b86", "width": 1, "style": 2 },
            "extend": { "left": false, "right": false },
            "levels": [
                level(0.0, "#787b86"),
                level(0.236, "#f23645"),
                level(0.382, "#ff9800"),
                level(0.5, "#4caf50"),
                level(0.618, "#089981"),
                level(0.786, "#00bcd4"),
                level(1.0, "#787b86"),
            ],
            "labels": { "visible": true, "font": { "size": 12, "color": "#787b86" } },
            "precision": 2,
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        let (Some(a), Some(b)) = (ctx.anchor(0), ctx.anchor(1)) else {
            return;
        };
        let (Some(first), Some(second)) = (ctx.points.first(), ctx.points.get(1)) else {
            return;
        };

        let line: LineView = section(ctx.options, "line");
        let extend: ExtendView = section(ctx.options, "extend");
        let labels: LabelsView = section(ctx.options, "labels");
        let levels: Vec<LevelView> = section(ctx.options, "levels");
        let precision = price_precision(ctx.options);

        let left = if extend.left { ctx.pane.min.x } else { a.x().min(b.x()) };
        let right = if extend.right { ctx.pane.max.x } else { a.x().max(b.x()) };
        let host = ctx.adapter.host();

        // Resolve every visible level to a pixel row
        let rows: Vec<(LevelView, f64, f32)> = levels
            .into_iter()
            .filter(|level| level.visible)
            .filter_map(|level| {
                let price = Self::level_price(first.price, second.price, level.coeff);
                let y = host.price_to_coordinate(price)?;
                Some((level, price, y))
            })
            .collect();

        // Bands between neighbouring levels go underneath the lines
        for pair in rows.windows(2) {
            let (upper, _, y0) = &pair[0];
            let (_, _, y1) = &pair[1];
            if upper.opacity <= 0.0 {
                continue;
            }
            let fill = color_or(&upper.color, Color::WHITE).with_alpha(upper.opacity);
            let mut band =
                RectangleData::new(Vec2::new(left, *y0), Vec2::new(right, *y1), ctx.pane);
            band.fill = Some(fill);
            band.hit_tolerance = ctx.hit_tolerance;
            out.append(RectangleRenderer::new(band));
        }

        for (level, price, y) in &rows {
            let color = color_or(&level.color, Color::WHITE);
            let mut data = SegmentData::new(
                Vec2::new(left, *y),
                Vec2::new(right, *y),
                StrokeStyle::solid(color, line.width.max(1.0)),
                ctx.pane,
            );
            data.hit_tolerance = ctx.hit_tolerance;
            out.append(SegmentRenderer::new(data));

            if labels.visible {
                let mut text = TextData::new(
                    format!("{} ({:.*})", level.coeff, precision, price),
                    Vec2::new(left - 4.0, *y),
                    labels.font.spec(),
                );
                text.color = Some(color);
                text.horizontal = TextAlign::End;
                text.vertical = TextAlign::Center;
                out.append(TextRenderer::new(text));
            }
        }

        // Dashed trend line joining the two points
        let mut trend = SegmentData::new(a.position, b.position, line.stroke(), ctx.pane);
        trend.hit_tolerance = ctx.hit_tolerance;
        out.append(SegmentRenderer::new(trend));
    }
}
