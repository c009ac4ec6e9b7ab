//! Rectangle and price range tools.

use bevy::color::Color;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{append_text, text_defaults};
use crate::common::CursorHint;
use crate::model::{AnchorPoint, LogicalPoint};
use crate::options::price_precision;
use crate::options::views::{
    BackgroundView, BorderView, ExtendView, LineView, TextView, section,
};
use crate::render::{
    CompositeRenderer, LineEnd, RectangleData, RectangleRenderer, SegmentData, SegmentRenderer,
    TextAlign, TextRenderer,
};
use crate::tools::shape::{BuildContext, PointsCount, ToolShape};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct RectangleView {
    background: BackgroundView,
    border: BorderView,
    extend: ExtendView,
}

/// Corner handles for a box spanned by two points.
///
/// Handles 0 and 1 sit on the stored points; 2 and 3 are the remaining
/// corners and edit one coordinate of each stored point.
fn corner_anchors(ctx: &BuildContext) -> Vec<AnchorPoint> {
    let (Some(a), Some(b)) = (ctx.anchor(0), ctx.anchor(1)) else {
        return ctx.anchors.to_vec();
    };
    let diagonal = b.position - a.position;
    let (main, cross) = if diagonal.x * diagonal.y >= 0.0 {
        (CursorHint::ResizeNwse, CursorHint::ResizeNesw)
    } else {
        (CursorHint::ResizeNesw, CursorHint::ResizeNwse)
    };
    vec![
        a.with_cursor(main),
        b.with_cursor(main),
        AnchorPoint::new(Vec2::new(b.x(), a.y()), 2).with_cursor(cross),
        AnchorPoint::new(Vec2::new(a.x(), b.y()), 3).with_cursor(cross),
    ]
}

fn move_corner(points: &mut [LogicalPoint], index: usize, to: LogicalPoint) {
    if points.len() < 2 {
        if let Some(point) = points.get_mut(index) {
            *point = to;
        }
        return;
    }
    match index {
        0 | 1 => points[index] = to,
        2 => {
            points[1].timestamp = to.timestamp;
            points[0].price = to.price;
        }
        3 => {
            points[0].timestamp = to.timestamp;
            points[1].price = to.price;
        }
        _ => {}
    }
}

pub struct Rectangle;

impl ToolShape for Rectangle {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        json!({
            "rectangle": {
                "background": { "color": "rgba(156, 39, 176, 0.2)" },
                "border": { "color": "#9c27b0", "width": 1, "style": 0, "radius": 0 },
                "extend": { "left": false, "right": false },
            },
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        let (Some(a), Some(b)) = (ctx.anchor(0), ctx.anchor(1)) else {
            return;
        };
        let view: RectangleView = section(ctx.options, "rectangle");

        let mut data = RectangleData::new(a.position, b.position, ctx.pane);
        data.fill = view.background.fill();
        data.border = view.border.stroke();
        data.extend_left = view.extend.left;
        data.extend_right = view.extend.right;
        data.hit_tolerance = ctx.hit_tolerance;
        out.append(RectangleRenderer::new(data));

        append_text(ctx, (a.position + b.position) / 2.0, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        corner_anchors(ctx)
    }

    fn move_point(&self, points: &mut [LogicalPoint], index: usize, to: LogicalPoint) {
        move_corner(points, index, to);
    }

    fn accent_color(&self, options: &Value) -> Color {
        let view: RectangleView = section(options, "rectangle");
        view.border.stroke().map(|s| s.color).unwrap_or(Color::WHITE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct PriceRangeView {
    background: BackgroundView,
    border: BorderView,
    line: LineView,
}

/// Measures the price distance between two points.
pub struct PriceRange;

impl PriceRange {
    fn label(points: &[LogicalPoint], precision: usize) -> Option<String> {
        let (from, to) = (points.first()?, points.get(1)?);
        let diff = to.price - from.price;
        let percent = if from.price != 0.0 {
            format!(" ({:+.2}%)", diff / from.price.abs() * 100.0)
        } else {
            String::new()
        };
        Some(format!("{:+.*}{}", precision, diff, percent))
    }
}

impl ToolShape for PriceRange {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        let mut text = text_defaults("");
        text["font"]["color"] = json!("#ffffff");
        text["font"]["size"] = json!(12);
        text["box"]["background"]["color"] = json!("#2962ff");
        text["box"]["border"]["radius"] = json!(4);
        text["box"]["padding"] = json!(4);
        json!({
            "priceRange": {
                "background": { "color": "rgba(41, 98, 255, 0.2)" },
                "border": { "color": "", "width": 0, "style": 0, "radius": 0 },
                "line": { "color": "#2962ff", "width": 1, "style": 0 },
            },
            "text": text,
            "precision": 2,
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        let (Some(a), Some(b)) = (ctx.anchor(0), ctx.anchor(1)) else {
            return;
        };
        let view: PriceRangeView = section(ctx.options, "priceRange");

        let mut rect = RectangleData::new(a.position, b.position, ctx.pane);
        rect.fill = view.background.fill();
        rect.border = view.border.stroke();
        rect.hit_tolerance = ctx.hit_tolerance;
        out.append(RectangleRenderer::new(rect));

        // Arrow from the first price to the second along the middle
        let mid_x = (a.x() + b.x()) / 2.0;
        let mut arrow = SegmentData::new(
            Vec2::new(mid_x, a.y()),
            Vec2::new(mid_x, b.y()),
            view.line.stroke(),
            ctx.pane,
        );
        arrow.end_end = LineEnd::Arrow;
        arrow.hit_tolerance = ctx.hit_tolerance;
        out.append(SegmentRenderer::new(arrow));

        let precision = price_precision(ctx.options);
        let Some(label) = Self::label(ctx.points, precision) else {
            return;
        };
        let mut text: TextView = section(ctx.options, "text");
        text.value = label;
        // Label sits past the second point, away from the box
        let below = b.y() >= a.y();
        text.text_box.alignment.vertical = if below {
            TextAlign::Start
        } else {
            TextAlign::End
        };
        let offset = if below { 4.0 } else { -4.0 };
        out.append(TextRenderer::new(
            text.text_data(Vec2::new(mid_x, b.y() + offset)),
        ));
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        corner_anchors(ctx)
    }

    fn move_point(&self, points: &mut [LogicalPoint], index: usize, to: LogicalPoint) {
        move_corner(points, index, to);
    }

    fn accent_color(&self, options: &Value) -> Color {
        let view: PriceRangeView = section(options, "priceRange");
        view.line.stroke().color
    }
}
