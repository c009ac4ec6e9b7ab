//! Straight line tools: trend lines, rays and axis-aligned lines.

use bevy::math::Vec2;
use serde_json::{Value, json};

use super::{append_text, line_defaults, text_defaults};
use crate::common::CursorHint;
use crate::model::AnchorPoint;
use crate::options::views::{LineView, section};
use crate::render::{CompositeRenderer, SegmentData, SegmentRenderer};
use crate::tools::shape::{BuildContext, PointsCount, ToolShape};

/// How a two-point line reaches past its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    /// Only the options' extend flags apply
    Options,
    /// Always continues past the second point
    Forward,
    /// Always continues both ways
    Both,
}

fn build_two_point_line(ctx: &BuildContext, reach: Reach, out: &mut CompositeRenderer) {
    let (Some(a), Some(b)) = (ctx.anchor(0), ctx.anchor(1)) else {
        return;
    };
    let line: LineView = section(ctx.options, "line");

    let dir = b.position - a.position;
    let forward_is_right = dir.x > 0.0 || (dir.x == 0.0 && dir.y > 0.0);
    let (left, right) = match reach {
        Reach::Options => (line.extend.left, line.extend.right),
        Reach::Forward => (!forward_is_right, forward_is_right),
        Reach::Both => (true, true),
    };

    let mut data = SegmentData::new(a.position, b.position, line.stroke(), ctx.pane)
        .extended(left, right);
    data.start_end = line.end.left;
    data.end_end = line.end.right;
    data.hit_tolerance = ctx.hit_tolerance;
    out.append(SegmentRenderer::new(data));

    append_text(ctx, (a.position + b.position) / 2.0, out);
}

pub struct TrendLine;

impl ToolShape for TrendLine {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        json!({
            "line": line_defaults("#2962ff"),
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_two_point_line(ctx, Reach::Options, out);
    }
}

pub struct Ray;

impl ToolShape for Ray {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        json!({
            "line": line_defaults("#2962ff"),
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_two_point_line(ctx, Reach::Forward, out);
    }
}

pub struct ExtendedLine;

impl ToolShape for ExtendedLine {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        json!({
            "line": line_defaults("#2962ff"),
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_two_point_line(ctx, Reach::Both, out);
    }
}

/// Axis of a single-point line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    HorizontalRay,
    Vertical,
}

fn build_axis_line(ctx: &BuildContext, axis: Axis, out: &mut CompositeRenderer) {
    let Some(anchor) = ctx.anchor(0) else {
        return;
    };
    let line: LineView = section(ctx.options, "line");
    let Vec2 { x, y } = anchor.position;

    let (start, end) = match axis {
        Axis::Horizontal => (Vec2::new(ctx.pane.min.x, y), Vec2::new(ctx.pane.max.x, y)),
        Axis::HorizontalRay => (anchor.position, Vec2::new(ctx.pane.max.x.max(x), y)),
        Axis::Vertical => (Vec2::new(x, ctx.pane.min.y), Vec2::new(x, ctx.pane.max.y)),
    };

    let mut data = SegmentData::new(start, end, line.stroke(), ctx.pane);
    data.hit_tolerance = ctx.hit_tolerance;
    out.append(SegmentRenderer::new(data));

    append_text(ctx, anchor.position, out);
}

fn axis_anchor(ctx: &BuildContext, axis: Axis) -> Vec<AnchorPoint> {
    let cursor = match axis {
        Axis::Horizontal | Axis::HorizontalRay => CursorHint::ResizeNs,
        Axis::Vertical => CursorHint::ResizeEw,
    };
    ctx.anchors
        .iter()
        .take(1)
        .map(|a| a.with_cursor(cursor))
        .collect()
}

pub struct HorizontalLine;

impl ToolShape for HorizontalLine {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(1)
    }

    fn default_options(&self) -> Value {
        json!({
            "line": line_defaults("#2962ff"),
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_axis_line(ctx, Axis::Horizontal, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        axis_anchor(ctx, Axis::Horizontal)
    }
}

pub struct HorizontalRay;

impl ToolShape for HorizontalRay {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(1)
    }

    fn default_options(&self) -> Value {
        json!({
            "line": line_defaults("#2962ff"),
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_axis_line(ctx, Axis::HorizontalRay, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        axis_anchor(ctx, Axis::HorizontalRay)
    }
}

pub struct VerticalLine;

impl ToolShape for VerticalLine {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(1)
    }

    fn default_options(&self) -> Value {
        json!({
            "line": line_defaults("#2962ff"),
            "text": text_defaults(""),
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        build_axis_line(ctx, Axis::Vertical, out);
    }

    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        axis_anchor(ctx, Axis::Vertical)
    }
}
