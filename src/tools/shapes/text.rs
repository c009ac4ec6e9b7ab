//! Free text labels and callouts.

use serde_json::{Value, json};

use super::text_defaults;
use crate::model::AnchorPoint;
use crate::options::views::{LineView, TextView, section};
use crate::render::{CompositeRenderer, SegmentData, SegmentRenderer, TextRenderer};
use crate::tools::shape::{BuildContext, PointsCount, ToolShape};

pub struct Text;

impl ToolShape for Text {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(1)
    }

    fn default_options(&self) -> Value {
        let mut text = text_defaults("Text");
        text["box"]["alignment"] = json!({ "vertical": "top", "horizontal": "left" });
        json!({ "text": text })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        let Some(anchor) = ctx.anchor(0) else {
            return;
        };
        let text: TextView = section(ctx.options, "text");
        out.append(TextRenderer::new(text.text_data(anchor.position)));
    }

    /// Text is moved by its box, not by a handle
    fn anchors(&self, ctx: &BuildContext) -> Vec<AnchorPoint> {
        if ctx.finished {
            Vec::new()
        } else {
            ctx.anchors.to_vec()
        }
    }
}

/// A boxed note with a pointer line to the point it comments on.
pub struct Callout;

impl ToolShape for Callout {
    fn points_count(&self) -> PointsCount {
        PointsCount::Fixed(2)
    }

    fn default_options(&self) -> Value {
        let mut text = text_defaults("Callout");
        text["font"]["color"] = json!("#ffffff");
        text["box"]["alignment"] = json!({ "vertical": "middle", "horizontal": "center" });
        text["box"]["background"]["color"] = json!("#2962ff");
        text["box"]["border"] = json!({ "color": "#2962ff", "width": 1, "style": 0, "radius": 6 });
        text["box"]["padding"] = json!(6);
        text["wordWrapWidth"] = json!(160);
        json!({
            "line": { "color": "#2962ff", "width": 1, "style": 0 },
            "text": text,
        })
    }

    fn build_renderers(&self, ctx: &BuildContext, out: &mut CompositeRenderer) {
        let (Some(target), Some(label)) = (ctx.anchor(0), ctx.anchor(1)) else {
            return;
        };
        let line: LineView = section(ctx.options, "line");
        let mut pointer = SegmentData::new(target.position, label.position, line.stroke(), ctx.pane);
        pointer.hit_tolerance = ctx.hit_tolerance;
        out.append(SegmentRenderer::new(pointer));

        let text: TextView = section(ctx.options, "text");
        out.append(TextRenderer::new(text.text_data(label.position)));
    }
}
