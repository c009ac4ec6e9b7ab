//! Built-in drawing tools.

mod circle;
mod fib;
mod lines;
mod path;
mod rectangle;
mod text;

pub use circle::Circle;
pub use fib::FibRetracement;
pub use lines::{ExtendedLine, HorizontalLine, HorizontalRay, Ray, TrendLine, VerticalLine};
pub use path::{Brush, Highlighter, Path};
pub use rectangle::{PriceRange, Rectangle};
pub use text::{Callout, Text};

use bevy::math::Vec2;
use serde_json::{Value, json};

use super::shape::{BuildContext, ToolShape};
use crate::options::views::{TextView, section};
use crate::render::{CompositeRenderer, TextRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinToolType {
    TrendLine,
    Ray,
    ExtendedLine,
    HorizontalLine,
    HorizontalRay,
    VerticalLine,
    Rectangle,
    Circle,
    FibRetracement,
    PriceRange,
    Path,
    Brush,
    Highlighter,
    Text,
    Callout,
}

impl BuiltinToolType {
    /// Type tag used in exports and by the registry
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinToolType::TrendLine => "TrendLine",
            BuiltinToolType::Ray => "Ray",
            BuiltinToolType::ExtendedLine => "ExtendedLine",
            BuiltinToolType::HorizontalLine => "HorizontalLine",
            BuiltinToolType::HorizontalRay => "HorizontalRay",
            BuiltinToolType::VerticalLine => "VerticalLine",
            BuiltinToolType::Rectangle => "Rectangle",
            BuiltinToolType::Circle => "Circle",
            BuiltinToolType::FibRetracement => "FibRetracement",
            BuiltinToolType::PriceRange => "PriceRange",
            BuiltinToolType::Path => "Path",
            BuiltinToolType::Brush => "Brush",
            BuiltinToolType::Highlighter => "Highlighter",
            BuiltinToolType::Text => "Text",
            BuiltinToolType::Callout => "Callout",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuiltinToolType::TrendLine => "Trend Line",
            BuiltinToolType::Ray => "Ray",
            BuiltinToolType::ExtendedLine => "Extended Line",
            BuiltinToolType::HorizontalLine => "Horizontal Line",
            BuiltinToolType::HorizontalRay => "Horizontal Ray",
            BuiltinToolType::VerticalLine => "Vertical Line",
            BuiltinToolType::Rectangle => "Rectangle",
            BuiltinToolType::Circle => "Circle",
            BuiltinToolType::FibRetracement => "Fib Retracement",
            BuiltinToolType::PriceRange => "Price Range",
            BuiltinToolType::Path => "Path",
            BuiltinToolType::Brush => "Brush",
            BuiltinToolType::Highlighter => "Highlighter",
            BuiltinToolType::Text => "Text",
            BuiltinToolType::Callout => "Callout",
        }
    }

    pub fn all() -> &'static [BuiltinToolType] {
        &[
            BuiltinToolType::TrendLine,
            BuiltinToolType::Ray,
            BuiltinToolType::ExtendedLine,
            BuiltinToolType::HorizontalLine,
            BuiltinToolType::HorizontalRay,
            BuiltinToolType::VerticalLine,
            BuiltinToolType::Rectangle,
            BuiltinToolType::Circle,
            BuiltinToolType::FibRetracement,
            BuiltinToolType::PriceRange,
            BuiltinToolType::Path,
            BuiltinToolType::Brush,
            BuiltinToolType::Highlighter,
            BuiltinToolType::Text,
            BuiltinToolType::Callout,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    pub fn create(&self) -> Box<dyn ToolShape> {
        match self {
            BuiltinToolType::TrendLine => Box::new(TrendLine),
            BuiltinToolType::Ray => Box::new(Ray),
            BuiltinToolType::ExtendedLine => Box::new(ExtendedLine),
            BuiltinToolType::HorizontalLine => Box::new(HorizontalLine),
            BuiltinToolType::HorizontalRay => Box::new(HorizontalRay),
            BuiltinToolType::VerticalLine => Box::new(VerticalLine),
            BuiltinToolType::Rectangle => Box::new(Rectangle),
            BuiltinToolType::Circle => Box::new(Circle),
            BuiltinToolType::FibRetracement => Box::new(FibRetracement),
            BuiltinToolType::PriceRange => Box::new(PriceRange),
            BuiltinToolType::Path => Box::new(Path),
            BuiltinToolType::Brush => Box::new(Brush),
            BuiltinToolType::Highlighter => Box::new(Highlighter),
            BuiltinToolType::Text => Box::new(Text),
            BuiltinToolType::Callout => Box::new(Callout),
        }
    }
}

pub(crate) fn line_defaults(color: &str) -> Value {
    json!({
        "color": color,
        "width": 1,
        "style": 0,
        "extend": { "left": false, "right": false },
        "end": { "left": 0, "right": 0 },
    })
}

pub(crate) fn text_defaults(value: &str) -> Value {
    json!({
        "value": value,
        "font": {
            "color": "#2962ff",
            "size": 14,
            "bold": false,
            "italic": false,
            "family": "sans-serif",
        },
        "box": {
            "alignment": { "vertical": "bottom", "horizontal": "center" },
            "angle": 0,
            "background": { "color": "" },
            "border": { "color": "", "width": 0, "style": 0, "radius": 0 },
            "padding": 0,
        },
        "wordWrapWidth": 0,
    })
}

/// Append the tool's text label at `anchor` when it has one.
pub(crate) fn append_text(ctx: &BuildContext, anchor: Vec2, out: &mut CompositeRenderer) {
    let text: TextView = section(ctx.options, "text");
    if text.value.trim().is_empty() {
        return;
    }
    out.append(TextRenderer::new(text.text_data(anchor)));
}
