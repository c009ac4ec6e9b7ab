//! Typed read-only views over sections of a tool's merged options.
//!
//! Options stay a `serde_json::Value` so unknown keys survive a round trip;
//! shapes read the parts they understand through these structs.

use bevy::color::{Alpha, Color};
use bevy::log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::color::{color_or, parse_color};
use crate::render::{FontSpec, LineEnd, LineStyle, StrokeStyle, TextAlign, TextData};

const DEFAULT_LINE_COLOR: &str = "#2962ff";

/// Deserialize `options[key]`, falling back to the view's defaults when the
/// section is missing or malformed.
pub fn section<T: DeserializeOwned + Default>(options: &Value, key: &str) -> T {
    match options.get(key) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            debug!("Ignoring malformed '{}' options: {}", key, e);
            T::default()
        }),
        None => T::default(),
    }
}

/// A colour option that may be empty or fully transparent.
pub fn optional_color(input: &str) -> Option<Color> {
    parse_color(input).filter(|c| c.alpha() > 0.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendView {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineEndsView {
    pub left: LineEnd,
    pub right: LineEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineView {
    pub color: String,
    pub width: f32,
    pub style: LineStyle,
    pub extend: ExtendView,
    pub end: LineEndsView,
}

impl Default for LineView {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR.to_string(),
            width: 1.0,
            style: LineStyle::Solid,
            extend: ExtendView::default(),
            end: LineEndsView::default(),
        }
    }
}

impl LineView {
    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: color_or(&self.color, Color::WHITE),
            width: self.width.max(0.0),
            style: self.style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderView {
    pub color: String,
    pub width: f32,
    pub style: LineStyle,
    pub radius: f32,
}

impl Default for BorderView {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR.to_string(),
            width: 1.0,
            style: LineStyle::Solid,
            radius: 0.0,
        }
    }
}

impl BorderView {
    /// `None` when the border is invisible
    pub fn stroke(&self) -> Option<StrokeStyle> {
        let color = optional_color(&self.color)?;
        (self.width > 0.0).then_some(StrokeStyle {
            color,
            width: self.width,
            style: self.style,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundView {
    pub color: String,
}

impl BackgroundView {
    pub fn fill(&self) -> Option<Color> {
        optional_color(&self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontView {
    pub color: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub family: String,
}

impl Default for FontView {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR.to_string(),
            size: 14.0,
            bold: false,
            italic: false,
            family: "sans-serif".to_string(),
        }
    }
}

impl FontView {
    pub fn spec(&self) -> FontSpec {
        FontSpec {
            family: self.family.clone(),
            size: self.size.max(1.0),
            bold: self.bold,
            italic: self.italic,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentView {
    pub vertical: TextAlign,
    pub horizontal: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBoxView {
    pub alignment: AlignmentView,
    /// Degrees, clockwise on screen
    pub angle: f32,
    pub background: BackgroundView,
    pub border: BorderView,
    pub padding: f32,
}

impl Default for TextBoxView {
    fn default() -> Self {
        Self {
            alignment: AlignmentView::default(),
            angle: 0.0,
            background: BackgroundView::default(),
            border: BorderView {
                color: String::new(),
                width: 0.0,
                ..Default::default()
            },
            padding: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextView {
    pub value: String,
    pub font: FontView,
    #[serde(rename = "box")]
    pub text_box: TextBoxView,
    /// 0 disables wrapping
    pub word_wrap_width: f32,
}

impl TextView {
    /// Layout input for a text renderer anchored at `anchor`.
    pub fn text_data(&self, anchor: bevy::math::Vec2) -> TextData {
        let mut data = TextData::new(self.value.clone(), anchor, self.font.spec());
        data.color = optional_color(&self.font.color);
        data.wrap_width = (self.word_wrap_width > 0.0).then_some(self.word_wrap_width);
        data.horizontal = self.text_box.alignment.horizontal;
        data.vertical = self.text_box.alignment.vertical;
        data.background = self.text_box.background.fill();
        data.border = self.text_box.border.stroke();
        data.padding = self.text_box.padding.max(0.0);
        data.corner_radius = self.text_box.border.radius.max(0.0);
        data.angle = self.text_box.angle.to_radians();
        data
    }
}

/// Top-level visibility flags every tool carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseView {
    pub visible: bool,
    pub editable: bool,
}

impl Default for BaseView {
    fn default() -> Self {
        Self {
            visible: true,
            editable: true,
        }
    }
}

impl BaseView {
    pub fn read(options: &Value) -> Self {
        serde_json::from_value(options.clone()).unwrap_or_default()
    }
}
