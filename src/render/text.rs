//! Wrapped, aligned and optionally boxed text labels.

use bevy::color::Color;
use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::hit::{HitTestResult, HitTestType};
use super::surface::{FontSpec, RenderSurface, StrokeStyle, TextRun};
use super::{PaneRenderer, stroke_styled};
use crate::constants::TEXT_LINE_HEIGHT_FACTOR;
use crate::geometry::canvas::{measure_text_width, rounded_rect_outline, wrap_text};
use crate::geometry::{point_in_rect, rotate_point};
use crate::options::contrast_color;

/// Placement of the text box relative to its anchor on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    #[serde(alias = "left", alias = "top")]
    Start,
    #[serde(alias = "middle")]
    Center,
    #[serde(alias = "right", alias = "bottom")]
    End,
}

impl TextAlign {
    /// Offset of a span of `size` from the anchor for this alignment
    fn offset(&self, size: f32) -> f32 {
        match self {
            TextAlign::Start => 0.0,
            TextAlign::Center => -size / 2.0,
            TextAlign::End => -size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    pub text: String,
    pub anchor: Vec2,
    pub font: FontSpec,
    /// `None` picks black or white against the background
    pub color: Option<Color>,
    pub wrap_width: Option<f32>,
    pub horizontal: TextAlign,
    pub vertical: TextAlign,
    pub background: Option<Color>,
    pub border: Option<StrokeStyle>,
    pub padding: f32,
    pub corner_radius: f32,
    /// Rotation around the anchor in radians
    pub angle: f32,
}

impl TextData {
    pub fn new(text: impl Into<String>, anchor: Vec2, font: FontSpec) -> Self {
        Self {
            text: text.into(),
            anchor,
            font,
            color: None,
            wrap_width: None,
            horizontal: TextAlign::Start,
            vertical: TextAlign::Start,
            background: None,
            border: None,
            padding: 0.0,
            corner_radius: 0.0,
            angle: 0.0,
        }
    }
}

/// Result of laying out a [`TextData`] before rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    /// Each line with the top-left corner of its line box
    pub lines: Vec<(String, Vec2)>,
}

impl TextBox {
    pub fn layout(data: &TextData) -> Option<Self> {
        let lines = wrap_text(&data.text, data.font.size, data.wrap_width);
        if lines.iter().all(|line| line.trim().is_empty()) {
            return None;
        }

        let line_height = data.font.size * TEXT_LINE_HEIGHT_FACTOR;
        let widths: Vec<f32> = lines
            .iter()
            .map(|line| measure_text_width(line, data.font.size))
            .collect();
        let content_width = widths.iter().cloned().fold(0.0, f32::max);
        let size = Vec2::new(
            content_width + data.padding * 2.0,
            lines.len() as f32 * line_height + data.padding * 2.0,
        );
        let min = data.anchor
            + Vec2::new(
                data.horizontal.offset(size.x),
                data.vertical.offset(size.y),
            );
        let rect = Rect::from_corners(min, min + size);

        let lines = lines
            .into_iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (line, width))| {
                let x = match data.horizontal {
                    TextAlign::Start => rect.min.x + data.padding,
                    TextAlign::Center => rect.min.x + (size.x - width) / 2.0,
                    TextAlign::End => rect.max.x - data.padding - width,
                };
                let y = rect.min.y + data.padding + i as f32 * line_height;
                (line, Vec2::new(x, y))
            })
            .collect();

        Some(Self { rect, lines })
    }
}

#[derive(Debug, Default)]
pub struct TextRenderer {
    data: Option<TextData>,
    layout: Option<TextBox>,
}

impl TextRenderer {
    pub fn new(data: TextData) -> Self {
        let mut renderer = Self::default();
        renderer.set_data(data);
        renderer
    }

    pub fn set_data(&mut self, data: TextData) {
        self.layout = TextBox::layout(&data);
        self.data = Some(data);
    }

    pub fn text_box(&self) -> Option<&TextBox> {
        self.layout.as_ref()
    }
}

impl PaneRenderer for TextRenderer {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        let (Some(data), Some(layout)) = (&self.data, &self.layout) else {
            return;
        };

        if data.background.is_some() || data.border.is_some() {
            let outline: Vec<Vec2> = rounded_rect_outline(layout.rect, data.corner_radius)
                .into_iter()
                .map(|p| rotate_point(p, data.anchor, data.angle))
                .collect();
            if let Some(background) = data.background {
                surface.fill_polygon(&outline, background);
            }
            if let Some(border) = &data.border {
                stroke_styled(surface, &outline, true, border);
            }
        }

        let color = data.color.unwrap_or_else(|| {
            data.background
                .map(contrast_color)
                .unwrap_or(Color::WHITE)
        });
        for (text, position) in &layout.lines {
            if text.is_empty() {
                continue;
            }
            surface.fill_text(&TextRun {
                text: text.clone(),
                position: *position,
                font: data.font.clone(),
                color,
                angle: data.angle,
                pivot: data.anchor,
            });
        }
    }

    fn hit_test(&self, point: Vec2) -> Option<HitTestResult> {
        let (data, layout) = (self.data.as_ref()?, self.layout.as_ref()?);
        let local = rotate_point(point, data.anchor, -data.angle);
        point_in_rect(local, layout.rect).then(|| HitTestResult::new(HitTestType::Text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCommandList;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    fn font() -> FontSpec {
        FontSpec {
            size: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_center_alignment_centers_box_on_anchor() {
        let mut data = TextData::new("abcd", Vec2::new(100.0, 100.0), font());
        data.horizontal = TextAlign::Center;
        data.vertical = TextAlign::Center;
        let layout = TextBox::layout(&data).unwrap();
        // 4 glyphs of 6px, one 12px line
        assert!(close(layout.rect.min, Vec2::new(88.0, 94.0)));
        assert!(close(layout.rect.max, Vec2::new(112.0, 106.0)));
    }

    #[test]
    fn test_padding_and_end_alignment() {
        let mut data = TextData::new("ab", Vec2::new(100.0, 100.0), font());
        data.horizontal = TextAlign::End;
        data.vertical = TextAlign::End;
        data.padding = 5.0;
        let layout = TextBox::layout(&data).unwrap();
        assert!(close(layout.rect.max, Vec2::new(100.0, 100.0)));
        assert!(close(layout.lines[0].1, Vec2::new(83.0, 83.0)));
    }

    #[test]
    fn test_empty_text_has_no_box() {
        let renderer = TextRenderer::new(TextData::new("  ", Vec2::ZERO, font()));
        assert!(renderer.text_box().is_none());
        assert!(renderer.hit_test(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_rotated_hit_box() {
        let mut data = TextData::new("abcdefghij", Vec2::ZERO, font());
        data.angle = std::f32::consts::FRAC_PI_2;
        let renderer = TextRenderer::new(data);
        // Unrotated box spans x 0..60; after a quarter turn it spans y 0..60
        assert!(renderer.hit_test(Vec2::new(-5.0, 50.0)).is_some());
        assert!(renderer.hit_test(Vec2::new(50.0, 5.0)).is_none());
    }

    #[test]
    fn test_contrast_text_on_light_background() {
        let mut data = TextData::new("hi", Vec2::ZERO, font());
        data.background = Some(Color::WHITE);
        let mut list = DrawCommandList::new();
        TextRenderer::new(data).draw(&mut list);
        let run = list.texts().next().unwrap();
        assert_eq!(run.color, Color::BLACK);
    }

    #[test]
    fn test_alignment_aliases() {
        let align: TextAlign = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(align, TextAlign::End);
        let align: TextAlign = serde_json::from_str("\"middle\"").unwrap();
        assert_eq!(align, TextAlign::Center);
    }
}
