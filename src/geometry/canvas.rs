//! Low-level drawing helpers: dash splitting, rounded outlines, arrow heads.
//!
//! These turn styled shapes into plain polylines so that surfaces without
//! native dash or arc support can still execute every draw instruction.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::math::{Rect, Vec2};

use super::extend_and_clip_segment;
use crate::constants::FALLBACK_GLYPH_WIDTH_FACTOR;

/// Segments per quarter circle when approximating arcs
const ARC_SEGMENTS: usize = 6;

/// Upper bound on the dashes produced for one polyline
const MAX_DASHES: usize = 1 << 16;

/// Position inside a repeating on/off dash pattern.
struct DashCursor<'a> {
    pattern: &'a [f64],
    index: usize,
    remaining: f64,
    on: bool,
}

impl<'a> DashCursor<'a> {
    fn new(pattern: &'a [f64]) -> Self {
        Self {
            pattern,
            index: 0,
            remaining: pattern[0],
            on: true,
        }
    }

    fn consume(&mut self, step: f64) {
        self.remaining -= step;
        if self.remaining <= 1e-6 {
            self.index = (self.index + 1) % self.pattern.len();
            self.remaining = self.pattern[self.index];
            self.on = !self.on;
        }
    }

    /// Move the phase forward without emitting anything.
    fn skip(&mut self, distance: f64) {
        let cycle: f64 = self.pattern.iter().sum();
        let mut left = distance % cycle;
        while left > 1e-9 {
            let step = self.remaining.min(left);
            left -= step;
            self.consume(step);
        }
    }
}

/// Split a polyline into the "on" segments of a dash pattern.
///
/// The pattern alternates on/off lengths in pixels and carries over between
/// polyline segments. An empty pattern yields the solid segments. With a
/// `clip` rectangle only the parts inside it are emitted; the pattern phase
/// still advances over the parts outside.
pub fn dash_segments(points: &[Vec2], pattern: &[f32], clip: Option<Rect>) -> Vec<(Vec2, Vec2)> {
    if points.len() < 2 {
        return Vec::new();
    }
    let clip_leg = |start: Vec2, end: Vec2| match clip {
        Some(rect) => extend_and_clip_segment(start, end, false, false, rect),
        None => Some((start, end)),
    };
    if pattern.is_empty() || pattern.iter().all(|len| *len <= 0.0) {
        return points
            .windows(2)
            .filter_map(|w| clip_leg(w[0], w[1]))
            .collect();
    }

    let pattern: Vec<f64> = pattern.iter().map(|len| f64::from(len.max(0.5))).collect();
    let mut cursor = DashCursor::new(&pattern);
    let mut out = Vec::new();

    for w in points.windows(2) {
        let (start, end) = (w[0].as_dvec2(), w[1].as_dvec2());
        let length = start.distance(end);
        if length <= f64::from(f32::EPSILON) {
            continue;
        }
        let dir = (end - start) / length;

        let (from, to) = match clip_leg(w[0], w[1]) {
            Some((a, b)) => (
                start.distance(a.as_dvec2()).min(length),
                start.distance(b.as_dvec2()).min(length),
            ),
            None => (length, length),
        };
        cursor.skip(from);

        let mut travelled = from;
        while travelled < to && out.len() < MAX_DASHES {
            let step = cursor.remaining.min(to - travelled);
            let next = travelled + step;
            if next <= travelled {
                break;
            }
            if cursor.on {
                out.push(((start + dir * travelled).as_vec2(), (start + dir * next).as_vec2()));
            }
            travelled = next;
            cursor.consume(step);
        }
        cursor.skip(length - travelled);
    }
    out
}

/// Outline of a rectangle with rounded corners, clockwise in pixel space.
pub fn rounded_rect_outline(rect: Rect, radius: f32) -> Vec<Vec2> {
    let radius = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
    if radius <= 0.5 {
        return vec![
            rect.min,
            Vec2::new(rect.max.x, rect.min.y),
            rect.max,
            Vec2::new(rect.min.x, rect.max.y),
        ];
    }

    // Corner centers with the angle where each arc starts (y grows downwards)
    let corners = [
        (Vec2::new(rect.min.x + radius, rect.min.y + radius), PI),
        (Vec2::new(rect.max.x - radius, rect.min.y + radius), PI + FRAC_PI_2),
        (Vec2::new(rect.max.x - radius, rect.max.y - radius), 0.0),
        (Vec2::new(rect.min.x + radius, rect.max.y - radius), FRAC_PI_2),
    ];

    let mut outline = Vec::with_capacity(corners.len() * (ARC_SEGMENTS + 1));
    for (center, start_angle) in corners {
        for step in 0..=ARC_SEGMENTS {
            let angle = start_angle + FRAC_PI_2 * step as f32 / ARC_SEGMENTS as f32;
            outline.push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        }
    }
    outline
}

/// Polygon approximating a full circle
pub fn circle_outline(center: Vec2, radius: f32) -> Vec<Vec2> {
    let segments = ARC_SEGMENTS * 4;
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// The two barbs of an arrow head pointing at `tip`, coming from `from`.
pub fn arrow_head(from: Vec2, tip: Vec2, line_width: f32) -> Option<[Vec2; 3]> {
    let dir = (tip - from).try_normalize()?;
    let size = (line_width * 4.0).max(8.0);
    let normal = Vec2::new(-dir.y, dir.x);
    let base = tip - dir * size;
    Some([base + normal * size * 0.5, tip, base - normal * size * 0.5])
}

/// Approximate advance width of a string at a font size.
///
/// Layout and hit testing both use this metric so boxes stay consistent on
/// every surface.
pub fn measure_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * FALLBACK_GLYPH_WIDTH_FACTOR
}

/// Break text into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words longer than the width are split
/// between characters. `None` only splits on newlines.
pub fn wrap_text(text: &str, font_size: f32, max_width: Option<f32>) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let Some(max_width) = max_width.filter(|w| *w > 0.0) else {
            lines.push(paragraph.to_string());
            continue;
        };

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure_text_width(&candidate, font_size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // Hard-break words that cannot fit on a line of their own
            for ch in word.chars() {
                current.push(ch);
                if measure_text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_pattern_returns_all_segments() {
        let points = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        assert_eq!(dash_segments(&points, &[], None).len(), 2);
    }

    #[test]
    fn test_dash_pattern_alternates() {
        let points = [Vec2::ZERO, Vec2::new(20.0, 0.0)];
        let dashes = dash_segments(&points, &[5.0, 5.0], None);
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0], (Vec2::ZERO, Vec2::new(5.0, 0.0)));
        assert_eq!(dashes[1], (Vec2::new(10.0, 0.0), Vec2::new(15.0, 0.0)));
    }

    #[test]
    fn test_dash_pattern_carries_across_corners() {
        let points = [Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.0, 10.0)];
        let dashes = dash_segments(&points, &[5.0, 5.0], None);
        // First dash spans the corner: 3px on the first leg, 2px on the second
        assert_eq!(dashes[0], (Vec2::ZERO, Vec2::new(3.0, 0.0)));
        assert_eq!(dashes[1], (Vec2::new(3.0, 0.0), Vec2::new(3.0, 2.0)));
    }

    #[test]
    fn test_clipped_dashes_keep_phase() {
        let points = [Vec2::new(-12.0, 0.0), Vec2::new(20.0, 0.0)];
        let clip = Rect::new(0.0, -5.0, 10.0, 5.0);
        let dashes = dash_segments(&points, &[5.0, 5.0], Some(clip));
        // -12..-7 on, -7..-2 off, -2..3 on, 3..8 off, 8..13 on
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0], (Vec2::ZERO, Vec2::new(3.0, 0.0)));
        assert_eq!(dashes[1], (Vec2::new(8.0, 0.0), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_far_off_pane_dotted_line_finishes() {
        let points = [Vec2::new(500.0, 250.0), Vec2::new(4.0e7, 250.0)];
        let clip = Rect::new(0.0, 0.0, 999.5, 500.0);
        let dots = dash_segments(&points, &[1.0, 1.0], Some(clip));
        assert_eq!(dots.len(), 250);
        assert!(dots.iter().all(|(a, b)| a.x >= 500.0 && b.x <= 999.51));

        // Without a clip the output is capped instead of growing per pixel
        let unclipped = dash_segments(&points, &[1.0, 1.0], None);
        assert_eq!(unclipped.len(), MAX_DASHES);
    }

    #[test]
    fn test_degenerate_polyline_has_no_dashes() {
        assert!(dash_segments(&[Vec2::ONE], &[2.0, 2.0], None).is_empty());
    }

    #[test]
    fn test_rounded_rect_stays_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let outline = rounded_rect_outline(rect, 8.0);
        assert_eq!(outline.len(), 4 * (ARC_SEGMENTS + 1));
        for p in outline {
            assert!(p.x >= -0.01 && p.x <= 100.01);
            assert!(p.y >= -0.01 && p.y <= 40.01);
        }
    }

    #[test]
    fn test_zero_radius_is_plain_rect() {
        let outline = rounded_rect_outline(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);
        assert_eq!(outline.len(), 4);
    }

    #[test]
    fn test_arrow_head_tip() {
        let head = arrow_head(Vec2::ZERO, Vec2::new(50.0, 0.0), 1.0).unwrap();
        assert_eq!(head[1], Vec2::new(50.0, 0.0));
        assert!(head[0].x < 50.0 && head[2].x < 50.0);
        assert!(arrow_head(Vec2::ONE, Vec2::ONE, 1.0).is_none());
    }

    #[test]
    fn test_wrap_text_on_word_boundaries() {
        // 10px font: 6px per glyph, 60px fits ten glyphs
        let lines = wrap_text("hello big world", 10.0, Some(60.0));
        assert_eq!(lines, vec!["hello big", "world"]);
    }

    #[test]
    fn test_wrap_text_keeps_newlines_without_width() {
        let lines = wrap_text("a\nb c", 10.0, None);
        assert_eq!(lines, vec!["a", "b c"]);
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        let lines = wrap_text("abcdefgh", 10.0, Some(31.0));
        assert_eq!(lines, vec!["abcde", "fgh"]);
    }
}
