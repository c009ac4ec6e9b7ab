//! Shape math used by the renderers' hit tests.
//!
//! Everything here works in pane pixels (`Vec2`, y down).

pub mod canvas;

use bevy::math::{Rect, Vec2};

/// Distance from a point to the closest point of a segment
pub fn distance_to_segment(point: Vec2, seg_start: Vec2, seg_end: Vec2) -> f32 {
    let line_vec = seg_end - seg_start;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        // Segment is essentially a point
        return point.distance(seg_start);
    }

    // Project point onto line, clamped to segment
    let t = ((point - seg_start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = seg_start + line_vec * t;

    point.distance(projection)
}

/// Check if a point is within a given distance of a line segment
pub fn point_near_segment(point: Vec2, seg_start: Vec2, seg_end: Vec2, threshold: f32) -> bool {
    distance_to_segment(point, seg_start, seg_end) <= threshold
}

/// Check if a point is near any segment of an open polyline
pub fn point_near_polyline(point: Vec2, points: &[Vec2], threshold: f32) -> bool {
    match points {
        [] => false,
        [single] => point.distance(*single) <= threshold,
        _ => points
            .windows(2)
            .any(|w| point_near_segment(point, w[0], w[1], threshold)),
    }
}

/// Check if a point is near the closed outline of a polygon
pub fn point_near_polygon_edge(point: Vec2, polygon: &[Vec2], threshold: f32) -> bool {
    if polygon.len() < 3 {
        return point_near_polyline(point, polygon, threshold);
    }
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .any(|(a, b)| point_near_segment(point, *a, *b, threshold))
}

/// Even-odd ray casting point-in-polygon test
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned rectangle spanned by two arbitrary corners
pub fn rect_from_corners(a: Vec2, b: Vec2) -> Rect {
    Rect::from_corners(a, b)
}

/// Inclusive point-in-rect test
pub fn point_in_rect(point: Vec2, rect: Rect) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

/// Check if a point is near one of the four edges of a rectangle
pub fn point_near_rect_edge(point: Vec2, rect: Rect, threshold: f32) -> bool {
    point_near_polygon_edge(point, &rect_corners(rect), threshold)
}

/// Corners of a rectangle, clockwise from the top-left (pixel space)
pub fn rect_corners(rect: Rect) -> [Vec2; 4] {
    [
        rect.min,
        Vec2::new(rect.max.x, rect.min.y),
        rect.max,
        Vec2::new(rect.min.x, rect.max.y),
    ]
}

/// Distance from a point to a circle's outline (0 on the circumference)
pub fn distance_to_circle_edge(point: Vec2, center: Vec2, radius: f32) -> f32 {
    (point.distance(center) - radius).abs()
}

/// Rotate a point around a center by the given angle (in radians)
pub fn rotate_point(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let translated = point - center;
    Vec2::new(
        translated.x * cos_a - translated.y * sin_a,
        translated.x * sin_a + translated.y * cos_a,
    ) + center
}

/// Bounding box of a point set
pub fn bounds_of(points: &[Vec2]) -> Option<Rect> {
    let first = *points.first()?;
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
    Some(Rect { min, max })
}

/// Extend a segment beyond its endpoints and clip it to `bounds`.
///
/// `extend_left` pushes the end nearest the left of the pane outwards (the
/// `start` side when the segment runs left to right), `extend_right` the
/// other. Returns `None` when the resulting line misses `bounds` entirely.
pub fn extend_and_clip_segment(
    start: Vec2,
    end: Vec2,
    extend_left: bool,
    extend_right: bool,
    bounds: Rect,
) -> Option<(Vec2, Vec2)> {
    let dir = end - start;
    if dir.length_squared() < 0.0001 {
        return point_in_rect(start, bounds).then_some((start, end));
    }

    // Parameter range along start + t * dir; the start side is "left" when
    // the segment points rightwards (or straight down for vertical lines).
    let start_is_left = dir.x > 0.0 || (dir.x == 0.0 && dir.y > 0.0);
    let (extend_start, extend_end) = if start_is_left {
        (extend_left, extend_right)
    } else {
        (extend_right, extend_left)
    };
    let mut t0 = if extend_start { f32::NEG_INFINITY } else { 0.0 };
    let mut t1 = if extend_end { f32::INFINITY } else { 1.0 };

    // Liang-Barsky clipping against the bounds
    let checks = [
        (-dir.x, start.x - bounds.min.x),
        (dir.x, bounds.max.x - start.x),
        (-dir.y, start.y - bounds.min.y),
        (dir.y, bounds.max.y - start.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    if t0 > t1 || !t0.is_finite() || !t1.is_finite() {
        return None;
    }
    Some((start + dir * t0, start + dir * t1))
}
