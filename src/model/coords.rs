//! Conversion between logical chart points and pane pixels.
//!
//! The host chart owns the actual time and price scales; the engine only sees
//! them through [`ChartHost`]. Every conversion may fail (`None`) while the
//! host has not laid out yet or when a time lies outside the plotted data.

use bevy::math::Vec2;

use super::point::{AnchorPoint, LogicalPoint};

/// Time and price transforms supplied by the chart that hosts the tools.
pub trait ChartHost {
    fn time_to_coordinate(&self, timestamp: f64) -> Option<f32>;
    fn coordinate_to_time(&self, x: f32) -> Option<f64>;
    fn price_to_coordinate(&self, price: f64) -> Option<f32>;
    fn coordinate_to_price(&self, y: f32) -> Option<f64>;

    /// Size of the drawing pane in pixels
    fn pane_size(&self) -> Vec2;

    /// Device pixels per logical pixel
    fn pixel_ratio(&self) -> f32 {
        1.0
    }
}

/// Thin adapter that turns host transforms into point conversions.
#[derive(Clone, Copy)]
pub struct CoordinateAdapter<'a> {
    host: &'a dyn ChartHost,
}

impl<'a> CoordinateAdapter<'a> {
    pub fn new(host: &'a dyn ChartHost) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &'a dyn ChartHost {
        self.host
    }

    pub fn pane_size(&self) -> Vec2 {
        self.host.pane_size()
    }

    pub fn to_screen(&self, point: &LogicalPoint, point_index: usize) -> Option<AnchorPoint> {
        let x = self.host.time_to_coordinate(point.timestamp)?;
        let y = self.host.price_to_coordinate(point.price)?;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(AnchorPoint::new(Vec2::new(x, y), point_index))
    }

    pub fn to_logical(&self, position: Vec2) -> Option<LogicalPoint> {
        let timestamp = self.host.coordinate_to_time(position.x)?;
        let price = self.host.coordinate_to_price(position.y)?;
        let point = LogicalPoint::new(timestamp, price);
        point.is_finite().then_some(point)
    }

    /// Project every point; `None` as soon as one of them cannot be resolved.
    pub fn to_screen_all(&self, points: &[LogicalPoint]) -> Option<Vec<AnchorPoint>> {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| self.to_screen(point, index))
            .collect()
    }
}

/// Affine time and price scales over a fixed visible range.
///
/// Time grows to the right; price grows upwards (pixel y grows downwards).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScales {
    /// Visible time range (left edge, right edge) in seconds
    pub time_range: (f64, f64),
    /// Visible price range (bottom edge, top edge)
    pub price_range: (f64, f64),
    pub size: Vec2,
    /// Timestamps outside this range do not resolve to a pixel
    pub data_range: Option<(f64, f64)>,
}

impl LinearScales {
    pub fn new(time_range: (f64, f64), price_range: (f64, f64), size: Vec2) -> Self {
        Self {
            time_range,
            price_range,
            size,
            data_range: None,
        }
    }

    /// Scales that have not been laid out yet; every conversion fails.
    pub fn unresolved() -> Self {
        Self::new((0.0, 0.0), (0.0, 0.0), Vec2::ZERO)
    }

    fn is_resolved(&self) -> bool {
        self.size.x > 0.0
            && self.size.y > 0.0
            && self.time_range.1 != self.time_range.0
            && self.price_range.1 != self.price_range.0
    }

    /// Scroll the visible ranges by a pixel delta (content follows the pointer).
    pub fn pan_pixels(&mut self, delta: Vec2) {
        if !self.is_resolved() {
            return;
        }
        let seconds_per_px = (self.time_range.1 - self.time_range.0) / self.size.x as f64;
        let price_per_px = (self.price_range.1 - self.price_range.0) / self.size.y as f64;
        let dt = -(delta.x as f64) * seconds_per_px;
        let dp = delta.y as f64 * price_per_px;
        self.time_range = (self.time_range.0 + dt, self.time_range.1 + dt);
        self.price_range = (self.price_range.0 + dp, self.price_range.1 + dp);
    }

    /// Zoom the time axis around a pixel column. `factor < 1` zooms in.
    pub fn zoom_time(&mut self, factor: f64, anchor_x: f32) {
        let Some(anchor) = self.coordinate_to_time(anchor_x) else {
            return;
        };
        let (left, right) = self.time_range;
        self.time_range = (
            anchor - (anchor - left) * factor,
            anchor + (right - anchor) * factor,
        );
    }
}

impl ChartHost for LinearScales {
    fn time_to_coordinate(&self, timestamp: f64) -> Option<f32> {
        if !self.is_resolved() {
            return None;
        }
        if let Some((first, last)) = self.data_range
            && (timestamp < first || timestamp > last)
        {
            return None;
        }
        let (left, right) = self.time_range;
        Some(((timestamp - left) / (right - left) * self.size.x as f64) as f32)
    }

    fn coordinate_to_time(&self, x: f32) -> Option<f64> {
        if !self.is_resolved() {
            return None;
        }
        let (left, right) = self.time_range;
        Some(left + x as f64 / self.size.x as f64 * (right - left))
    }

    fn price_to_coordinate(&self, price: f64) -> Option<f32> {
        if !self.is_resolved() {
            return None;
        }
        let (bottom, top) = self.price_range;
        Some(((top - price) / (top - bottom) * self.size.y as f64) as f32)
    }

    fn coordinate_to_price(&self, y: f32) -> Option<f64> {
        if !self.is_resolved() {
            return None;
        }
        let (bottom, top) = self.price_range;
        Some(top - y as f64 / self.size.y as f64 * (top - bottom))
    }

    fn pane_size(&self) -> Vec2 {
        self.size
    }
}
