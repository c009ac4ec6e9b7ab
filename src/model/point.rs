//! Logical (time/price) and screen (pixel) point types.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize, Serializer};

use crate::common::CursorHint;

/// Largest integer an IEEE double represents exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A tool anchor in chart space. This is the persisted form of every point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalPoint {
    /// Unix timestamp in seconds
    #[serde(serialize_with = "serialize_number")]
    pub timestamp: f64,
    #[serde(serialize_with = "serialize_number")]
    pub price: f64,
}

impl LogicalPoint {
    pub fn new(timestamp: f64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Shift by a logical delta (seconds, price units).
    pub fn offset(&self, d_time: f64, d_price: f64) -> Self {
        Self {
            timestamp: self.timestamp + d_time,
            price: self.price + d_price,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.price.is_finite()
    }
}

/// Integral values are written without a fractional part so exports read the
/// same as the numbers a JavaScript host would produce.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// A tool point projected into pixel space for the current frame.
///
/// Recomputed from [`LogicalPoint`] whenever the pane view rebuilds; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub position: Vec2,
    /// Index of the logical point this anchor edits
    pub point_index: usize,
    /// Cursor shown while hovering the handle
    pub cursor: CursorHint,
    /// Square handles mark points that only move along one axis
    pub square: bool,
}

impl AnchorPoint {
    pub fn new(position: Vec2, point_index: usize) -> Self {
        Self {
            position,
            point_index,
            cursor: CursorHint::Pointer,
            square: false,
        }
    }

    pub fn with_cursor(mut self, cursor: CursorHint) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_serialize_without_fraction() {
        let point = LogicalPoint::new(1_700_000_000.0, 100.0);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"timestamp":1700000000,"price":100}"#);
    }

    #[test]
    fn test_fractional_price_is_kept() {
        let point = LogicalPoint::new(10.0, 101.25);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"timestamp":10,"price":101.25}"#);
    }

    #[test]
    fn test_deserialize_from_integers_and_floats() {
        let point: LogicalPoint =
            serde_json::from_str(r#"{"timestamp":1700000000,"price":99.5}"#).unwrap();
        assert_eq!(point, LogicalPoint::new(1_700_000_000.0, 99.5));
    }

    #[test]
    fn test_offset() {
        let point = LogicalPoint::new(100.0, 10.0).offset(60.0, -2.5);
        assert_eq!(point, LogicalPoint::new(160.0, 7.5));
    }
}
