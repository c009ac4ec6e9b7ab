//! Centralized constants used across the engine.
//!
//! This module contains magic numbers and tuning values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels for the demo host
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels for the demo host
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Pixel distance within which a pointer counts as touching a stroked line
pub const HIT_TOLERANCE: f32 = 4.0;

/// Radius of the circular anchor handles drawn on tool points
pub const ANCHOR_RADIUS: f32 = 5.0;

/// Extra pixels around an anchor that still grab it
pub const ANCHOR_HIT_PADDING: f32 = 3.0;

/// Minimum pixel spacing between points recorded during a click-drag gesture
pub const MIN_DRAG_POINT_DISTANCE: f32 = 2.0;

/// Luminance (0-255) above which text on a background is drawn black
pub const CONTRAST_LUMINANCE_THRESHOLD: f32 = 160.0;

/// Line height relative to font size for wrapped text
pub const TEXT_LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Average glyph width relative to font size when no text metrics are available
pub const FALLBACK_GLYPH_WIDTH_FACTOR: f32 = 0.6;

/// Height of a price-axis label box in pixels
pub const PRICE_LABEL_HEIGHT: f32 = 18.0;

/// Maximum press-to-release travel (pixels) that still counts as a click
pub const CLICK_MAX_TRAVEL: f32 = 4.0;

/// Maximum delay between two clicks for a double-click, in seconds
pub const DOUBLE_CLICK_SECONDS: f64 = 0.35;

/// Decimals shown for prices when a tool sets no `precision`
pub const DEFAULT_PRICE_PRECISION: usize = 2;

/// Largest accepted `precision` option
pub const MAX_PRICE_PRECISION: usize = 12;
