//! Point and coordinate model shared by every tool.

mod coords;
mod point;

pub use coords::{ChartHost, CoordinateAdapter, LinearScales};
pub use point::{AnchorPoint, LogicalPoint};
