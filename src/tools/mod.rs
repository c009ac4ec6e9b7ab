//! Drawing tools: the shape contract, the built-in shapes and the tool model.

mod labels;
mod line_tool;
mod pane_view;
mod registry;
mod set;
mod shape;
pub mod shapes;

pub use labels::{PriceLabel, price_axis_labels, stack_labels};
pub use line_tool::{LineTool, default_options_for};
pub use pane_view::{PaneView, ViewInput, ViewSettings};
pub use registry::ToolRegistry;
pub use set::ToolSet;
pub use shape::{BuildContext, CreationMode, PointsCount, ToolShape};
pub use shapes::BuiltinToolType;
