//! Interactive drawing tools for time/price charts.
//!
//! Tools are stored in chart coordinates (timestamp, price) and projected to
//! pane pixels every frame through the host's [`model::ChartHost`]. Hosts drive
//! everything through [`api::LineToolsApi`]; the [`host`] module wires the
//! facade into a Bevy app.

pub mod api;
pub mod common;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod host;
pub mod interaction;
pub mod model;
pub mod options;
pub mod paths;
pub mod render;
pub mod serialization;
pub mod tools;

pub use api::LineToolsApi;
pub use host::LineToolsPlugin;
pub use model::{ChartHost, LogicalPoint};
pub use serialization::LineToolExport;
