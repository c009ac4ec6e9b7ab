//! The public facade hosts drive: tool management, queries, import/export,
//! the crosshair, event subscriptions and the per-frame entry points.
//!
//! Query and export methods return JSON strings of [`LineToolExport`] arrays so
//! hosts can hand them straight to their own persistence or scripting layer.

use bevy::color::Color;
use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::interaction::{
    AfterEditEvent, DoubleClickEvent, InteractionContext, InteractionController, LineToolEvents,
    PointerEvent, PointerResponse, SelectionChangedEvent, SubscriptionHandle,
};
use crate::model::{ChartHost, CoordinateAdapter, LogicalPoint};
use crate::render::{
    CrosshairData, CrosshairRenderer, LineStyle, PaneRenderer, RenderSurface, StrokeStyle,
};
use crate::serialization::{LineToolExport, parse_import, to_json};
use crate::tools::{
    LineTool, PointsCount, PriceLabel, ToolRegistry, ToolSet, ToolShape, ViewSettings,
    price_axis_labels,
};

#[derive(Resource)]
pub struct LineToolsApi {
    registry: ToolRegistry,
    tools: ToolSet,
    controller: InteractionController,
    events: LineToolEvents,
    settings: ViewSettings,
    /// Crosshair position in pane pixels while visible
    crosshair: Option<Vec2>,
    crosshair_stroke: StrokeStyle,
}

impl Default for LineToolsApi {
    fn default() -> Self {
        Self::new(ViewSettings::default())
    }
}

impl LineToolsApi {
    pub fn new(settings: ViewSettings) -> Self {
        Self {
            registry: ToolRegistry::default(),
            tools: ToolSet::new(),
            controller: InteractionController::new(),
            events: LineToolEvents::default(),
            settings,
            crosshair: None,
            crosshair_stroke: StrokeStyle {
                color: Color::srgba(0.6, 0.62, 0.67, 0.8),
                width: 1.0,
                style: LineStyle::LargeDashed,
            },
        }
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ViewSettings) {
        self.settings = settings;
        self.tools.invalidate_all();
    }

    pub fn set_crosshair_color(&mut self, color: Color) {
        self.crosshair_stroke.color = color;
    }

    /// Make a custom shape available under `tool_type`.
    pub fn register_line_tool<F>(&mut self, tool_type: &str, constructor: F)
    where
        F: Fn() -> Box<dyn ToolShape> + Send + Sync + 'static,
    {
        self.registry.register(tool_type, constructor);
    }

    pub fn registered_tool_types(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Id of the tool currently being placed
    pub fn creating(&self) -> Option<&str> {
        self.controller.creating()
    }

    /// Add a tool and return its id, or `""` for an unknown type.
    ///
    /// With no points (or too few for a fixed-count shape) the tool enters
    /// interactive placement and takes the remaining points from the pointer.
    pub fn add_line_tool(
        &mut self,
        tool_type: &str,
        points: Vec<LogicalPoint>,
        options: Option<&Value>,
    ) -> String {
        let Some(shape) = self.registry.create(tool_type) else {
            warn!("Cannot add line tool: unknown type '{}'", tool_type);
            return String::new();
        };
        let id = Uuid::new_v4().to_string();
        let tool = LineTool::new(id.clone(), tool_type, shape, points, options);
        let finished = tool.is_finished();
        self.tools.push(tool);

        if finished {
            debug!("Added {} {}", tool_type, id);
        } else {
            debug!("Placing {} {}", tool_type, id);
            self.controller.begin_creation(&mut self.tools, &self.events, &id);
        }
        id
    }

    /// Create the tool `id` or update it in place. Updating requires the same
    /// type; points must satisfy the shape's point count.
    pub fn create_or_update_line_tool(
        &mut self,
        tool_type: &str,
        points: Vec<LogicalPoint>,
        options: Option<&Value>,
        id: &str,
    ) -> bool {
        if id.is_empty() {
            warn!("Cannot upsert a line tool without an id");
            return false;
        }
        if points.is_empty() {
            warn!("Cannot upsert line tool {} without points", id);
            return false;
        }

        if let Some(tool) = self.tools.get_mut(id) {
            if tool.tool_type() != tool_type {
                warn!(
                    "Line tool {} is a {}, not a {}",
                    id,
                    tool.tool_type(),
                    tool_type
                );
                return false;
            }
            if !has_enough_points(tool.points_count(), points.len()) {
                warn!("Too few points to update line tool {}", id);
                return false;
            }
            if let Some(options) = options {
                tool.apply_options(options);
            }
            tool.set_points(points);
            return true;
        }

        let Some(shape) = self.registry.create(tool_type) else {
            warn!("Cannot create line tool: unknown type '{}'", tool_type);
            return false;
        };
        if !has_enough_points(shape.points_count(), points.len()) {
            warn!("Too few points to create {} {}", tool_type, id);
            return false;
        }
        self.tools.push(LineTool::new(id, tool_type, shape, points, options));
        true
    }

    pub fn remove_line_tools_by_id<S: AsRef<str>>(&mut self, ids: &[S]) {
        let removed = self
            .tools
            .remove_where(|tool| ids.iter().any(|id| id.as_ref() == tool.id()));
        self.after_removal(removed);
    }

    pub fn remove_line_tools_by_id_regex(&mut self, pattern: &str) {
        let Some(regex) = compile(pattern) else {
            return;
        };
        let removed = self.tools.remove_where(|tool| regex.is_match(tool.id()));
        self.after_removal(removed);
    }

    pub fn remove_selected_line_tools(&mut self) {
        let removed = self.tools.remove_where(LineTool::is_selected);
        self.after_removal(removed);
    }

    pub fn remove_all_line_tools(&mut self) {
        let removed = self.tools.remove_where(|_| true);
        self.after_removal(removed);
    }

    fn after_removal(&mut self, removed: Vec<String>) {
        if removed.is_empty() {
            return;
        }
        debug!("Removed {} line tool(s)", removed.len());
        self.controller.forget_removed(&self.tools);
    }

    pub fn get_selected_line_tools(&self) -> String {
        let exports: Vec<LineToolExport> = self
            .tools
            .iter()
            .filter(|t| t.is_selected())
            .map(LineTool::export)
            .collect();
        to_json(&exports)
    }

    /// A one-element array, or `[]` when the id is unknown
    pub fn get_line_tool_by_id(&self, id: &str) -> String {
        let exports: Vec<LineToolExport> =
            self.tools.get(id).map(LineTool::export).into_iter().collect();
        to_json(&exports)
    }

    pub fn get_line_tools_by_id_regex(&self, pattern: &str) -> String {
        let Some(regex) = compile(pattern) else {
            return to_json(&[]);
        };
        let exports: Vec<LineToolExport> = self
            .tools
            .iter()
            .filter(|t| regex.is_match(t.id()))
            .map(LineTool::export)
            .collect();
        to_json(&exports)
    }

    /// Merge `export.options` into the tool and replace its points when given.
    pub fn apply_line_tool_options(&mut self, export: &LineToolExport) -> bool {
        let Some(tool) = self.tools.get_mut(&export.id) else {
            debug!("No line tool {} to apply options to", export.id);
            return false;
        };
        if !export.tool_type.is_empty() && export.tool_type != tool.tool_type() {
            warn!(
                "Line tool {} is a {}, not a {}",
                export.id,
                tool.tool_type(),
                export.tool_type
            );
            return false;
        }
        if !export.points.is_empty() {
            if !has_enough_points(tool.points_count(), export.points.len()) {
                warn!("Too few points for line tool {}", export.id);
                return false;
            }
            tool.set_points(export.points.clone());
        }
        if !export.options.is_null() {
            tool.apply_options(&export.options);
        }
        true
    }

    /// Every tool, bottom to top
    pub fn export_line_tools(&self) -> String {
        let exports: Vec<LineToolExport> = self.tools.iter().map(LineTool::export).collect();
        to_json(&exports)
    }

    /// Upsert every entry of an export document. Returns `false` (and changes
    /// nothing) when the document is not a JSON array.
    pub fn import_line_tools(&mut self, json: &str) -> bool {
        let entries = match parse_import(json) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Rejected line tool import: {}", e);
                return false;
            }
        };

        let total = entries.len();
        let mut imported = 0;
        for entry in entries {
            let id = entry.id.unwrap_or_else(|| Uuid::new_v4().to_string());
            if self.create_or_update_line_tool(
                &entry.tool_type,
                entry.points,
                entry.options.as_ref(),
                &id,
            ) {
                imported += 1;
            }
        }
        info!("Imported {} of {} line tool(s)", imported, total);
        true
    }

    pub fn set_cross_hair_xy(&mut self, x: f32, y: f32, visible: bool) {
        self.crosshair = visible.then_some(Vec2::new(x, y));
    }

    pub fn clear_cross_hair(&mut self) {
        self.crosshair = None;
    }

    pub fn subscribe_line_tools_double_click<F>(
        &self,
        callback: F,
        linked: Option<&str>,
        once: bool,
    ) -> SubscriptionHandle
    where
        F: Fn(&DoubleClickEvent) + Send + Sync + 'static,
    {
        self.events.double_click.subscribe(callback, linked, once)
    }

    pub fn unsubscribe_line_tools_double_click(&self, handle: SubscriptionHandle) -> bool {
        self.events.double_click.unsubscribe(handle)
    }

    pub fn subscribe_line_tools_after_edit<F>(
        &self,
        callback: F,
        linked: Option<&str>,
        once: bool,
    ) -> SubscriptionHandle
    where
        F: Fn(&AfterEditEvent) + Send + Sync + 'static,
    {
        self.events.after_edit.subscribe(callback, linked, once)
    }

    pub fn unsubscribe_line_tools_after_edit(&self, handle: SubscriptionHandle) -> bool {
        self.events.after_edit.unsubscribe(handle)
    }

    pub fn subscribe_line_tools_selection_changed<F>(
        &self,
        callback: F,
        linked: Option<&str>,
        once: bool,
    ) -> SubscriptionHandle
    where
        F: Fn(&SelectionChangedEvent) + Send + Sync + 'static,
    {
        self.events.selection_changed.subscribe(callback, linked, once)
    }

    pub fn unsubscribe_line_tools_selection_changed(&self, handle: SubscriptionHandle) -> bool {
        self.events.selection_changed.unsubscribe(handle)
    }

    /// Drop every subscription registered with `linked` on any channel.
    pub fn unsubscribe_linked(&self, linked: &str) -> usize {
        self.events.unsubscribe_linked(linked)
    }

    /// Draw every tool bottom to top, then the crosshair.
    pub fn render(&mut self, host: &dyn ChartHost, surface: &mut dyn RenderSurface) {
        let adapter = CoordinateAdapter::new(host);
        for tool in self.tools.iter_mut() {
            tool.draw(adapter, &self.settings, surface);
        }
        if let Some(position) = self.crosshair {
            CrosshairRenderer::new(CrosshairData {
                position,
                pane_size: host.pane_size(),
                stroke: self.crosshair_stroke,
            })
            .draw(surface);
        }
    }

    pub fn handle_pointer(&mut self, host: &dyn ChartHost, event: PointerEvent) -> PointerResponse {
        let mut ctx = InteractionContext {
            tools: &mut self.tools,
            events: &self.events,
            adapter: CoordinateAdapter::new(host),
            settings: &self.settings,
        };
        self.controller.handle(&mut ctx, event)
    }

    /// The host's scales or pane size changed; every view rebuilds next frame.
    pub fn on_layout_changed(&mut self) {
        self.tools.invalidate_all();
    }

    pub fn price_axis_labels(&self, host: &dyn ChartHost) -> Vec<PriceLabel> {
        price_axis_labels(&self.tools, CoordinateAdapter::new(host))
    }
}

/// Programmatic point lists must complete the tool
fn has_enough_points(count: PointsCount, len: usize) -> bool {
    count.is_complete(len)
}

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .inspect_err(|e| warn!("Invalid line tool id pattern '{}': {}", pattern, e))
        .ok()
}
