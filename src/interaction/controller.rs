//! Pointer state machine: hover, selection, dragging and interactive creation.

use bevy::log::debug;
use bevy::math::Vec2;

use super::events::{
    AfterEditEvent, AfterEditStage, DoubleClickEvent, LineToolEvents, SelectionChangedEvent,
};
use crate::common::CursorHint;
use crate::constants::{CLICK_MAX_TRAVEL, MIN_DRAG_POINT_DISTANCE};
use crate::model::{CoordinateAdapter, LogicalPoint};
use crate::tools::{LineTool, PointsCount, ToolSet, ViewSettings};

/// Pointer input in pane pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(Vec2),
    Down(Vec2),
    /// Move while the primary button is held
    Drag(Vec2),
    Up(Vec2),
    Click(Vec2),
    DoubleClick(Vec2),
    Leave,
}

/// What the host should do after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerResponse {
    pub cursor: CursorHint,
    /// The engine used the event; the host should not pan or zoom with it
    pub consumed: bool,
}

impl PointerResponse {
    fn consumed(cursor: CursorHint) -> Self {
        Self {
            cursor,
            consumed: true,
        }
    }

    fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
enum DragTarget {
    Point(usize),
    Body {
        origin: Vec<LogicalPoint>,
        start: LogicalPoint,
    },
}

#[derive(Debug, Clone)]
struct DragState {
    id: String,
    target: DragTarget,
    moved: bool,
}

/// Borrowed engine state a pointer event works on.
pub struct InteractionContext<'a> {
    pub tools: &'a mut ToolSet,
    pub events: &'a LineToolEvents,
    pub adapter: CoordinateAdapter<'a>,
    pub settings: &'a ViewSettings,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    /// Tool being placed
    creating: Option<String>,
    drag: Option<DragState>,
    hovered: Option<String>,
    /// Last recorded pixel of a click-drag stroke
    last_stroke_pixel: Option<Vec2>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creating(&self) -> Option<&str> {
        self.creating.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Enter interactive placement for `id`, cancelling any unfinished one.
    pub fn begin_creation(&mut self, tools: &mut ToolSet, events: &LineToolEvents, id: &str) {
        if let Some(previous) = self.creating.take()
            && previous != id
            && tools.get(&previous).is_some_and(|t| !t.is_finished())
        {
            debug!("Cancelling unfinished line tool {}", previous);
            tools.remove(&previous);
        }
        self.drag = None;
        self.last_stroke_pixel = None;
        deselect_all(tools, events);
        self.creating = Some(id.to_string());
    }

    /// Forget ids of tools that no longer exist.
    pub fn forget_removed(&mut self, tools: &ToolSet) {
        if self.creating.as_deref().is_some_and(|id| !tools.contains(id)) {
            self.creating = None;
            self.last_stroke_pixel = None;
        }
        if self.drag.as_ref().is_some_and(|d| !tools.contains(&d.id)) {
            self.drag = None;
        }
        if self.hovered.as_deref().is_some_and(|id| !tools.contains(id)) {
            self.hovered = None;
        }
    }

    pub fn handle(&mut self, ctx: &mut InteractionContext, event: PointerEvent) -> PointerResponse {
        self.forget_removed(ctx.tools);
        match event {
            PointerEvent::Move(position) => self.on_move(ctx, position),
            PointerEvent::Down(position) => self.on_down(ctx, position),
            PointerEvent::Drag(position) => self.on_drag(ctx, position),
            PointerEvent::Up(position) => self.on_up(ctx, position),
            PointerEvent::Click(position) => self.on_click(ctx, position),
            PointerEvent::DoubleClick(position) => self.on_double_click(ctx, position),
            PointerEvent::Leave => self.on_leave(ctx),
        }
    }

    fn creating_tool<'t>(&self, tools: &'t mut ToolSet) -> Option<&'t mut LineTool> {
        let id = self.creating.as_deref()?;
        tools.get_mut(id).filter(|t| !t.is_finished())
    }

    fn set_hovered(&mut self, tools: &mut ToolSet, id: Option<String>) {
        if self.hovered == id {
            return;
        }
        if let Some(old) = self.hovered.take()
            && let Some(tool) = tools.get_mut(&old)
        {
            tool.set_hovered(false);
        }
        if let Some(new) = &id
            && let Some(tool) = tools.get_mut(new)
        {
            tool.set_hovered(true);
        }
        self.hovered = id;
    }

    fn on_move(&mut self, ctx: &mut InteractionContext, position: Vec2) -> PointerResponse {
        let logical = ctx.adapter.to_logical(position);
        if let Some(tool) = self.creating_tool(ctx.tools) {
            tool.set_current_point(logical);
            return PointerResponse::consumed(CursorHint::Crosshair);
        }

        let hit = ctx.tools.top_hit(ctx.adapter, ctx.settings, position);
        let cursor = hit.as_ref().map_or(CursorHint::Default, |(_, h)| h.cursor);
        self.set_hovered(ctx.tools, hit.map(|(id, _)| id));
        PointerResponse {
            cursor,
            consumed: false,
        }
    }

    fn on_down(&mut self, ctx: &mut InteractionContext, position: Vec2) -> PointerResponse {
        let logical = ctx.adapter.to_logical(position);
        if let Some(tool) = self.creating_tool(ctx.tools) {
            if tool.supports_click_drag_creation()
                && tool.points().is_empty()
                && let Some(point) = logical
            {
                tool.add_point(point);
                self.last_stroke_pixel = Some(position);
            }
            return PointerResponse::consumed(CursorHint::Crosshair);
        }

        let Some((id, hit)) = ctx.tools.top_hit(ctx.adapter, ctx.settings, position) else {
            deselect_all(ctx.tools, ctx.events);
            return PointerResponse::ignored();
        };
        select_exclusive(ctx.tools, ctx.events, &id);

        let Some(tool) = ctx.tools.get_mut(&id) else {
            return PointerResponse::ignored();
        };
        if !tool.is_editable() {
            return PointerResponse::consumed(hit.cursor);
        }

        let target = match hit.point_index {
            Some(index) => {
                tool.set_edited_point_index(Some(index));
                Some(DragTarget::Point(index))
            }
            None => logical.map(|start| DragTarget::Body {
                origin: tool.points().to_vec(),
                start,
            }),
        };
        let cursor = match target {
            Some(DragTarget::Body { .. }) => CursorHint::Grabbing,
            _ => hit.cursor,
        };
        self.drag = target.map(|target| DragState {
            id,
            target,
            moved: false,
        });
        PointerResponse::consumed(cursor)
    }

    fn on_drag(&mut self, ctx: &mut InteractionContext, position: Vec2) -> PointerResponse {
        let logical = ctx.adapter.to_logical(position);
        if let Some(tool) = self.creating_tool(ctx.tools) {
            if tool.supports_click_drag_creation()
                && !tool.points().is_empty()
                && let Some(point) = logical
            {
                let far_enough = self
                    .last_stroke_pixel
                    .is_none_or(|last| last.distance(position) >= MIN_DRAG_POINT_DISTANCE);
                if far_enough {
                    tool.add_point(point);
                    self.last_stroke_pixel = Some(position);
                }
            } else {
                tool.set_current_point(logical);
            }
            return PointerResponse::consumed(CursorHint::Crosshair);
        }

        let Some(drag) = self.drag.as_mut() else {
            return PointerResponse::ignored();
        };
        let Some(tool) = ctx.tools.get_mut(&drag.id) else {
            self.drag = None;
            return PointerResponse::ignored();
        };
        let Some(point) = logical else {
            return PointerResponse::consumed(CursorHint::Grabbing);
        };

        let cursor = match &drag.target {
            DragTarget::Point(index) => {
                tool.move_point(*index, point);
                CursorHint::Grabbing
            }
            DragTarget::Body { origin, start } => {
                tool.translate_from(
                    origin,
                    point.timestamp - start.timestamp,
                    point.price - start.price,
                );
                CursorHint::Grabbing
            }
        };
        tool.set_editing(true);
        drag.moved = true;
        PointerResponse::consumed(cursor)
    }

    fn on_up(&mut self, ctx: &mut InteractionContext, _position: Vec2) -> PointerResponse {
        if let Some(tool) = self.creating_tool(ctx.tools)
            && tool.supports_click_drag_creation()
        {
            let id = tool.id().to_string();
            if tool.points().len() >= 2 {
                tool.finish();
                let export = tool.export();
                self.creating = None;
                self.last_stroke_pixel = None;
                ctx.events.after_edit.fire(&AfterEditEvent {
                    selected_line_tool: export,
                    stage: AfterEditStage::LineToolFinished,
                });
            } else if !tool.points().is_empty() {
                debug!("Discarding stroke {} with a single point", id);
                ctx.tools.remove(&id);
                self.creating = None;
                self.last_stroke_pixel = None;
            }
            return PointerResponse::consumed(CursorHint::Crosshair);
        }

        let Some(drag) = self.drag.take() else {
            return PointerResponse::ignored();
        };
        let Some(tool) = ctx.tools.get_mut(&drag.id) else {
            return PointerResponse::ignored();
        };
        tool.set_editing(false);
        tool.set_edited_point_index(None);
        if drag.moved {
            ctx.events.after_edit.fire(&AfterEditEvent {
                selected_line_tool: tool.export(),
                stage: AfterEditStage::LineToolEdited,
            });
        }
        PointerResponse::consumed(CursorHint::Move)
    }

    fn on_click(&mut self, ctx: &mut InteractionContext, position: Vec2) -> PointerResponse {
        let logical = ctx.adapter.to_logical(position);
        let Some(tool) = self.creating_tool(ctx.tools) else {
            return PointerResponse::ignored();
        };
        if !tool.supports_click_click_creation() {
            return PointerResponse::consumed(CursorHint::Crosshair);
        }
        let Some(point) = logical else {
            return PointerResponse::consumed(CursorHint::NotAllowed);
        };

        if tool.add_point(point) {
            let export = tool.export();
            self.creating = None;
            ctx.events.after_edit.fire(&AfterEditEvent {
                selected_line_tool: export,
                stage: AfterEditStage::LineToolFinished,
            });
            return PointerResponse::consumed(CursorHint::Default);
        }
        PointerResponse::consumed(CursorHint::Crosshair)
    }

    fn on_double_click(&mut self, ctx: &mut InteractionContext, position: Vec2) -> PointerResponse {
        let adapter = ctx.adapter;
        if let Some(tool) = self.creating_tool(ctx.tools) {
            if tool.supports_click_click_creation()
                && tool.points_count() == PointsCount::Unbounded
            {
                drop_trailing_duplicate(tool, adapter);
                if tool.points().len() >= 2 {
                    tool.finish();
                    let export = tool.export();
                    self.creating = None;
                    ctx.events.after_edit.fire(&AfterEditEvent {
                        selected_line_tool: export.clone(),
                        stage: AfterEditStage::PathFinished,
                    });
                    ctx.events.after_edit.fire(&AfterEditEvent {
                        selected_line_tool: export,
                        stage: AfterEditStage::LineToolFinished,
                    });
                    return PointerResponse::consumed(CursorHint::Default);
                }
            }
            return PointerResponse::consumed(CursorHint::Crosshair);
        }

        let Some((id, hit)) = ctx.tools.top_hit(ctx.adapter, ctx.settings, position) else {
            return PointerResponse::ignored();
        };
        let Some(tool) = ctx.tools.get(&id).filter(|t| t.is_finished()) else {
            return PointerResponse::ignored();
        };
        ctx.events.double_click.fire(&DoubleClickEvent {
            selected_line_tool: tool.export(),
        });
        PointerResponse::consumed(hit.cursor)
    }

    fn on_leave(&mut self, ctx: &mut InteractionContext) -> PointerResponse {
        if let Some(tool) = self.creating_tool(ctx.tools) {
            tool.set_current_point(None);
        }
        self.set_hovered(ctx.tools, None);
        PointerResponse::ignored()
    }
}

/// The clicks of a double click each add a point; the second one is a
/// duplicate of the first when the pointer did not travel.
fn drop_trailing_duplicate(tool: &mut LineTool, adapter: CoordinateAdapter) {
    let points = tool.points();
    let [.., previous, last] = points else {
        return;
    };
    let (Some(a), Some(b)) = (adapter.to_screen(previous, 0), adapter.to_screen(last, 0)) else {
        return;
    };
    if a.position.distance(b.position) <= CLICK_MAX_TRAVEL {
        tool.pop_point();
    }
}

/// Make `id` the only selected tool, firing a change event if anything moved.
pub fn select_exclusive(tools: &mut ToolSet, events: &LineToolEvents, id: &str) {
    let mut deselected = Vec::new();
    let mut selected = Vec::new();
    for tool in tools.iter_mut() {
        if tool.id() == id {
            if tool.set_selected(true) {
                selected.push(tool.export());
            }
        } else if tool.is_selected() {
            tool.set_selected(false);
            tool.set_edited_point_index(None);
            deselected.push(tool.id().to_string());
        }
    }
    if selected.is_empty() && deselected.is_empty() {
        return;
    }
    // The event always names the tool that holds the selection
    if selected.is_empty()
        && let Some(tool) = tools.get(id)
    {
        selected.push(tool.export());
    }
    events.selection_changed.fire(&SelectionChangedEvent {
        selected,
        deselected,
    });
}

/// Clear the selection, firing a change event if anything was selected.
pub fn deselect_all(tools: &mut ToolSet, events: &LineToolEvents) {
    let mut deselected = Vec::new();
    for tool in tools.iter_mut() {
        if tool.set_selected(false) {
            tool.set_edited_point_index(None);
            deselected.push(tool.id().to_string());
        }
    }
    if !deselected.is_empty() {
        events.selection_changed.fire(&SelectionChangedEvent {
            selected: Vec::new(),
            deselected,
        });
    }
}

#[cfg(test)]
mod tests;
