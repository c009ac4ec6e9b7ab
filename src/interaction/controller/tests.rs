//! Pointer state machine tests.

#![cfg(test)]

use std::sync::Arc;

use bevy::math::Vec2;
use parking_lot::Mutex;

use super::*;
use crate::interaction::events::EventChannel;
use crate::model::LinearScales;
use crate::tools::{BuiltinToolType, LineTool};

/// Pane of 1000x500 px over time 0..1000 and price 0..100
struct Harness {
    tools: ToolSet,
    events: LineToolEvents,
    scales: LinearScales,
    settings: ViewSettings,
    controller: InteractionController,
}

impl Harness {
    fn new() -> Self {
        Self {
            tools: ToolSet::new(),
            events: LineToolEvents::default(),
            scales: LinearScales::new((0.0, 1000.0), (0.0, 100.0), Vec2::new(1000.0, 500.0)),
            settings: ViewSettings::default(),
            controller: InteractionController::new(),
        }
    }

    fn add(&mut self, id: &str, tool_type: BuiltinToolType, points: &[(f64, f64)]) {
        let points = points
            .iter()
            .map(|&(t, p)| LogicalPoint::new(t, p))
            .collect();
        self.tools.push(LineTool::new(id, tool_type.name(), tool_type.create(), points, None));
    }

    fn start(&mut self, id: &str, tool_type: BuiltinToolType) {
        self.add(id, tool_type, &[]);
        self.controller.begin_creation(&mut self.tools, &self.events, id);
    }

    fn send(&mut self, event: PointerEvent) -> PointerResponse {
        let mut ctx = InteractionContext {
            tools: &mut self.tools,
            events: &self.events,
            adapter: CoordinateAdapter::new(&self.scales),
            settings: &self.settings,
        };
        self.controller.handle(&mut ctx, event)
    }

    fn tool(&self, id: &str) -> &LineTool {
        self.tools.get(id).unwrap()
    }
}

fn record<T: Clone + Send + 'static>(channel: &EventChannel<T>) -> Arc<Mutex<Vec<T>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    channel.subscribe(move |event: &T| sink.lock().push(event.clone()), None, false);
    log
}

fn stages(log: &Arc<Mutex<Vec<AfterEditEvent>>>) -> Vec<AfterEditStage> {
    log.lock().iter().map(|e| e.stage).collect()
}

#[test]
fn test_rectangle_click_click_finishes_once() {
    let mut h = Harness::new();
    let edits = record(&h.events.after_edit);
    h.start("r", BuiltinToolType::Rectangle);

    let response = h.send(PointerEvent::Move(Vec2::new(100.0, 100.0)));
    assert!(response.consumed);
    assert_eq!(response.cursor, CursorHint::Crosshair);
    assert!(h.tool("r").current_point().is_some());

    h.send(PointerEvent::Click(Vec2::new(100.0, 100.0)));
    assert!(!h.tool("r").is_finished());
    assert_eq!(h.tool("r").points().len(), 1);

    h.send(PointerEvent::Click(Vec2::new(300.0, 300.0)));
    assert!(h.tool("r").is_finished());
    assert_eq!(h.tool("r").points()[1], LogicalPoint::new(300.0, 40.0));
    assert_eq!(stages(&edits), vec![AfterEditStage::LineToolFinished]);

    // Further clicks no longer create anything
    let response = h.send(PointerEvent::Click(Vec2::new(500.0, 300.0)));
    assert!(!response.consumed);
    assert_eq!(edits.lock().len(), 1);
    assert_eq!(h.controller.creating(), None);
}

#[test]
fn test_path_finishes_on_double_click() {
    let mut h = Harness::new();
    let edits = record(&h.events.after_edit);
    h.start("p", BuiltinToolType::Path);

    for position in [(100.0, 100.0), (200.0, 200.0), (300.0, 100.0), (300.0, 100.0)] {
        h.send(PointerEvent::Click(Vec2::new(position.0, position.1)));
    }
    assert!(!h.tool("p").is_finished());
    h.send(PointerEvent::DoubleClick(Vec2::new(300.0, 100.0)));

    let tool = h.tool("p");
    assert!(tool.is_finished());
    // The duplicate point of the double click is dropped
    assert_eq!(tool.points().len(), 3);
    assert_eq!(
        stages(&edits),
        vec![AfterEditStage::PathFinished, AfterEditStage::LineToolFinished]
    );
}

#[test]
fn test_brush_records_spaced_points_while_dragging() {
    let mut h = Harness::new();
    let edits = record(&h.events.after_edit);
    h.start("b", BuiltinToolType::Brush);

    h.send(PointerEvent::Down(Vec2::new(100.0, 100.0)));
    h.send(PointerEvent::Drag(Vec2::new(100.5, 100.0)));
    h.send(PointerEvent::Drag(Vec2::new(110.0, 100.0)));
    h.send(PointerEvent::Drag(Vec2::new(120.0, 110.0)));
    assert_eq!(h.tool("b").points().len(), 3);
    assert!(!h.tool("b").is_finished());

    h.send(PointerEvent::Up(Vec2::new(120.0, 110.0)));
    assert!(h.tool("b").is_finished());
    assert_eq!(stages(&edits), vec![AfterEditStage::LineToolFinished]);
}

#[test]
fn test_single_point_stroke_is_discarded() {
    let mut h = Harness::new();
    let edits = record(&h.events.after_edit);
    h.start("b", BuiltinToolType::Highlighter);
    h.send(PointerEvent::Down(Vec2::new(100.0, 100.0)));
    h.send(PointerEvent::Up(Vec2::new(100.0, 100.0)));
    assert!(h.tools.is_empty());
    assert!(edits.lock().is_empty());
    assert_eq!(h.controller.creating(), None);
}

#[test]
fn test_hover_follows_pointer() {
    let mut h = Harness::new();
    h.add("t", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);

    let response = h.send(PointerEvent::Move(Vec2::new(200.0, 251.0)));
    assert!(h.tool("t").is_hovered());
    assert_eq!(response.cursor, CursorHint::Move);
    assert!(!response.consumed);

    h.send(PointerEvent::Move(Vec2::new(200.0, 400.0)));
    assert!(!h.tool("t").is_hovered());

    h.send(PointerEvent::Move(Vec2::new(200.0, 250.0)));
    h.send(PointerEvent::Leave);
    assert!(!h.tool("t").is_hovered());
}

#[test]
fn test_body_drag_moves_whole_tool() {
    let mut h = Harness::new();
    let edits = record(&h.events.after_edit);
    h.add("t", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);

    let response = h.send(PointerEvent::Down(Vec2::new(200.0, 250.0)));
    assert!(response.consumed);
    assert!(h.tool("t").is_selected());

    h.send(PointerEvent::Drag(Vec2::new(250.0, 200.0)));
    assert!(h.tool("t").is_editing());
    let points = h.tool("t").points();
    assert_eq!(points[0], LogicalPoint::new(150.0, 60.0));
    assert_eq!(points[1], LogicalPoint::new(350.0, 60.0));

    h.send(PointerEvent::Up(Vec2::new(250.0, 200.0)));
    assert!(!h.tool("t").is_editing());
    assert_eq!(stages(&edits), vec![AfterEditStage::LineToolEdited]);
}

#[test]
fn test_anchor_drag_moves_one_point() {
    let mut h = Harness::new();
    h.add("t", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);

    // Hovering reveals the handles
    h.send(PointerEvent::Move(Vec2::new(100.0, 250.0)));
    h.send(PointerEvent::Down(Vec2::new(100.0, 250.0)));
    assert_eq!(h.tool("t").edited_point_index(), Some(0));

    h.send(PointerEvent::Drag(Vec2::new(150.0, 200.0)));
    assert_eq!(h.tool("t").points()[0], LogicalPoint::new(150.0, 60.0));
    assert_eq!(h.tool("t").points()[1], LogicalPoint::new(300.0, 50.0));

    h.send(PointerEvent::Up(Vec2::new(150.0, 200.0)));
    assert_eq!(h.tool("t").edited_point_index(), None);
}

#[test]
fn test_click_without_drag_fires_no_edit() {
    let mut h = Harness::new();
    let edits = record(&h.events.after_edit);
    h.add("t", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);
    h.send(PointerEvent::Down(Vec2::new(200.0, 250.0)));
    h.send(PointerEvent::Up(Vec2::new(200.0, 250.0)));
    assert!(edits.lock().is_empty());
}

#[test]
fn test_non_editable_tool_selects_but_does_not_move() {
    let mut h = Harness::new();
    h.add("t", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);
    if let Some(tool) = h.tools.get_mut("t") {
        tool.apply_options(&serde_json::json!({ "editable": false }));
    }
    h.send(PointerEvent::Down(Vec2::new(200.0, 250.0)));
    h.send(PointerEvent::Drag(Vec2::new(250.0, 200.0)));
    assert!(h.tool("t").is_selected());
    assert_eq!(h.tool("t").points()[0], LogicalPoint::new(100.0, 50.0));
}

#[test]
fn test_selection_is_exclusive() {
    let mut h = Harness::new();
    let changes = record(&h.events.selection_changed);
    h.add("a", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);
    h.add("b", BuiltinToolType::TrendLine, &[(100.0, 20.0), (300.0, 20.0)]);

    h.send(PointerEvent::Down(Vec2::new(200.0, 250.0)));
    h.send(PointerEvent::Up(Vec2::new(200.0, 250.0)));
    h.send(PointerEvent::Down(Vec2::new(200.0, 400.0)));
    h.send(PointerEvent::Up(Vec2::new(200.0, 400.0)));

    {
        let log = changes.lock();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].selected.len(), 1);
        assert_eq!(log[1].selected[0].id, "b");
        assert_eq!(log[1].deselected, vec!["a".to_string()]);
    }
    assert!(!h.tool("a").is_selected());
    assert_eq!(h.tool("a").edited_point_index(), None);

    // Empty space clears the selection
    h.send(PointerEvent::Down(Vec2::new(900.0, 50.0)));
    let log = changes.lock();
    assert_eq!(log.len(), 3);
    assert!(log[2].selected.is_empty());
    assert_eq!(log[2].deselected, vec!["b".to_string()]);
}

#[test]
fn test_double_click_on_finished_tool() {
    let mut h = Harness::new();
    let clicks = record(&h.events.double_click);
    h.add("t", BuiltinToolType::TrendLine, &[(100.0, 50.0), (300.0, 50.0)]);
    h.send(PointerEvent::DoubleClick(Vec2::new(200.0, 250.0)));
    h.send(PointerEvent::DoubleClick(Vec2::new(200.0, 450.0)));
    let log = clicks.lock();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].selected_line_tool.id, "t");
}

#[test]
fn test_new_creation_cancels_unfinished_one() {
    let mut h = Harness::new();
    h.start("first", BuiltinToolType::TrendLine);
    h.send(PointerEvent::Click(Vec2::new(100.0, 100.0)));
    h.start("second", BuiltinToolType::Rectangle);
    assert!(!h.tools.contains("first"));
    assert_eq!(h.controller.creating(), Some("second"));
}
