//! Engine callbacks forwarded as Bevy messages.
//!
//! Engine channels call back synchronously from inside `handle_pointer`, where
//! no message writer is available. The host subscription only queues the
//! event; a system drains the queue once per frame.

use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::api::LineToolsApi;
use crate::interaction::{AfterEditEvent, DoubleClickEvent, SelectionChangedEvent};

/// Link name of the host's own subscriptions
pub const HOST_LINK: &str = "bevy-host";

#[derive(Message, Debug, Clone)]
pub struct LineToolAfterEdit(pub AfterEditEvent);

#[derive(Message, Debug, Clone)]
pub struct LineToolDoubleClicked(pub DoubleClickEvent);

#[derive(Message, Debug, Clone)]
pub struct LineToolSelectionChanged(pub SelectionChangedEvent);

#[derive(Debug, Clone)]
enum QueuedEvent {
    AfterEdit(AfterEditEvent),
    DoubleClick(DoubleClickEvent),
    SelectionChanged(SelectionChangedEvent),
}

#[derive(Resource, Default, Clone)]
pub struct EngineEventQueue {
    events: Arc<Mutex<Vec<QueuedEvent>>>,
}

impl EngineEventQueue {
    fn push(&self, event: QueuedEvent) {
        self.events.lock().push(event);
    }

    fn drain(&self) -> Vec<QueuedEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

pub fn subscribe_engine_events(api: Res<LineToolsApi>, queue: Res<EngineEventQueue>) {
    let sink = queue.clone();
    api.subscribe_line_tools_after_edit(
        move |event: &AfterEditEvent| sink.push(QueuedEvent::AfterEdit(event.clone())),
        Some(HOST_LINK),
        false,
    );
    let sink = queue.clone();
    api.subscribe_line_tools_double_click(
        move |event: &DoubleClickEvent| sink.push(QueuedEvent::DoubleClick(event.clone())),
        Some(HOST_LINK),
        false,
    );
    let sink = queue.clone();
    api.subscribe_line_tools_selection_changed(
        move |event: &SelectionChangedEvent| {
            sink.push(QueuedEvent::SelectionChanged(event.clone()))
        },
        Some(HOST_LINK),
        false,
    );
    debug!("Host subscribed to line tool events");
}

pub fn forward_engine_events(
    queue: Res<EngineEventQueue>,
    mut after_edit: MessageWriter<LineToolAfterEdit>,
    mut double_click: MessageWriter<LineToolDoubleClicked>,
    mut selection: MessageWriter<LineToolSelectionChanged>,
) {
    for event in queue.drain() {
        match event {
            QueuedEvent::AfterEdit(event) => {
                debug!(
                    "{:?}: {} {}",
                    event.stage, event.selected_line_tool.tool_type, event.selected_line_tool.id
                );
                after_edit.write(LineToolAfterEdit(event));
            }
            QueuedEvent::DoubleClick(event) => {
                debug!("Double click on {}", event.selected_line_tool.id);
                double_click.write(LineToolDoubleClicked(event));
            }
            QueuedEvent::SelectionChanged(event) => {
                debug!(
                    "Selection changed: {} selected, {} deselected",
                    event.selected.len(),
                    event.deselected.len()
                );
                selection.write(LineToolSelectionChanged(event));
            }
        }
    }
}
