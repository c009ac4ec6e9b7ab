//! Typed event channels the facade fires to host subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

use crate::serialization::LineToolExport;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Identifies one subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Listener<T> {
    handle: SubscriptionHandle,
    /// Owner tag for bulk removal
    linked: Option<String>,
    once: bool,
    callback: Callback<T>,
}

/// A list of listeners for one event type.
///
/// Firing works on a snapshot, so a callback may subscribe or unsubscribe
/// without affecting the delivery in progress.
pub struct EventChannel<T> {
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<T> std::fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F, linked: Option<&str>, once: bool) -> SubscriptionHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let handle = SubscriptionHandle::next();
        self.listeners.lock().push(Listener {
            handle,
            linked: linked.map(str::to_string),
            once,
            callback: Arc::new(callback),
        });
        handle
    }

    /// Returns `false` when the handle was not subscribed here.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|l| l.handle != handle);
        listeners.len() != before
    }

    /// Drop every listener registered with `linked`; returns how many.
    pub fn unsubscribe_linked(&self, linked: &str) -> usize {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|l| l.linked.as_deref() != Some(linked));
        before - listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fire(&self, event: &T) {
        let snapshot: Vec<Callback<T>> = {
            let mut listeners = self.listeners.lock();
            let snapshot = listeners.iter().map(|l| Arc::clone(&l.callback)).collect();
            listeners.retain(|l| !l.once);
            snapshot
        };
        for callback in snapshot {
            callback(event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AfterEditStage {
    /// A finished tool was dragged or had a point moved
    LineToolEdited,
    /// An unbounded path received its final point
    PathFinished,
    /// Placement completed
    LineToolFinished,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AfterEditEvent {
    pub selected_line_tool: LineToolExport,
    pub stage: AfterEditStage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleClickEvent {
    pub selected_line_tool: LineToolExport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChangedEvent {
    pub selected: Vec<LineToolExport>,
    /// Ids of tools that lost the selection
    pub deselected: Vec<String>,
}

/// The three channels a facade exposes.
#[derive(Debug, Default)]
pub struct LineToolEvents {
    pub double_click: EventChannel<DoubleClickEvent>,
    pub after_edit: EventChannel<AfterEditEvent>,
    pub selection_changed: EventChannel<SelectionChangedEvent>,
}

impl LineToolEvents {
    pub fn unsubscribe_linked(&self, linked: &str) -> usize {
        self.double_click.unsubscribe_linked(linked)
            + self.after_edit.unsubscribe_linked(linked)
            + self.selection_changed.unsubscribe_linked(linked)
    }
}
