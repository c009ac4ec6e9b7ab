//! Pointer handling and the events it produces.

mod controller;
mod events;

pub use controller::{
    InteractionContext, InteractionController, PointerEvent, PointerResponse, deselect_all,
    select_exclusive,
};
pub use events::{
    AfterEditEvent, AfterEditStage, DoubleClickEvent, EventChannel, LineToolEvents,
    SelectionChangedEvent, SubscriptionHandle,
};
