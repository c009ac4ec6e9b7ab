//! Mouse input to engine pointer events.
//!
//! Bevy reports raw presses and releases; clicks and double-clicks are
//! synthesized here from press/release distance and timing.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::chart::DemoChart;
use super::is_cursor_over_ui;
use crate::api::LineToolsApi;
use crate::common::CursorHint;
use crate::constants::{CLICK_MAX_TRAVEL, DOUBLE_CLICK_SECONDS};
use crate::interaction::{PointerEvent, PointerResponse};

/// Turns press/release pairs into clicks and double-clicks.
#[derive(Debug, Default)]
pub struct ClickTracker {
    press: Option<Vec2>,
    /// Furthest the pointer got from the press position
    travel: f32,
    last_click: Option<(Vec2, f64)>,
}

impl ClickTracker {
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn press(&mut self, position: Vec2) {
        self.press = Some(position);
        self.travel = 0.0;
    }

    pub fn drag(&mut self, position: Vec2) {
        if let Some(start) = self.press {
            self.travel = self.travel.max(start.distance(position));
        }
    }

    /// Forget a press whose release will never be seen.
    pub fn cancel_press(&mut self) {
        self.press = None;
        self.travel = 0.0;
    }

    /// Events produced by releasing the button at `position` at time `now`.
    pub fn release(&mut self, position: Vec2, now: f64) -> Vec<PointerEvent> {
        let Some(start) = self.press.take() else {
            return Vec::new();
        };
        if self.travel.max(start.distance(position)) > CLICK_MAX_TRAVEL {
            self.last_click = None;
            return Vec::new();
        }

        if let Some((previous, at)) = self.last_click.take()
            && now - at <= DOUBLE_CLICK_SECONDS
            && previous.distance(position) <= CLICK_MAX_TRAVEL
        {
            return vec![
                PointerEvent::Click(position),
                PointerEvent::DoubleClick(position),
            ];
        }
        self.last_click = Some((position, now));
        vec![PointerEvent::Click(position)]
    }
}

#[derive(Resource, Default)]
pub struct PointerState {
    clicks: ClickTracker,
    last_position: Option<Vec2>,
    /// A left drag that started on empty chart space scrolls the chart
    panning: bool,
    cursor: CursorHint,
}

/// Feed the primary window's mouse into the engine and apply its cursor.
#[allow(clippy::too_many_arguments)]
pub fn route_pointer_input(
    mut commands: Commands,
    mut api: ResMut<LineToolsApi>,
    mut chart: ResMut<DemoChart>,
    mut state: ResMut<PointerState>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut contexts: EguiContexts,
) {
    let Ok((window_entity, window)) = window_query.single() else {
        return;
    };
    let over_ui = is_cursor_over_ui(&mut contexts);

    let Some(position) = window.cursor_position().filter(|_| !over_ui) else {
        if state.last_position.take().is_some() {
            api.handle_pointer(&chart.scales, PointerEvent::Leave);
            api.clear_cross_hair();
            state.clicks.cancel_press();
            state.panning = false;
            set_cursor(&mut commands, window_entity, &mut state, CursorHint::Default);
        }
        return;
    };

    let previous = state.last_position.replace(position);
    let moved = previous != Some(position);
    api.set_cross_hair_xy(position.x, position.y, true);

    let mut response: Option<PointerResponse> = None;
    if mouse_button.just_pressed(MouseButton::Left) {
        state.clicks.press(position);
        let down = api.handle_pointer(&chart.scales, PointerEvent::Down(position));
        state.panning = !down.consumed && api.creating().is_none();
        response = Some(down);
    } else if mouse_button.just_released(MouseButton::Left) && state.clicks.is_pressed() {
        let mut last = api.handle_pointer(&chart.scales, PointerEvent::Up(position));
        let now = time.elapsed_secs_f64();
        for event in state.clicks.release(position, now) {
            let click = api.handle_pointer(&chart.scales, event);
            if click.consumed {
                last = click;
            }
        }
        state.panning = false;
        response = Some(last);
    } else if mouse_button.pressed(MouseButton::Left) && state.clicks.is_pressed() {
        if moved {
            state.clicks.drag(position);
            if state.panning {
                if let Some(previous) = previous {
                    chart.scales.pan_pixels(position - previous);
                    api.on_layout_changed();
                }
            } else {
                response = Some(api.handle_pointer(&chart.scales, PointerEvent::Drag(position)));
            }
        }
    } else if moved {
        response = Some(api.handle_pointer(&chart.scales, PointerEvent::Move(position)));
    }

    if let Some(response) = response {
        let cursor = if state.panning {
            CursorHint::Grabbing
        } else {
            response.cursor
        };
        set_cursor(&mut commands, window_entity, &mut state, cursor);
    }
}

fn set_cursor(
    commands: &mut Commands,
    window_entity: Entity,
    state: &mut PointerState,
    cursor: CursorHint,
) {
    if state.cursor != cursor {
        state.cursor = cursor;
        commands.entity(window_entity).insert(cursor.cursor_icon());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_in_place_is_a_click() {
        let mut tracker = ClickTracker::default();
        tracker.press(Vec2::new(10.0, 10.0));
        let events = tracker.release(Vec2::new(11.0, 10.0), 1.0);
        assert_eq!(events, vec![PointerEvent::Click(Vec2::new(11.0, 10.0))]);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_drag_beyond_travel_is_not_a_click() {
        let mut tracker = ClickTracker::default();
        tracker.press(Vec2::ZERO);
        tracker.drag(Vec2::new(50.0, 0.0));
        // Coming back to the start does not turn it into a click
        assert!(tracker.release(Vec2::ZERO, 1.0).is_empty());
    }

    #[test]
    fn test_quick_second_click_is_a_double_click() {
        let mut tracker = ClickTracker::default();
        let at = Vec2::new(100.0, 100.0);
        tracker.press(at);
        tracker.release(at, 1.0);
        tracker.press(at);
        let events = tracker.release(at, 1.2);
        assert_eq!(
            events,
            vec![PointerEvent::Click(at), PointerEvent::DoubleClick(at)]
        );

        // A third click starts over
        tracker.press(at);
        assert_eq!(tracker.release(at, 1.3), vec![PointerEvent::Click(at)]);
    }

    #[test]
    fn test_slow_or_distant_second_click_is_single() {
        let mut tracker = ClickTracker::default();
        let at = Vec2::new(100.0, 100.0);
        tracker.press(at);
        tracker.release(at, 1.0);
        tracker.press(at);
        assert_eq!(tracker.release(at, 2.0), vec![PointerEvent::Click(at)]);

        let far = Vec2::new(200.0, 100.0);
        tracker.press(far);
        assert_eq!(tracker.release(far, 2.1), vec![PointerEvent::Click(far)]);
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let mut tracker = ClickTracker::default();
        assert!(tracker.release(Vec2::ZERO, 0.0).is_empty());
    }
}
