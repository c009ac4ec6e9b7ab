//! Demo chart: affine time/price scales filling the primary window.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::is_cursor_over_ui;
use crate::api::LineToolsApi;
use crate::model::LinearScales;

/// 2023-11-14, a round timestamp to start the demo at
const INITIAL_TIME: f64 = 1_700_000_000.0;
/// Thirty days of visible history
const INITIAL_SPAN: f64 = 30.0 * 86_400.0;
const INITIAL_PRICE_RANGE: (f64, f64) = (80.0, 120.0);

/// Fraction of the visible time range one wheel line zooms by
const ZOOM_STEP: f64 = 0.1;

#[derive(Component)]
pub struct ChartCamera;

/// The chart the tools are drawn over. The pane is the whole window.
#[derive(Resource)]
pub struct DemoChart {
    pub scales: LinearScales,
}

impl Default for DemoChart {
    fn default() -> Self {
        // Zero size until the first window sync; conversions fail until then
        Self {
            scales: LinearScales::new(
                (INITIAL_TIME, INITIAL_TIME + INITIAL_SPAN),
                INITIAL_PRICE_RANGE,
                Vec2::ZERO,
            ),
        }
    }
}

/// Pane pixels (origin top-left, y down) to the 2D world of the chart camera.
pub fn pane_to_world(position: Vec2, pane_size: Vec2) -> Vec2 {
    Vec2::new(
        position.x - pane_size.x / 2.0,
        pane_size.y / 2.0 - position.y,
    )
}

/// Wheel delta to a time-range factor. Scrolling up zooms in.
pub fn zoom_factor(unit: MouseScrollUnit, y: f32) -> f64 {
    let amount = match unit {
        MouseScrollUnit::Line => y as f64 * ZOOM_STEP,
        MouseScrollUnit::Pixel => y as f64 * ZOOM_STEP * 0.01,
    };
    (1.0 - amount).clamp(0.5, 2.0)
}

pub fn spawn_chart_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        ChartCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Keep the pane size equal to the window size.
pub fn sync_chart_size(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut chart: ResMut<DemoChart>,
    mut api: ResMut<LineToolsApi>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let size = window.size();
    if chart.scales.size != size {
        debug!("Chart pane resized to {}x{}", size.x, size.y);
        chart.scales.size = size;
        api.on_layout_changed();
    }
}

/// Middle-button drag scrolls both axes.
pub fn pan_chart(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut chart: ResMut<DemoChart>,
    mut api: ResMut<LineToolsApi>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let delta: Vec2 = mouse_motion.read().map(|event| event.delta).sum();
    if delta != Vec2::ZERO {
        chart.scales.pan_pixels(delta);
        api.on_layout_changed();
    }
}

pub fn zoom_chart(
    mut scroll_events: MessageReader<MouseWheel>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut chart: ResMut<DemoChart>,
    mut api: ResMut<LineToolsApi>,
    mut contexts: EguiContexts,
) {
    if is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let anchor_x = window
        .cursor_position()
        .map_or(chart.scales.size.x / 2.0, |p| p.x);

    let mut zoomed = false;
    for event in scroll_events.read() {
        chart.scales.zoom_time(zoom_factor(event.unit, event.y), anchor_x);
        zoomed = true;
    }
    if zoomed {
        api.on_layout_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_to_world_centres_the_pane() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(pane_to_world(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(pane_to_world(Vec2::ZERO, size), Vec2::new(-400.0, 300.0));
        assert_eq!(pane_to_world(size, size), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn test_scroll_up_zooms_in() {
        assert!(zoom_factor(MouseScrollUnit::Line, 1.0) < 1.0);
        assert!(zoom_factor(MouseScrollUnit::Line, -1.0) > 1.0);
        assert!(zoom_factor(MouseScrollUnit::Pixel, 10.0) < 1.0);
        assert_eq!(zoom_factor(MouseScrollUnit::Line, 100.0), 0.5);
    }

    #[test]
    fn test_default_chart_is_unresolved_until_sized() {
        use crate::model::ChartHost;
        let chart = DemoChart::default();
        assert_eq!(chart.scales.time_to_coordinate(INITIAL_TIME), None);
    }
}
