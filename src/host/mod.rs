//! Bevy integration: runs the line tool engine over a demo chart in the
//! primary window.

mod chart;
mod events;
mod input;
mod persistence;
mod surface;
mod toolbar;

pub use chart::DemoChart;
pub use events::{LineToolAfterEdit, LineToolDoubleClicked, LineToolSelectionChanged};
pub use persistence::{LoadDrawingsRequest, SaveDrawingsRequest};
pub use surface::{ChartGizmoGroup, GizmoSurface};

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

use crate::api::LineToolsApi;
use crate::config::{ConfigLoaded, EngineConfig};

/// True while egui has the pointer (toolbar, dialogs)
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Push config values the engine reads into the facade.
fn apply_engine_config(config: Res<EngineConfig>, mut api: ResMut<LineToolsApi>) {
    api.set_settings(config.data.view_settings());
    api.set_crosshair_color(config.data.crosshair_color());
    debug!("Applied engine config");
}

pub struct LineToolsPlugin;

impl Plugin for LineToolsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LineToolsApi::default())
            .init_resource::<DemoChart>()
            .init_resource::<input::PointerState>()
            .init_resource::<events::EngineEventQueue>()
            .init_resource::<persistence::DrawingsError>()
            .init_resource::<surface::ChartOverlay>()
            .init_gizmo_group::<ChartGizmoGroup>()
            .add_message::<LineToolAfterEdit>()
            .add_message::<LineToolDoubleClicked>()
            .add_message::<LineToolSelectionChanged>()
            .add_message::<SaveDrawingsRequest>()
            .add_message::<LoadDrawingsRequest>()
            .add_systems(
                Startup,
                (
                    chart::spawn_chart_camera,
                    surface::configure_chart_gizmos,
                    (
                        events::subscribe_engine_events,
                        persistence::request_initial_load,
                    )
                        .after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    apply_engine_config.run_if(resource_changed::<EngineConfig>),
                    chart::sync_chart_size,
                    chart::pan_chart,
                    chart::zoom_chart,
                    toolbar::handle_shortcuts,
                    input::route_pointer_input,
                    events::forward_engine_events,
                    persistence::autosave_system,
                    (
                        persistence::save_drawings_system
                            .run_if(on_message::<SaveDrawingsRequest>),
                        persistence::load_drawings_system
                            .run_if(on_message::<LoadDrawingsRequest>),
                    ),
                    surface::draw_line_tools,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    surface::paint_chart_overlay,
                    toolbar::price_labels_ui,
                    toolbar::config_reset_notification_ui,
                    toolbar::drawings_error_ui,
                )
                    .chain(),
            );
    }
}
