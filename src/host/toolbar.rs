use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::chart::DemoChart;
use super::persistence::{DrawingsError, LoadDrawingsRequest, SaveDrawingsRequest};
use super::surface::to_color32;
use crate::api::LineToolsApi;
use crate::config::{ConfigResetNotification, EngineConfig, SaveConfigRequest, SetAutosaveRequest};
use crate::constants::{FALLBACK_GLYPH_WIDTH_FACTOR, PRICE_LABEL_HEIGHT};
use crate::tools::BuiltinToolType;

const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_PADDING: f32 = 4.0;

/// Type of the tool being placed, if it is a built-in one
fn placing(api: &LineToolsApi) -> Option<BuiltinToolType> {
    let id = api.creating()?;
    let tool = api.tools().get(id)?;
    BuiltinToolType::from_name(tool.tool_type())
}

/// Main toolbar: tool picker and drawing actions
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut api: ResMut<LineToolsApi>,
    config: Res<EngineConfig>,
    mut save_events: MessageWriter<SaveDrawingsRequest>,
    mut load_events: MessageWriter<LoadDrawingsRequest>,
    mut autosave_events: MessageWriter<SetAutosaveRequest>,
) -> Result {
    let active = placing(&api);
    let selected = api.tools().iter().filter(|t| t.is_selected()).count();

    egui::TopBottomPanel::top("line_tools_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for tool_type in BuiltinToolType::all() {
                    let button = egui::Button::new(tool_type.display_name())
                        .min_size(egui::vec2(0.0, 24.0))
                        .selected(active == Some(*tool_type));
                    if ui.add(button).clicked() {
                        api.add_line_tool(tool_type.name(), Vec::new(), None);
                    }
                }

                ui.separator();

                let mut changed = false;
                if ui
                    .add_enabled(selected > 0, egui::Button::new("Delete"))
                    .on_hover_text("Delete the selected drawing (Del)")
                    .clicked()
                {
                    api.remove_selected_line_tools();
                    changed = true;
                }
                if ui.button("Clear").clicked() {
                    api.remove_all_line_tools();
                    changed = true;
                }
                if changed && config.data.autosave {
                    save_events.write(SaveDrawingsRequest);
                }

                ui.separator();

                if ui.button("Save").clicked() {
                    save_events.write(SaveDrawingsRequest);
                }
                if ui.button("Load").clicked() {
                    load_events.write(LoadDrawingsRequest);
                }
                let mut autosave = config.data.autosave;
                if ui.checkbox(&mut autosave, "Autosave").changed() {
                    autosave_events.write(SetAutosaveRequest { enabled: autosave });
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} drawing(s)", api.tools().len()));
                });
            });
        });
    Ok(())
}

/// Escape cancels placement, Delete removes the selection.
pub fn handle_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut api: ResMut<LineToolsApi>,
    config: Res<EngineConfig>,
    mut contexts: EguiContexts,
    mut save_events: MessageWriter<SaveDrawingsRequest>,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keys.just_pressed(KeyCode::Escape)
        && let Some(id) = api.creating().map(str::to_string)
    {
        debug!("Cancelled placement of {}", id);
        api.remove_line_tools_by_id(&[id]);
    }

    if keys.just_pressed(KeyCode::Delete) || keys.just_pressed(KeyCode::Backspace) {
        let before = api.tools().len();
        api.remove_selected_line_tools();
        if api.tools().len() != before && config.data.autosave {
            save_events.write(SaveDrawingsRequest);
        }
    }
}

/// Price labels of hovered and selected tools along the right edge.
pub fn price_labels_ui(
    mut contexts: EguiContexts,
    api: Res<LineToolsApi>,
    chart: Res<DemoChart>,
) -> Result {
    let labels = api.price_axis_labels(&chart.scales);
    if labels.is_empty() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("price_axis_labels"),
    ));
    let right = chart.scales.size.x;

    for label in labels {
        let glyphs = label.text.chars().count() as f32;
        let width = glyphs * LABEL_FONT_SIZE * FALLBACK_GLYPH_WIDTH_FACTOR + 2.0 * LABEL_PADDING;
        let rect = egui::Rect::from_min_max(
            egui::pos2(right - width, label.y - PRICE_LABEL_HEIGHT / 2.0),
            egui::pos2(right, label.y + PRICE_LABEL_HEIGHT / 2.0),
        );
        painter.rect_filled(rect, 2.0, to_color32(label.background));
        painter.text(
            egui::pos2(right - LABEL_PADDING, label.y),
            egui::Align2::RIGHT_CENTER,
            &label.text,
            egui::FontId::monospace(LABEL_FONT_SIZE),
            to_color32(label.text_color),
        );
    }
    Ok(())
}

/// Tell the user their config file was replaced by defaults
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
    mut config: ResMut<EngineConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            if let Some(reason) = &notification.reason {
                ui.colored_label(egui::Color32::from_rgb(230, 160, 60), reason);
            }
            ui.label(format!(
                "Default settings are in use. Saving writes them to {}.",
                config.config_path.display()
            ));
            ui.horizontal(|ui| {
                if ui.button("Save Defaults").clicked() {
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                    notification.show = false;
                }
                if ui.button("Dismiss").clicked() {
                    notification.show = false;
                }
            });
        });
    Ok(())
}

pub fn drawings_error_ui(mut contexts: EguiContexts, mut error: ResMut<DrawingsError>) -> Result {
    let Some(message) = error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Drawings")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.colored_label(egui::Color32::RED, message);
            if ui.button("OK").clicked() {
                error.message = None;
            }
        });
    Ok(())
}
