//! Executes engine draw instructions in the Bevy app.
//!
//! Strokes go to a gizmo group in world space. Gizmos cannot fill shapes or
//! lay out text, so fills and text runs are recorded into [`ChartOverlay`] and
//! painted by egui later in the frame.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::chart::{DemoChart, pane_to_world};
use crate::api::LineToolsApi;
use crate::geometry::canvas::dash_segments;
use crate::render::{DrawCommand, DrawCommandList, LineStyle, RenderSurface, StrokeStyle, TextRun};

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ChartGizmoGroup;

pub fn configure_chart_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<ChartGizmoGroup>();
    config.line.width = 1.5;
}

/// Fill and text instructions of the current frame, in pane pixels.
#[derive(Resource, Default)]
pub struct ChartOverlay {
    pub commands: DrawCommandList,
}

pub struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's, ChartGizmoGroup>,
    overlay: &'a mut DrawCommandList,
    pane_size: Vec2,
}

impl<'a, 'w, 's> GizmoSurface<'a, 'w, 's> {
    pub fn new(
        gizmos: &'a mut Gizmos<'w, 's, ChartGizmoGroup>,
        overlay: &'a mut DrawCommandList,
        pane_size: Vec2,
    ) -> Self {
        Self {
            gizmos,
            overlay,
            pane_size,
        }
    }

    fn world(&self, position: Vec2) -> Vec2 {
        pane_to_world(position, self.pane_size)
    }
}

impl RenderSurface for GizmoSurface<'_, '_, '_> {
    fn clip_rect(&self) -> Option<Rect> {
        Some(Rect::from_corners(Vec2::ZERO, self.pane_size))
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, stroke: &StrokeStyle) {
        // Renderers split dashes themselves; this covers direct callers
        if stroke.style != LineStyle::Solid {
            let mut path = points.to_vec();
            if closed && let Some(first) = points.first().copied() {
                path.push(first);
            }
            let pattern = stroke.style.dash_pattern(stroke.width);
            for (start, end) in dash_segments(&path, &pattern, self.clip_rect()) {
                let (start, end) = (self.world(start), self.world(end));
                self.gizmos.line_2d(start, end, stroke.color);
            }
            return;
        }

        let mut path: Vec<Vec2> = points.iter().map(|p| self.world(*p)).collect();
        if closed && let Some(first) = path.first().copied() {
            path.push(first);
        }
        self.gizmos.linestrip_2d(path, stroke.color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.overlay.fill_polygon(points, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &StrokeStyle) {
        let center = self.world(center);
        self.gizmos
            .circle_2d(Isometry2d::from_translation(center), radius, stroke.color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.overlay.fill_circle(center, radius, color);
    }

    fn fill_text(&mut self, run: &TextRun) {
        self.overlay.fill_text(run);
    }
}

/// Draw every tool through the gizmo surface.
pub fn draw_line_tools(
    mut gizmos: Gizmos<ChartGizmoGroup>,
    mut api: ResMut<LineToolsApi>,
    chart: Res<DemoChart>,
    mut overlay: ResMut<ChartOverlay>,
) {
    overlay.commands.clear();
    let mut surface = GizmoSurface::new(&mut gizmos, &mut overlay.commands, chart.scales.size);
    api.render(&chart.scales, &mut surface);
}

pub fn to_color32(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}

fn pos(position: Vec2) -> egui::Pos2 {
    egui::pos2(position.x, position.y)
}

/// Paint the recorded fills and text behind every egui window.
pub fn paint_chart_overlay(mut contexts: EguiContexts, overlay: Res<ChartOverlay>) -> Result {
    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("chart_overlay"),
    ));

    for command in &overlay.commands.commands {
        match command {
            DrawCommand::FillPolygon { points, color } => {
                painter.add(egui::Shape::convex_polygon(
                    points.iter().map(|p| pos(*p)).collect(),
                    to_color32(*color),
                    egui::Stroke::NONE,
                ));
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(pos(*center), *radius, to_color32(*color));
            }
            DrawCommand::Text(run) => {
                // egui text is axis-aligned; only the anchor follows the rotation
                let anchor =
                    Vec2::from_angle(run.angle).rotate(run.position - run.pivot) + run.pivot;
                let font = egui::FontId::proportional(run.font.size);
                painter.text(
                    pos(anchor),
                    egui::Align2::LEFT_TOP,
                    &run.text,
                    font,
                    to_color32(run.color),
                );
            }
            DrawCommand::Polyline { .. } | DrawCommand::StrokeCircle { .. } => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_keeps_alpha() {
        let color = to_color32(Color::srgba(1.0, 0.0, 0.0, 0.5));
        assert_eq!(color, egui::Color32::from_rgba_unmultiplied(255, 0, 0, 127));
    }
}
