//! A single drawing tool: its points, options and interaction flags.

use bevy::math::Vec2;
use serde_json::Value;

use super::pane_view::{PaneView, ViewInput, ViewSettings};
use super::shape::{CreationMode, PointsCount, ToolShape};
use crate::model::{AnchorPoint, CoordinateAdapter, LogicalPoint};
use crate::options::views::BaseView;
use crate::options::{base_defaults, merge_config, merged_with_defaults};
use crate::render::{HitTestResult, RenderSurface};
use crate::serialization::LineToolExport;

pub struct LineTool {
    id: String,
    tool_type: String,
    shape: Box<dyn ToolShape>,
    points: Vec<LogicalPoint>,
    options: Value,
    finished: bool,
    selected: bool,
    hovered: bool,
    editing: bool,
    edited_point_index: Option<usize>,
    current_point: Option<LogicalPoint>,
    view: PaneView,
}

impl std::fmt::Debug for LineTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineTool")
            .field("id", &self.id)
            .field("tool_type", &self.tool_type)
            .field("points", &self.points)
            .field("finished", &self.finished)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

/// Full option tree of a fresh tool: base keys, then shape defaults.
pub fn default_options_for(shape: &dyn ToolShape) -> Value {
    let mut defaults = base_defaults();
    merge_config(&mut defaults, &[&shape.default_options()]);
    defaults
}

impl LineTool {
    /// Build a tool. An empty point list starts interactive placement; a
    /// complete list produces a finished tool.
    pub fn new(
        id: impl Into<String>,
        tool_type: impl Into<String>,
        shape: Box<dyn ToolShape>,
        points: Vec<LogicalPoint>,
        options: Option<&Value>,
    ) -> Self {
        let options = merged_with_defaults(&default_options_for(shape.as_ref()), options);
        let mut tool = Self {
            id: id.into(),
            tool_type: tool_type.into(),
            shape,
            points: Vec::new(),
            options,
            finished: false,
            selected: false,
            hovered: false,
            editing: false,
            edited_point_index: None,
            current_point: None,
            view: PaneView::new(),
        };
        tool.set_points(points);
        tool
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tool_type(&self) -> &str {
        &self.tool_type
    }

    pub fn shape(&self) -> &dyn ToolShape {
        self.shape.as_ref()
    }

    pub fn points(&self) -> &[LogicalPoint] {
        &self.points
    }

    pub fn options(&self) -> &Value {
        &self.options
    }

    pub fn points_count(&self) -> PointsCount {
        self.shape.points_count()
    }

    pub fn creation_mode(&self) -> CreationMode {
        self.shape.creation_mode()
    }

    pub fn supports_click_click_creation(&self) -> bool {
        self.creation_mode() == CreationMode::ClickClick
    }

    pub fn supports_click_drag_creation(&self) -> bool {
        self.creation_mode() == CreationMode::ClickDrag
    }

    pub fn is_visible(&self) -> bool {
        BaseView::read(&self.options).visible
    }

    pub fn is_editable(&self) -> bool {
        BaseView::read(&self.options).editable
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn edited_point_index(&self) -> Option<usize> {
        self.edited_point_index
    }

    pub fn current_point(&self) -> Option<LogicalPoint> {
        self.current_point
    }

    /// Projected points of the last rebuilt frame
    pub fn screen_points(&self) -> &[AnchorPoint] {
        self.view.anchors()
    }

    /// Replace every point. Fixed-count tools keep at most their count.
    pub fn set_points(&mut self, mut points: Vec<LogicalPoint>) {
        if let PointsCount::Fixed(n) = self.points_count() {
            points.truncate(n);
        }
        self.finished = !points.is_empty() && self.points_count().is_complete(points.len());
        self.points = points;
        if self.finished {
            self.current_point = None;
        }
        self.view.invalidate();
    }

    /// Add a point while placing the tool. Returns `true` when it completes a
    /// fixed-count tool.
    pub fn add_point(&mut self, point: LogicalPoint) -> bool {
        if self.finished || !self.points_count().accepts_more(self.points.len()) {
            return false;
        }
        self.points.push(point);
        self.view.invalidate();
        if let PointsCount::Fixed(n) = self.points_count()
            && self.points.len() >= n
        {
            self.finish();
            return true;
        }
        false
    }

    /// Drop the last placed point
    pub fn pop_point(&mut self) -> Option<LogicalPoint> {
        let point = self.points.pop();
        self.view.invalidate();
        point
    }

    /// End placement; the point count is fixed from here on.
    pub fn finish(&mut self) {
        debug_assert!(!self.points.is_empty(), "finishing a tool without points");
        self.finished = true;
        self.current_point = None;
        self.view.invalidate();
    }

    /// Move one point through the shape's editing rules.
    pub fn move_point(&mut self, index: usize, to: LogicalPoint) {
        self.shape.move_point(&mut self.points, index, to);
        self.view.invalidate();
    }

    /// Shift every point of `origin` by a logical delta and store the result.
    pub fn translate_from(&mut self, origin: &[LogicalPoint], d_time: f64, d_price: f64) {
        debug_assert_eq!(origin.len(), self.points.len());
        self.points = origin.iter().map(|p| p.offset(d_time, d_price)).collect();
        self.view.invalidate();
    }

    /// Deep-merge a partial option tree into the current options.
    pub fn apply_options(&mut self, partial: &Value) {
        merge_config(&mut self.options, &[partial]);
        self.view.invalidate();
    }

    /// Returns `true` when the flag changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        if changed {
            self.view.invalidate();
        }
        changed
    }

    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        if changed {
            self.view.invalidate();
        }
        changed
    }

    pub fn set_editing(&mut self, editing: bool) {
        if self.editing != editing {
            self.editing = editing;
            self.view.invalidate();
        }
    }

    pub fn set_edited_point_index(&mut self, index: Option<usize>) {
        if self.edited_point_index != index {
            self.edited_point_index = index;
            self.view.invalidate();
        }
    }

    pub fn set_current_point(&mut self, point: Option<LogicalPoint>) {
        if self.finished || self.current_point == point {
            return;
        }
        self.current_point = point;
        self.view.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.view.invalidate();
    }

    /// Anchors show while the tool is being touched or placed, if editable
    pub fn shows_anchors(&self) -> bool {
        self.is_editable() && (self.hovered || self.selected || self.editing || !self.finished)
    }

    /// Rebuild the pane view if it was invalidated.
    pub fn update_view(&mut self, adapter: CoordinateAdapter, settings: &ViewSettings) -> bool {
        let base = BaseView::read(&self.options);
        let input = ViewInput {
            shape: self.shape.as_ref(),
            points: &self.points,
            current_point: self.current_point,
            options: &self.options,
            visible: base.visible,
            finished: self.finished,
            show_anchors: self.shows_anchors(),
            active_index: self.edited_point_index,
        };
        self.view.update(adapter, &input, settings)
    }

    pub fn draw(
        &mut self,
        adapter: CoordinateAdapter,
        settings: &ViewSettings,
        surface: &mut dyn RenderSurface,
    ) {
        if self.update_view(adapter, settings) {
            self.view.draw(surface);
        }
    }

    pub fn hit_test(
        &mut self,
        adapter: CoordinateAdapter,
        settings: &ViewSettings,
        point: Vec2,
    ) -> Option<HitTestResult> {
        if !self.update_view(adapter, settings) {
            return None;
        }
        self.view.hit_test(point)
    }

    pub fn export(&self) -> LineToolExport {
        LineToolExport {
            id: self.id.clone(),
            tool_type: self.tool_type.clone(),
            points: self.points.clone(),
            options: self.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::LinearScales;
    use crate::tools::shapes::{BuiltinToolType, Path, Rectangle, TrendLine};

    fn scales() -> LinearScales {
        LinearScales::new((0.0, 1000.0), (0.0, 100.0), Vec2::new(1000.0, 500.0))
    }

    fn trend(points: Vec<LogicalPoint>) -> LineTool {
        LineTool::new("t", "TrendLine", Box::new(TrendLine), points, None)
    }

    #[test]
    fn test_options_carry_base_and_shape_defaults() {
        let tool = LineTool::new(
            "t",
            "TrendLine",
            Box::new(TrendLine),
            Vec::new(),
            Some(&json!({ "line": { "width": 3 }, "custom": "kept" })),
        );
        assert_eq!(tool.options()["visible"], json!(true));
        assert_eq!(tool.options()["editable"], json!(true));
        assert_eq!(tool.options()["line"]["width"], json!(3));
        assert_eq!(tool.options()["line"]["color"], json!("#2962ff"));
        assert_eq!(tool.options()["custom"], json!("kept"));
    }

    #[test]
    fn test_complete_point_list_is_finished_and_truncated() {
        let tool = trend(vec![
            LogicalPoint::new(1.0, 1.0),
            LogicalPoint::new(2.0, 2.0),
            LogicalPoint::new(3.0, 3.0),
        ]);
        assert!(tool.is_finished());
        assert_eq!(tool.points().len(), 2);
    }

    #[test]
    fn test_add_point_until_complete() {
        let mut tool = LineTool::new("r", "Rectangle", Box::new(Rectangle), Vec::new(), None);
        assert!(!tool.is_finished());
        assert!(!tool.add_point(LogicalPoint::new(1.0, 1.0)));
        assert!(!tool.is_finished());
        assert!(tool.add_point(LogicalPoint::new(2.0, 2.0)));
        assert!(tool.is_finished());
        // Finished tools never grow
        assert!(!tool.add_point(LogicalPoint::new(3.0, 3.0)));
        assert_eq!(tool.points().len(), 2);
    }

    #[test]
    fn test_unbounded_tool_finishes_explicitly() {
        let mut tool = LineTool::new("p", "Path", Box::new(Path), Vec::new(), None);
        for i in 0..5 {
            assert!(!tool.add_point(LogicalPoint::new(i as f64, 1.0)));
        }
        assert!(!tool.is_finished());
        tool.finish();
        assert!(tool.is_finished());
    }

    #[test]
    fn test_anchor_visibility_rules() {
        let mut tool = trend(vec![LogicalPoint::new(1.0, 1.0), LogicalPoint::new(2.0, 2.0)]);
        assert!(!tool.shows_anchors());
        tool.set_hovered(true);
        assert!(tool.shows_anchors());
        tool.apply_options(&json!({ "editable": false }));
        assert!(!tool.shows_anchors());
    }

    #[test]
    fn test_translate_moves_every_point() {
        let origin = vec![LogicalPoint::new(100.0, 10.0), LogicalPoint::new(200.0, 20.0)];
        let mut tool = trend(origin.clone());
        tool.translate_from(&origin, 50.0, -5.0);
        assert_eq!(tool.points()[0], LogicalPoint::new(150.0, 5.0));
        assert_eq!(tool.points()[1], LogicalPoint::new(250.0, 15.0));
    }

    #[test]
    fn test_hit_test_follows_points() {
        let scales = scales();
        let adapter = CoordinateAdapter::new(&scales);
        let settings = ViewSettings::default();
        let mut tool = trend(vec![LogicalPoint::new(100.0, 50.0), LogicalPoint::new(300.0, 50.0)]);
        assert!(tool.hit_test(adapter, &settings, Vec2::new(200.0, 250.0)).is_some());
        tool.move_point(1, LogicalPoint::new(300.0, 90.0));
        assert!(tool.hit_test(adapter, &settings, Vec2::new(200.0, 250.0)).is_none());
    }

    #[test]
    fn test_export_mirrors_state() {
        let shape = BuiltinToolType::HorizontalLine.create();
        let tool = LineTool::new(
            "h",
            "HorizontalLine",
            shape,
            vec![LogicalPoint::new(1_700_000_000.0, 100.0)],
            None,
        );
        let export = tool.export();
        assert_eq!(export.id, "h");
        assert_eq!(export.tool_type, "HorizontalLine");
        assert_eq!(export.points, vec![LogicalPoint::new(1_700_000_000.0, 100.0)]);
        assert_eq!(&export.options, tool.options());
    }
}
