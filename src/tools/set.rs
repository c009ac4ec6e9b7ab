//! Ordered tool collection. Insertion order is z-order (last is on top).

use bevy::math::Vec2;

use super::line_tool::LineTool;
use super::pane_view::ViewSettings;
use crate::model::CoordinateAdapter;
use crate::render::HitTestResult;

#[derive(Debug, Default)]
pub struct ToolSet {
    tools: Vec<LineTool>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &LineTool> {
        self.tools.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LineTool> {
        self.tools.iter_mut()
    }

    pub fn get(&self, id: &str) -> Option<&LineTool> {
        self.tools.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut LineTool> {
        self.tools.iter_mut().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a tool on top of the others.
    pub fn push(&mut self, tool: LineTool) {
        debug_assert!(!self.contains(tool.id()), "duplicate tool id {}", tool.id());
        self.tools.push(tool);
    }

    pub fn remove(&mut self, id: &str) -> Option<LineTool> {
        let index = self.tools.iter().position(|t| t.id() == id)?;
        Some(self.tools.remove(index))
    }

    /// Remove every tool matching `predicate`; returns the removed ids.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&LineTool) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.tools.retain(|tool| {
            if predicate(tool) {
                removed.push(tool.id().to_string());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn clear(&mut self) {
        self.tools.clear();
    }

    pub fn invalidate_all(&mut self) {
        for tool in &mut self.tools {
            tool.invalidate();
        }
    }

    /// Topmost tool under `point`, with what was hit.
    pub fn top_hit(
        &mut self,
        adapter: CoordinateAdapter,
        settings: &ViewSettings,
        point: Vec2,
    ) -> Option<(String, HitTestResult)> {
        self.tools.iter_mut().rev().find_map(|tool| {
            tool.hit_test(adapter, settings, point)
                .map(|hit| (tool.id().to_string(), hit))
        })
    }
}
