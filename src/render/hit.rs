//! Hit test results returned by the renderers.

use crate::common::CursorHint;

/// What part of a tool the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestType {
    /// Stroke or outline
    Regular,
    /// Filled interior
    MovePoint,
    /// Interior of a filled shape that also allows moving
    MovePointBackground,
    /// An anchor handle; carries the edited point index
    ChangePoint,
    /// Text box
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestResult {
    pub kind: HitTestType,
    pub cursor: CursorHint,
    /// Set only for anchor hits
    pub point_index: Option<usize>,
}

impl HitTestResult {
    pub fn new(kind: HitTestType) -> Self {
        let cursor = match kind {
            HitTestType::ChangePoint => CursorHint::Pointer,
            _ => CursorHint::Move,
        };
        Self {
            kind,
            cursor,
            point_index: None,
        }
    }

    pub fn anchor(point_index: usize, cursor: CursorHint) -> Self {
        Self {
            kind: HitTestType::ChangePoint,
            cursor,
            point_index: Some(point_index),
        }
    }

    pub fn with_cursor(mut self, cursor: CursorHint) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn is_anchor(&self) -> bool {
        self.kind == HitTestType::ChangePoint
    }
}
