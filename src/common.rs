//! Common types shared across multiple modules.
//!
//! The cursor hint is produced by the renderers' hit tests (engine side) and
//! consumed by the Bevy host to pick a window cursor.

use bevy::window::{CursorIcon, SystemCursorIcon};
use serde::{Deserialize, Serialize};

/// Cursor the host should show while the pointer rests over a hit.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
    Move,
    Grabbing,
    Crosshair,
    Text,
    NotAllowed,
    ResizeEw,
    ResizeNs,
    ResizeNwse,
    ResizeNesw,
}

impl CursorHint {
    /// Get the appropriate cursor icon for this hint.
    pub fn cursor_icon(&self) -> CursorIcon {
        let icon = match self {
            CursorHint::Default => SystemCursorIcon::Default,
            CursorHint::Pointer => SystemCursorIcon::Pointer,
            CursorHint::Move => SystemCursorIcon::Move,
            CursorHint::Grabbing => SystemCursorIcon::Grabbing,
            CursorHint::Crosshair => SystemCursorIcon::Crosshair,
            CursorHint::Text => SystemCursorIcon::Text,
            CursorHint::NotAllowed => SystemCursorIcon::NotAllowed,
            CursorHint::ResizeEw => SystemCursorIcon::EwResize,
            CursorHint::ResizeNs => SystemCursorIcon::NsResize,
            CursorHint::ResizeNwse => SystemCursorIcon::NwseResize,
            CursorHint::ResizeNesw => SystemCursorIcon::NeswResize,
        };
        CursorIcon::System(icon)
    }

    /// Check if this is a resize cursor.
    pub fn is_resize(&self) -> bool {
        matches!(
            self,
            CursorHint::ResizeEw
                | CursorHint::ResizeNs
                | CursorHint::ResizeNwse
                | CursorHint::ResizeNesw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_hint_default() {
        assert_eq!(CursorHint::default(), CursorHint::Default);
    }

    #[test]
    fn test_cursor_icon_move() {
        assert!(matches!(
            CursorHint::Move.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Move)
        ));
    }

    #[test]
    fn test_is_resize() {
        assert!(!CursorHint::Default.is_resize());
        assert!(!CursorHint::Move.is_resize());
        assert!(CursorHint::ResizeNs.is_resize());
        assert!(CursorHint::ResizeNwse.is_resize());
    }
}
