//! Transient editor view state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selection, hover and current-page pointers. None of these own anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub selected_component_id: Option<String>,
    pub hovered_component_id: Option<String>,
    pub current_page_id: Option<String>,
}

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    /// A new component dragged out of the palette.
    Component,
    /// An existing component being moved.
    Move,
}

/// Drag lifecycle: idle, or dragging with a payload shaped by the drag kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { kind: DragKind, data: Value },
}

impl DragState {
    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Kind of the active drag.
    pub fn kind(&self) -> Option<DragKind> {
        match self {
            Self::Dragging { kind, .. } => Some(*kind),
            Self::Idle => None,
        }
    }

    /// Payload of the active drag.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Dragging { data, .. } => Some(data),
            Self::Idle => None,
        }
    }
}
