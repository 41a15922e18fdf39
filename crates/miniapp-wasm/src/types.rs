//! JS-facing shapes for values that have no direct serde form.

use miniapp_store::{DragKind, DragState};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Drag state as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStateJs {
    pub is_dragging: bool,
    pub drag_type: Option<DragKind>,
    pub drag_data: Value,
}

impl From<&DragState> for DragStateJs {
    fn from(state: &DragState) -> Self {
        Self {
            is_dragging: state.is_dragging(),
            drag_type: state.kind(),
            drag_data: state.data().cloned().unwrap_or(Value::Null),
        }
    }
}

/// Parse a drag type name (`component` or `move`).
pub fn parse_drag_kind(name: &str) -> Option<DragKind> {
    match name {
        "component" => Some(DragKind::Component),
        "move" => Some(DragKind::Move),
        _ => None,
    }
}
