//! Hotspot commands - all operations that modify editor state.
//!
//! Input commands replay pointer and keyboard events through the editor's
//! state machine, exactly as an interactive session would. The remaining
//! commands act on zones and vertices directly.

use crate::Target;
use editor::Key;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use zone::{PointId, ZoneId, ZoneOption};

/// A command that modifies editor state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Input ===
    /// Press the pointer at a canvas position.
    PointerDown { position: Vec2 },

    /// Move the pointer, dragging if it is pressed.
    PointerMove { position: Vec2 },

    /// Release the pointer.
    PointerUp,

    /// Press a key. Only Delete has an effect.
    KeyDown { key: Key },

    /// Double-click at a canvas position.
    DoubleClick { position: Vec2 },

    // === Zones ===
    /// Add a default-size square at the next free grid slot.
    Append,

    /// Delete target zones.
    Delete {
        #[serde(default)]
        target: Target,
    },

    /// Move target zones by a delta, keeping them inside the canvas.
    Move {
        #[serde(default)]
        target: Target,
        delta: Vec2,
    },

    /// Focus a zone.
    Focus { target: Target },

    /// Clear focus.
    ClearFocus,

    /// Replace all zones.
    SetZones { zones: Vec<ZoneOption> },

    // === Vertices ===
    /// Delete a vertex. Defaults to the focused vertex.
    DeletePoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        point: Option<PointId>,
    },

    /// Move a vertex by a delta, clamped to the canvas. Defaults to the
    /// focused vertex.
    MovePoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        point: Option<PointId>,
        delta: Vec2,
    },

    /// Insert a vertex after the vertex at index `after`.
    InsertPoint {
        #[serde(default)]
        target: Target,
        after: usize,
        position: Vec2,
    },

    // === Batch ===
    /// Execute multiple commands in sequence. If one fails, none of them
    /// take effect.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
///
/// Zones whose points changed are reported as modified. Reordering alone
/// is not a modification; the editor reports it as
/// [`EditorEvent::ZoneRaised`](editor::EditorEvent::ZoneRaised).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of zones created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<ZoneId>,
        /// IDs of zones modified, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<ZoneId>,
        /// IDs of zones deleted, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<ZoneId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pointer_down_serializes_with_type_field() {
        let cmd = Command::PointerDown {
            position: Vec2::new(100.0, 200.0),
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "pointer_down");
        // Vec2 serializes as [x, y] array
        assert_eq!(json["position"], json!([100.0, 200.0]));
    }

    #[test]
    fn key_down_accepts_key_names() {
        let cmd: Command = serde_json::from_value(json!({"type": "key_down", "key": "Del"})).unwrap();
        assert_eq!(cmd, Command::KeyDown { key: Key::Delete });
    }

    #[test]
    fn move_command_defaults_to_focused_target() {
        let cmd: Command =
            serde_json::from_value(json!({"type": "move", "delta": [10, 20]})).unwrap();
        assert_eq!(
            cmd,
            Command::Move {
                target: Target::Focused,
                delta: Vec2::new(10.0, 20.0),
            }
        );
    }

    #[test]
    fn delete_point_omits_default_point() {
        let json = serde_json::to_value(Command::DeletePoint { point: None }).unwrap();
        assert_eq!(json, json!({"type": "delete_point"}));
    }

    #[test]
    fn set_zones_takes_option_arrays() {
        let cmd: Command = serde_json::from_value(json!({
            "type": "set_zones",
            "zones": [[[10, 10], [20, 10], [20, 20]]]
        }))
        .unwrap();
        let Command::SetZones { zones } = cmd else {
            panic!("expected set_zones");
        };
        assert_eq!(zones, vec![vec![[10.0, 10.0], [20.0, 10.0], [20.0, 20.0]]]);
    }

    #[test]
    fn batch_command_contains_nested_commands() {
        let cmd = Command::Batch {
            commands: vec![Command::Append, Command::PointerUp],
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "batch");
        assert_eq!(json["commands"][0]["type"], "append");
        assert_eq!(json["commands"][1]["type"], "pointer_up");
    }

    #[test]
    fn success_omits_empty_lists() {
        let json = serde_json::to_value(CommandResult::success()).unwrap();
        assert_eq!(json, json!({"status": "success"}));

        let json = serde_json::to_value(CommandResult::error("nope")).unwrap();
        assert_eq!(json, json!({"status": "error", "message": "nope"}));
    }
}
