//! Input and cursor vocabulary shared with adapters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use zone::CanvasPoint;

/// Keys the editor distinguishes. Anything but Delete is ignored.
#[derive(Clone, Debug, PartialEq, Eq, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(from = "String", into = "String")]
pub enum Key {
    #[strum(serialize = "delete", serialize = "del")]
    Delete,
    #[strum(default)]
    Other(String),
}

impl Key {
    pub fn name(&self) -> &str {
        match self {
            Key::Delete => "delete",
            Key::Other(name) => name,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match Key::from_str(&name) {
            Ok(key) => key,
            Err(_) => Key::Other(name),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name().to_string()
    }
}

/// Cursor the adapter should show over the canvas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Move,
}

/// Pointer and keyboard events, in canvas-local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { position: CanvasPoint },
    PointerMove { position: CanvasPoint },
    PointerUp,
    KeyDown { key: Key },
    DoubleClick { position: CanvasPoint },
}
