//! Target specification for commands.
//!
//! Commands that act on zones say which ones: the focused zone, a specific
//! id, a position in the list, or everything.

use serde::{Deserialize, Serialize};
use zone::ZoneId;

/// Specifies which zones a command targets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The focused zone (most common for user actions).
    #[default]
    Focused,

    /// Specific zone by ID.
    Zone(ZoneId),

    /// Zone at a list index. 0 is topmost.
    Index(usize),

    /// All zones.
    All,
}

impl From<ZoneId> for Target {
    fn from(id: ZoneId) -> Self {
        Self::Zone(id)
    }
}
