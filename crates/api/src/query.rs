//! Hotspot queries - read-only access to editor state.

use crate::Target;
use editor::{Cursor, Focus};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use zone::{PointId, ZoneId, ZoneOption};

/// A query for editor state (read-only).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get all zones with ids.
    GetZones,

    /// Get a single zone.
    GetZone { target: Target },

    /// Get all zones in the plain export format.
    GetOptions,

    /// Get the focused zone and vertex.
    GetFocus,

    /// Get zone count.
    GetZoneCount,

    /// Get validity flags for every zone.
    GetDiagnostics,

    /// Get the cursor the adapter should show.
    GetCursor,

    /// Get the canvas size.
    GetCanvas,

    /// What a pointer at `position` would hit.
    HitTest { position: Vec2 },
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Zones { zones: Vec<ZoneInfo> },

    Zone { zone: Option<ZoneInfo> },

    Options { zones: Vec<ZoneOption> },

    Focus { focus: Option<Focus> },

    Count { count: usize },

    Diagnostics { zones: Vec<ZoneDiagnostics> },

    Cursor { cursor: Cursor },

    Canvas { width: f32, height: f32 },

    Hit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zone: Option<ZoneId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        point: Option<PointId>,
        /// Index of the first endpoint of the edge under the pointer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        edge: Option<usize>,
    },

    /// Error result.
    Error { message: String },
}

/// Serializable zone information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub id: ZoneId,
    /// Position in the list. 0 is topmost.
    pub index: usize,
    pub closed: bool,
    pub points: Vec<PointInfo>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointInfo {
    pub id: PointId,
    pub position: Vec2,
}

/// Validity flags for one zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneDiagnostics {
    pub id: ZoneId,
    pub index: usize,
    pub distorted: bool,
    pub out_of_bounds: bool,
}

impl ZoneDiagnostics {
    pub fn has_error(&self) -> bool {
        self.distorted || self.out_of_bounds
    }
}
