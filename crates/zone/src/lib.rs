//! Hotspot shape model and geometry kernel.
//!
//! This crate provides the flat zone model edited by the `editor` crate:
//! zones are ordered point chains, and their z-order is the index in the
//! containing list.

pub mod coords;
pub mod geometry;
pub mod hit;
mod id;
mod point;
mod zone;

pub use coords::{CanvasDelta, CanvasPoint, CanvasSize};
pub use geometry::{LineRelation, SegmentRelation};
pub use hit::{AnalyticHit, HitContext};
pub use id::{PointId, ZoneId};
pub use point::{Point, HIT_RADIUS};
pub use zone::{Zone, ZoneOption};
