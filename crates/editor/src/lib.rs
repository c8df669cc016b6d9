//! Interactive hotspot editor.
//!
//! Holds the zone list and the pointer/keyboard state machine, and paints
//! frames through a backend-agnostic [`Painter`].

mod config;
mod editor;
mod input;
mod redraw;
mod render;
mod session;
mod svg;

pub use config::EditorConfig;
pub use editor::{Editor, EditorEvent, Focus};
pub use input::{Cursor, InputEvent, Key};
pub use redraw::{redraw_loop, FRAME_INTERVAL};
pub use render::{paint, Painter, Stroke};
pub use session::{Session, Surface};
pub use svg::{SvgPainter, SvgSurface};
// Re-export the shape model for convenience
pub use zone::{CanvasDelta, CanvasPoint, CanvasSize, Point, PointId, Zone, ZoneId, ZoneOption};
