use serde::{Deserialize, Serialize};
use zone::{CanvasSize, HIT_RADIUS};

/// Editor settings. Every field may be omitted from a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// Vertex hit radius.
    pub hit_radius: f32,
    /// Stroke width used when double-clicking an edge. The pointer must be
    /// within half of it.
    pub edge_tolerance: f32,
    /// Side of the square created by `append`.
    pub zone_size: f32,
    /// Grid spacing, used for painting and for `append` placement.
    pub grid_step: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            hit_radius: HIT_RADIUS,
            edge_tolerance: 5.0,
            zone_size: 100.0,
            grid_step: 10.0,
        }
    }
}

impl EditorConfig {
    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
