//! Pluggable hit testing.
//!
//! The editor never asks a rendering backend directly whether a pointer is
//! over something. It goes through a [`HitContext`], so a backend that already
//! scan-converts paths (and wants hit testing to agree pixel-for-pixel with
//! what it draws) can provide its own, while headless use gets the analytic
//! one.

use crate::geometry;
use glam::Vec2;

/// Answers containment questions about paths the editor would draw.
pub trait HitContext {
    /// Whether `point` lies inside the filled, implicitly closed `path`.
    fn fill_contains(&self, path: &[Vec2], point: Vec2) -> bool;

    /// Whether `point` lies inside a stroke of `width` from `from` to `to`.
    fn stroke_contains(&self, from: Vec2, to: Vec2, width: f32, point: Vec2) -> bool;

    /// Whether `point` lies inside a filled circle.
    fn circle_contains(&self, center: Vec2, radius: f32, point: Vec2) -> bool {
        geometry::point_hit_test(center, point.x, point.y, radius)
    }
}

/// Exact math, no rasterization.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticHit;

impl HitContext for AnalyticHit {
    fn fill_contains(&self, path: &[Vec2], point: Vec2) -> bool {
        geometry::polygon_contains(path, point)
    }

    fn stroke_contains(&self, from: Vec2, to: Vec2, width: f32, point: Vec2) -> bool {
        geometry::edge_hit_test(from, to, point.x, point.y, width)
    }
}
