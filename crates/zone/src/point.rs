use crate::coords::{CanvasDelta, CanvasPoint, CanvasSize};
use crate::geometry;
use crate::PointId;

/// Radius within which a pointer selects a vertex.
pub const HIT_RADIUS: f32 = 5.0;

/// A vertex of a zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub position: CanvasPoint,
    /// Display only. Never exported.
    pub hovered: bool,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self::at(CanvasPoint::new(x, y))
    }

    pub fn at(position: CanvasPoint) -> Self {
        Self {
            id: PointId::new(),
            position,
            hovered: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn hover(&mut self) {
        self.hovered = true;
    }

    pub fn unhover(&mut self) {
        self.hovered = false;
    }

    pub fn translate(&mut self, delta: CanvasDelta) {
        self.position += delta;
    }

    /// Whether `pointer` is within `radius` of this vertex.
    pub fn is_hit(&self, pointer: CanvasPoint, radius: f32) -> bool {
        geometry::point_hit_test(self.position, pointer.x(), pointer.y(), radius)
    }

    pub fn is_out_of_bounds(&self, size: CanvasSize) -> bool {
        geometry::is_out_of_bounds(self.position, size)
    }

    /// Clamp each axis into the canvas independently.
    ///
    /// Used for single-vertex drags, so it deforms the owning zone.
    pub fn adjust_if_out_of_bounds(&mut self, size: CanvasSize) {
        self.position.0.x = self.position.0.x.clamp(0.0, size.width().max(0.0));
        self.position.0.y = self.position.0.y.clamp(0.0, size.height().max(0.0));
    }

    pub fn to_option(&self) -> [f32; 2] {
        [self.x(), self.y()]
    }
}

impl From<[f32; 2]> for Point {
    fn from(pair: [f32; 2]) -> Self {
        Self::at(pair.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_per_axis() {
        let size = CanvasSize::new(100.0, 100.0);
        let mut p = Point::new(-20.0, 140.0);
        p.adjust_if_out_of_bounds(size);
        assert_eq!(p.to_option(), [0.0, 100.0]);

        let mut inside = Point::new(30.0, 40.0);
        inside.adjust_if_out_of_bounds(size);
        assert_eq!(inside.to_option(), [30.0, 40.0]);
    }

    #[test]
    fn hit_uses_radius() {
        let p = Point::new(50.0, 50.0);
        assert!(p.is_hit(CanvasPoint::new(50.0, 50.0), HIT_RADIUS));
        assert!(p.is_hit(CanvasPoint::new(53.0, 54.0), HIT_RADIUS));
        assert!(!p.is_hit(CanvasPoint::new(56.0, 50.0), HIT_RADIUS));
    }
}
