use crate::coords::{CanvasDelta, CanvasPoint, CanvasSize};
use crate::geometry;
use crate::point::Point;
use crate::{PointId, ZoneId};
use glam::Vec2;

/// Exported form of a zone: its vertices as `[x, y]` pairs, in order.
pub type ZoneOption = Vec<[f32; 2]>;

/// A polygonal hotspot.
///
/// Vertex order defines the edges: edge `i` runs from point `i` to point
/// `i + 1`, and closed zones also have the wrap edge from the last point back
/// to the first. Z-order is not stored here; it is the zone's position in the
/// editor's list.
#[derive(Clone, Debug)]
pub struct Zone {
    pub id: ZoneId,
    pub points: Vec<Point>,
    /// Rendered and filled as a polygon. Never set for fewer than 3 points at
    /// construction; removing vertices later does not clear it.
    pub closed: bool,
    /// Display only. Never exported.
    pub hovered: bool,
}

impl Zone {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        let closed = closed && points.len() >= 3;
        Self {
            id: ZoneId::new(),
            points,
            closed,
            hovered: false,
        }
    }

    /// Build a closed zone from exported coordinates.
    pub fn from_option(option: &[[f32; 2]]) -> Self {
        Self::new(option.iter().copied().map(Point::from).collect(), true)
    }

    /// Axis-aligned square with its top-left corner at `origin`, wound clockwise.
    pub fn square(origin: CanvasPoint, side: f32) -> Self {
        let (x, y) = (origin.x(), origin.y());
        Self::from_option(&[[x, y], [x + side, y], [x + side, y + side], [x, y + side]])
    }

    pub fn to_option(&self) -> ZoneOption {
        self.points.iter().map(Point::to_option).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex positions in order.
    pub fn path(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| p.position.0).collect()
    }

    /// Edges as `(index of first endpoint, first, second)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Point, &Point)> + '_ {
        let n = self.points.len();
        let count = if self.closed { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (i, &self.points[i], &self.points[(i + 1) % n]))
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.iter_mut().find(|p| p.id == id)
    }

    pub fn contains_point(&self, id: PointId) -> bool {
        self.point(id).is_some()
    }

    /// First vertex within `radius` of `pointer`, in vertex order.
    pub fn point_at(&self, pointer: CanvasPoint, radius: f32) -> Option<PointId> {
        self.points
            .iter()
            .find(|p| p.is_hit(pointer, radius))
            .map(|p| p.id)
    }

    /// The vertex closest to the canvas origin.
    ///
    /// Used to tell auto-placed zones apart; for zones in the positive
    /// quadrant this is usually, but not always, the visual top-left corner.
    pub fn top_left_anchor(&self) -> Option<&Point> {
        self.points.iter().min_by(|a, b| {
            a.position
                .0
                .length_squared()
                .total_cmp(&b.position.0.length_squared())
        })
    }

    /// Mark the zone and all its vertices hovered.
    pub fn hover(&mut self) {
        self.hovered = true;
        self.points.iter_mut().for_each(Point::hover);
    }

    pub fn unhover(&mut self) {
        self.hovered = false;
        self.points.iter_mut().for_each(Point::unhover);
    }

    /// Move every vertex by `delta`.
    pub fn translate(&mut self, delta: CanvasDelta) {
        for point in &mut self.points {
            point.translate(delta);
        }
    }

    /// Whether any edges cross, or adjacent edges fold onto each other.
    pub fn is_distorted(&self) -> bool {
        geometry::is_self_intersecting(&self.path(), self.closed)
    }

    pub fn is_out_of_bounds(&self, size: CanvasSize) -> bool {
        self.points.iter().any(|p| p.is_out_of_bounds(size))
    }

    /// Whether the zone should be drawn as invalid.
    pub fn has_error(&self, size: CanvasSize) -> bool {
        self.is_distorted() || self.is_out_of_bounds(size)
    }

    /// Shift the whole zone back inside the canvas.
    ///
    /// Takes the largest correction needed on each axis over all vertices and
    /// applies it to every vertex, so the shape is preserved. A zone larger
    /// than the canvas can still end up partly outside.
    pub fn adjust_if_out_of_bounds(&mut self, size: CanvasSize) {
        let mut correction = Vec2::ZERO;
        for point in &self.points {
            let dx = axis_correction(point.x(), size.width());
            let dy = axis_correction(point.y(), size.height());
            if correction.x.abs() < dx.abs() {
                correction.x = dx;
            }
            if correction.y.abs() < dy.abs() {
                correction.y = dy;
            }
        }

        if correction != Vec2::ZERO {
            self.translate(CanvasDelta(correction));
        }
    }

    /// Insert `point` right after the vertex at `after_index`.
    ///
    /// An index past the end appends.
    pub fn insert_vertex(&mut self, after_index: usize, point: Point) -> PointId {
        let id = point.id;
        let index = (after_index + 1).min(self.points.len());
        self.points.insert(index, point);
        id
    }

    /// Remove the vertex at `index`. Returns false if there is none.
    pub fn remove_vertex_at(&mut self, index: usize) -> bool {
        if index < self.points.len() {
            self.points.remove(index);
            true
        } else {
            false
        }
    }

    /// Remove the vertex with `id`. Returns false if it is not in this zone.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        match self.points.iter().position(|p| p.id == id) {
            Some(index) => self.remove_vertex_at(index),
            None => false,
        }
    }
}

fn axis_correction(value: f32, max: f32) -> f32 {
    if value < 0.0 {
        -value
    } else if value > max {
        max - value
    } else {
        0.0
    }
}
