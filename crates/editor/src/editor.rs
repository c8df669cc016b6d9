use crate::config::EditorConfig;
use crate::input::{Cursor, InputEvent, Key};
use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};
use zone::{
    AnalyticHit, CanvasDelta, CanvasPoint, CanvasSize, HitContext, Point, PointId, Zone, ZoneId,
    ZoneOption,
};

/// Events emitted by the editor, drained with [`Editor::take_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    ZoneAdded(ZoneId),
    ZoneRemoved(ZoneId),
    PointInserted { zone: ZoneId, point: PointId },
    PointRemoved { zone: ZoneId, point: PointId },
    /// A zone moved to the top of the z-order. Its points are unchanged.
    ZoneRaised(ZoneId),
    FocusChanged,
    /// Zones or their points changed.
    ContentChanged,
}

/// The focused zone, and optionally one of its vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Focus {
    pub zone: ZoneId,
    pub point: Option<PointId>,
}

/// Interactive editing state over an ordered list of zones.
pub struct Editor {
    /// All zones, topmost first. Hit testing walks this order and painting
    /// walks it in reverse.
    pub zones: Vec<Zone>,

    config: EditorConfig,

    /// Answers containment questions for hit testing.
    hit: Box<dyn HitContext>,

    mouse_down: bool,

    /// Pointer position at the previous pointer event of a drag.
    drag_origin: CanvasPoint,

    focus: Option<Focus>,

    cursor: Cursor,

    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            zones: Vec::new(),
            config,
            hit: Box::new(AnalyticHit),
            mouse_down: false,
            drag_origin: CanvasPoint::ORIGIN,
            focus: None,
            cursor: Cursor::Default,
            events: Vec::new(),
        }
    }

    /// Create an editor pre-populated from exported zones.
    pub fn with_zones(config: EditorConfig, zones: &[ZoneOption]) -> Self {
        Self::from_zones(config, zones.iter().map(|z| Zone::from_option(z)).collect())
    }

    /// Create an editor owning already-built zones, keeping their ids and
    /// closed flags.
    pub fn from_zones(config: EditorConfig, zones: Vec<Zone>) -> Self {
        let mut editor = Self::new(config);
        editor.zones = zones;
        editor
    }

    /// Replace the hit-testing backend.
    pub fn with_hit_context(mut self, hit: impl HitContext + 'static) -> Self {
        self.hit = Box::new(hit);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn size(&self) -> CanvasSize {
        self.config.size()
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn focused_zone(&self) -> Option<&Zone> {
        self.focus.and_then(|f| self.zone(f.zone))
    }

    pub fn focused_point(&self) -> Option<&Point> {
        let focus = self.focus?;
        self.zone(focus.zone)?.point(focus.point?)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn drag_origin(&self) -> CanvasPoint {
        self.drag_origin
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    fn zone_index(&self, id: ZoneId) -> Option<usize> {
        self.zones.iter().position(|z| z.id == id)
    }

    // === Import / export ===

    /// Replace all zones. Focus and drag state are reset.
    pub fn set_zones(&mut self, zones: &[ZoneOption]) {
        for zone in self.zones.drain(..) {
            self.events.push(EditorEvent::ZoneRemoved(zone.id));
        }
        self.zones = zones.iter().map(|z| Zone::from_option(z)).collect();
        for zone in &self.zones {
            self.events.push(EditorEvent::ZoneAdded(zone.id));
        }
        self.mouse_down = false;
        self.drag_origin = CanvasPoint::ORIGIN;
        self.cursor = Cursor::Default;
        self.set_focus(None);
        self.events.push(EditorEvent::ContentChanged);
        debug!("loaded {} zones", self.zones.len());
    }

    /// Put back zones and focus saved earlier.
    pub fn restore(&mut self, zones: Vec<Zone>, focus: Option<Focus>) {
        self.zones = zones;
        let focus = focus.filter(|f| {
            self.zone(f.zone)
                .is_some_and(|z| f.point.map_or(true, |p| z.contains_point(p)))
        });
        self.set_focus(focus);
        self.events.push(EditorEvent::ContentChanged);
        debug!("restored {} zones", self.zones.len());
    }

    /// Export all zones in list order.
    pub fn to_option(&self) -> Vec<ZoneOption> {
        self.zones.iter().map(Zone::to_option).collect()
    }

    // === Hit testing ===

    fn zone_is_hit(&self, zone: &Zone, pointer: CanvasPoint) -> bool {
        let radius = self.config.hit_radius;
        zone.points
            .iter()
            .any(|p| self.hit.circle_contains(p.position.0, radius, pointer.0))
            || self.hit.fill_contains(&zone.path(), pointer.0)
    }

    fn vertex_at(&self, zone: &Zone, pointer: CanvasPoint) -> Option<PointId> {
        let radius = self.config.hit_radius;
        zone.points
            .iter()
            .find(|p| self.hit.circle_contains(p.position.0, radius, pointer.0))
            .map(|p| p.id)
    }

    /// Topmost zone under `pointer`.
    pub fn zone_at(&self, pointer: CanvasPoint) -> Option<ZoneId> {
        self.zones
            .iter()
            .find(|z| self.zone_is_hit(z, pointer))
            .map(|z| z.id)
    }

    /// First vertex under `pointer` across all zones, topmost zone first.
    pub fn point_at(&self, pointer: CanvasPoint) -> Option<(ZoneId, PointId)> {
        self.zones
            .iter()
            .find_map(|z| self.vertex_at(z, pointer).map(|p| (z.id, p)))
    }

    /// First edge within the edge tolerance of `pointer`, as the zone and the
    /// index of the edge's first endpoint.
    pub fn edge_at(&self, pointer: CanvasPoint) -> Option<(ZoneId, usize)> {
        let width = self.config.edge_tolerance;
        self.zones.iter().find_map(|zone| {
            zone.edges()
                .find(|(_, a, b)| {
                    self.hit
                        .stroke_contains(a.position.0, b.position.0, width, pointer.0)
                })
                .map(|(i, _, _)| (zone.id, i))
        })
    }

    // === Mutation ===

    fn set_focus(&mut self, focus: Option<Focus>) {
        if self.focus != focus {
            debug!("focus: {:?}", focus);
            self.focus = focus;
            self.events.push(EditorEvent::FocusChanged);
        }
    }

    fn clear_focused_point(&mut self) {
        if let Some(focus) = self.focus {
            self.set_focus(Some(Focus {
                point: None,
                ..focus
            }));
        }
    }

    /// Focus a zone, and optionally one of its vertices.
    ///
    /// Fails if the zone is missing or the vertex is not one of its own.
    pub fn focus_zone(&mut self, zone: ZoneId, point: Option<PointId>) -> bool {
        let Some(z) = self.zone(zone) else {
            return false;
        };
        if point.is_some_and(|p| !z.contains_point(p)) {
            return false;
        }
        self.set_focus(Some(Focus { zone, point }));
        true
    }

    pub fn clear_focus(&mut self) {
        self.set_focus(None);
    }

    /// Insert a vertex at `position` after the vertex at `after` in a zone.
    pub fn insert_point(
        &mut self,
        zone: ZoneId,
        after: usize,
        position: CanvasPoint,
    ) -> Option<PointId> {
        let point = self.zone_mut(zone)?.insert_vertex(after, Point::at(position));
        debug!("inserted point {} into zone {}", point, zone);
        self.events.push(EditorEvent::PointInserted { zone, point });
        self.events.push(EditorEvent::ContentChanged);
        Some(point)
    }

    /// Clear every hover flag and reset the cursor.
    pub fn unhover(&mut self) {
        self.cursor = Cursor::Default;
        self.zones.iter_mut().for_each(Zone::unhover);
    }

    /// Remove a zone. Clears focus if it was the focused zone.
    pub fn delete_zone(&mut self, id: ZoneId) -> bool {
        let Some(index) = self.zone_index(id) else {
            return false;
        };
        self.zones.remove(index);
        if self.focus.is_some_and(|f| f.zone == id) {
            self.set_focus(None);
        }
        debug!("deleted zone {}", id);
        self.events.push(EditorEvent::ZoneRemoved(id));
        self.events.push(EditorEvent::ContentChanged);
        true
    }

    /// Remove a vertex from whichever zone holds it. The zone is kept even if
    /// this leaves it with fewer than three points.
    pub fn delete_point(&mut self, id: PointId) -> bool {
        let Some(zone) = self.zones.iter_mut().find(|z| z.contains_point(id)) else {
            return false;
        };
        let zone_id = zone.id;
        zone.remove_point(id);
        if self.focus.is_some_and(|f| f.point == Some(id)) {
            self.clear_focused_point();
        }
        debug!("deleted point {} of zone {}", id, zone_id);
        self.events.push(EditorEvent::PointRemoved {
            zone: zone_id,
            point: id,
        });
        self.events.push(EditorEvent::ContentChanged);
        true
    }

    /// Move a zone rigidly, then pull it back inside the canvas.
    pub fn move_zone(&mut self, id: ZoneId, delta: CanvasDelta) -> bool {
        let size = self.size();
        let Some(zone) = self.zone_mut(id) else {
            return false;
        };
        zone.translate(delta);
        zone.adjust_if_out_of_bounds(size);
        self.events.push(EditorEvent::ContentChanged);
        true
    }

    /// Move a single vertex, then clamp it to the canvas.
    pub fn move_point(&mut self, id: PointId, delta: CanvasDelta) -> bool {
        let size = self.size();
        let Some(point) = self.zones.iter_mut().find_map(|z| z.point_mut(id)) else {
            return false;
        };
        point.translate(delta);
        point.adjust_if_out_of_bounds(size);
        self.events.push(EditorEvent::ContentChanged);
        true
    }

    /// Add a default-size square at the first free grid slot, on top.
    pub fn append(&mut self) -> ZoneId {
        let origin = self.free_slot();
        let zone = Zone::square(origin, self.config.zone_size);
        let id = zone.id;
        self.zones.insert(0, zone);
        debug!("appended zone {} at {:?}", id, origin.0);
        self.events.push(EditorEvent::ZoneAdded(id));
        self.events.push(EditorEvent::ContentChanged);
        id
    }

    /// First position that is not already some zone's top-left anchor.
    ///
    /// Candidates step diagonally by the grid step from `(step, step)` and
    /// wrap within the area where a new zone still fits. Once that cycle is
    /// used up, every grid slot in the area is tried, then the grid shifted
    /// by whole pixels. If even those are taken, the slot goes one pixel
    /// right of the rightmost anchor.
    fn free_slot(&self) -> CanvasPoint {
        let step = self.config.grid_step.max(1.0);
        let zone_size = self.config.zone_size;
        let size = self.size();
        let span = Vec2::new(
            (size.width() - zone_size).max(1.0),
            (size.height() - zone_size).max(1.0),
        );
        let anchors: Vec<Vec2> = self
            .zones
            .iter()
            .filter_map(|z| z.top_left_anchor())
            .map(|p| p.position.0)
            .collect();

        let cols = (span.x / step).ceil() as usize;
        let rows = (span.y / step).ceil() as usize;

        let diagonal = std::iter::successors(Some(Vec2::splat(step)), |c| {
            Some(Vec2::new((c.x + step) % span.x, (c.y + step) % span.y))
        })
        .take(cols * rows + 1);

        let shifts = step.ceil() as usize;
        let grid = (0..shifts)
            .flat_map(move |dx| (0..shifts).map(move |dy| Vec2::new(dx as f32, dy as f32)))
            .flat_map(move |shift| {
                (0..rows).flat_map(move |row| {
                    (0..cols).map(move |col| {
                        Vec2::new(col as f32 * step, row as f32 * step) + shift
                    })
                })
            })
            .filter(move |c| c.x < span.x && c.y < span.y);

        diagonal
            .chain(grid)
            .find(|c| !anchors.contains(c))
            .map(CanvasPoint)
            .unwrap_or_else(|| {
                let right = anchors.iter().map(|a| a.x).fold(0.0, f32::max);
                CanvasPoint::new(right + 1.0, 0.0)
            })
    }

    // === Input transitions ===

    /// Dispatch an input event to the matching transition.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::KeyDown { key } => self.key_down(&key),
            InputEvent::DoubleClick { position } => self.double_click(position),
        }
    }

    /// Focus the topmost zone under the pointer and raise it to the top.
    pub fn pointer_down(&mut self, position: CanvasPoint) {
        let focus = self.zone_at(position).map(|id| {
            if let Some(index) = self.zone_index(id) {
                if index != 0 {
                    let zone = self.zones.remove(index);
                    self.zones.insert(0, zone);
                    self.events.push(EditorEvent::ZoneRaised(id));
                }
            }
            let point = self.zones.first().and_then(|z| self.vertex_at(z, position));
            Focus { zone: id, point }
        });
        self.set_focus(focus);
        self.drag_origin = position;
        self.mouse_down = true;
    }

    /// Update hover state, and drag the focused vertex or zone if the button
    /// is held.
    pub fn pointer_move(&mut self, position: CanvasPoint) {
        self.unhover();
        if let Some(id) = self.zone_at(position) {
            self.cursor = Cursor::Pointer;
            let vertex = self.zone(id).and_then(|z| self.vertex_at(z, position));
            if let Some(zone) = self.zone_mut(id) {
                match vertex.and_then(|p| zone.point_mut(p)) {
                    Some(point) => point.hover(),
                    None => zone.hover(),
                }
            }
        }

        if self.mouse_down {
            if let Some(focus) = self.focus {
                let delta = position - self.drag_origin;
                self.cursor = Cursor::Move;
                match focus.point {
                    Some(point) => {
                        self.move_point(point, delta);
                    }
                    None => {
                        self.move_zone(focus.zone, delta);
                    }
                }
            }
        }
        self.drag_origin = position;
    }

    pub fn pointer_up(&mut self) {
        self.mouse_down = false;
        self.drag_origin = CanvasPoint::ORIGIN;
    }

    /// Delete removes the focused vertex, or else the focused zone.
    pub fn key_down(&mut self, key: &Key) {
        if *key != Key::Delete {
            return;
        }
        let Some(focus) = self.focus else {
            return;
        };
        if let Some(point) = focus.point {
            if self.delete_point(point) {
                return;
            }
        }
        self.delete_zone(focus.zone);
    }

    /// Delete the vertex under the pointer, or insert one on the edge under it.
    pub fn double_click(&mut self, position: CanvasPoint) {
        if let Some((_, point)) = self.point_at(position) {
            self.delete_point(point);
            self.clear_focused_point();
            return;
        }

        if let Some((zone, index)) = self.edge_at(position) {
            self.insert_point(zone, index, position);
            self.cursor = Cursor::Pointer;
        }
    }
}
