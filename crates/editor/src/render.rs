//! Backend-agnostic frame painting.
//!
//! The editor knows nothing about pixels. Each frame, [`paint`] walks the
//! zones and issues path and circle calls against a [`Painter`], which a
//! backend maps onto whatever it draws with.

use crate::editor::Editor;
use glam::Vec2;
use theme::{Color, Theme};
use zone::{CanvasSize, Zone};

/// Stroke style for a path or circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Drawing backend.
pub trait Painter {
    /// Start a new frame, discarding the previous one.
    fn clear(&mut self, size: CanvasSize, background: Color);

    /// Stroke a polyline, joining the last point back to the first if `closed`.
    fn stroke_path(&mut self, path: &[Vec2], closed: bool, stroke: Stroke);

    /// Fill the implicitly closed polygon.
    fn fill_path(&mut self, path: &[Vec2], color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke);
}

/// Paint one frame of `editor`.
pub fn paint(editor: &Editor, theme: &Theme, painter: &mut dyn Painter) {
    let size = editor.size();
    painter.clear(size, theme.background);
    paint_grid(size, editor.config().grid_step, theme, painter);

    // Index 0 is on top, so it goes last.
    for zone in editor.zones.iter().rev() {
        paint_zone(zone, size, editor.config().hit_radius, theme, painter);
    }
}

fn paint_grid(size: CanvasSize, step: f32, theme: &Theme, painter: &mut dyn Painter) {
    if step <= 0.0 {
        return;
    }
    let stroke = Stroke::new(theme.grid, theme.grid_width);

    // Half-pixel offset keeps thin lines crisp.
    let mut x = step + 0.5;
    while x < size.width() {
        painter.stroke_path(&[Vec2::new(x, 0.0), Vec2::new(x, size.height())], false, stroke);
        x += step;
    }
    let mut y = step + 0.5;
    while y < size.height() {
        painter.stroke_path(&[Vec2::new(0.0, y), Vec2::new(size.width(), y)], false, stroke);
        y += step;
    }
}

fn paint_zone(zone: &Zone, size: CanvasSize, radius: f32, theme: &Theme, painter: &mut dyn Painter) {
    for point in &zone.points {
        let color = if point.hovered {
            theme.vertex_hover
        } else {
            theme.vertex_stroke
        };
        painter.stroke_circle(
            point.position.0,
            radius,
            Stroke::new(color, theme.vertex_stroke_width),
        );
    }

    let path = zone.path();
    if zone.closed {
        painter.fill_path(&path, theme.zone_fill);
    }

    let color = if zone.has_error(size) {
        theme.zone_error
    } else if zone.hovered {
        theme.zone_hover
    } else {
        theme.zone_stroke
    };
    painter.stroke_path(&path, zone.closed, Stroke::new(color, theme.zone_stroke_width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use zone::CanvasPoint;

    /// Records calls as short strings.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Painter for Recorder {
        fn clear(&mut self, _: CanvasSize, _: Color) {
            self.calls.push("clear".into());
        }

        fn stroke_path(&mut self, path: &[Vec2], closed: bool, stroke: Stroke) {
            self.calls.push(format!(
                "stroke {} {} {}",
                path.len(),
                closed,
                theme::hex(stroke.color)
            ));
        }

        fn fill_path(&mut self, path: &[Vec2], _: Color) {
            self.calls.push(format!("fill {}", path.len()));
        }

        fn stroke_circle(&mut self, _: Vec2, _: f32, stroke: Stroke) {
            self.calls.push(format!("circle {}", theme::hex(stroke.color)));
        }
    }

    fn small_editor(zones: &[Vec<[f32; 2]>]) -> Editor {
        Editor::with_zones(EditorConfig::default().with_size(25.0, 25.0), zones)
    }

    fn zone_calls(recorder: &Recorder) -> Vec<&str> {
        recorder
            .calls
            .iter()
            .map(String::as_str)
            .filter(|c| !c.starts_with("stroke 2 false #d3d3d3") && *c != "clear")
            .collect()
    }

    #[test]
    fn grid_lines_are_offset_by_half_a_pixel() {
        let editor = small_editor(&[]);
        let mut recorder = Recorder::default();
        paint(&editor, &Theme::light(), &mut recorder);
        // x = 10.5, 20.5 and y = 10.5, 20.5
        assert_eq!(recorder.calls.len(), 1 + 4);
        assert_eq!(recorder.calls[0], "clear");
    }

    #[test]
    fn closed_zone_is_filled_before_stroke() {
        let editor = small_editor(&[vec![[1.0, 1.0], [10.0, 1.0], [10.0, 10.0]]]);
        let mut recorder = Recorder::default();
        paint(&editor, &Theme::light(), &mut recorder);
        assert_eq!(
            zone_calls(&recorder),
            vec![
                "circle #ff0000",
                "circle #ff0000",
                "circle #ff0000",
                "fill 3",
                "stroke 3 true #0000ff"
            ]
        );
    }

    #[test]
    fn error_and_hover_colors() {
        let mut editor = small_editor(&[
            vec![[1.0, 1.0], [20.0, 1.0], [20.0, 20.0]],
            vec![[1.0, 1.0], [50.0, 1.0]],
        ]);
        editor.pointer_move(CanvasPoint::new(15.0, 8.0));
        let mut recorder = Recorder::default();
        paint(&editor, &Theme::light(), &mut recorder);
        let calls = zone_calls(&recorder);
        // Bottom zone first: open, out of bounds.
        assert_eq!(calls[2], "stroke 2 false #ff0000");
        assert_eq!(calls[calls.len() - 1], "stroke 3 true #7a7bef");
        assert_eq!(calls[3], "circle #7a7bef");
    }
}
