use crate::render::{Painter, Stroke};
use crate::session::Surface;
use glam::Vec2;
use std::fmt::Write;
use theme::{hex, opacity, Color};
use zone::CanvasSize;

/// Paints a frame into an SVG document.
#[derive(Debug, Default)]
pub struct SvgPainter {
    size: CanvasSize,
    body: String,
}

impl SvgPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The complete document for the last painted frame.
    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n{}</svg>\n",
            self.size.width(),
            self.size.height(),
            self.size.width(),
            self.size.height(),
            self.body
        )
    }
}

/// Offscreen surface that always yields an [`SvgPainter`].
#[derive(Clone, Copy, Debug)]
pub struct SvgSurface {
    size: CanvasSize,
}

impl SvgSurface {
    pub fn new(size: CanvasSize) -> Self {
        Self { size }
    }
}

impl Surface for SvgSurface {
    type Painter = SvgPainter;

    fn size(&self) -> Option<CanvasSize> {
        Some(self.size)
    }

    fn painter(&mut self) -> Option<SvgPainter> {
        Some(SvgPainter::new())
    }
}

fn points_attr(path: &[Vec2]) -> String {
    path.iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint_attr(name: &str, color: Color) -> String {
    if color.alpha == 0xff {
        format!("{}=\"{}\"", name, hex(color))
    } else {
        format!(
            "{}=\"{}\" {}-opacity=\"{:.3}\"",
            name,
            hex(color),
            name,
            opacity(color)
        )
    }
}

impl Painter for SvgPainter {
    fn clear(&mut self, size: CanvasSize, background: Color) {
        self.size = size;
        self.body.clear();
        if background.alpha > 0 {
            let _ = writeln!(
                self.body,
                "  <rect width=\"{}\" height=\"{}\" {}/>",
                size.width(),
                size.height(),
                paint_attr("fill", background)
            );
        }
    }

    fn stroke_path(&mut self, path: &[Vec2], closed: bool, stroke: Stroke) {
        if path.is_empty() {
            return;
        }
        let element = if closed { "polygon" } else { "polyline" };
        let _ = writeln!(
            self.body,
            "  <{} points=\"{}\" fill=\"none\" {} stroke-width=\"{}\"/>",
            element,
            points_attr(path),
            paint_attr("stroke", stroke.color),
            stroke.width
        );
    }

    fn fill_path(&mut self, path: &[Vec2], color: Color) {
        if path.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "  <polygon points=\"{}\" {}/>",
            points_attr(path),
            paint_attr("fill", color)
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" {} stroke-width=\"{}\"/>",
            center.x,
            center.y,
            radius,
            paint_attr("stroke", stroke.color),
            stroke.width
        );
    }
}
