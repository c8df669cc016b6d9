//! Continuous repaint.

use crate::editor::Editor;
use crate::render::{paint, Painter};
use smol::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use theme::Theme;

/// Roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Paint `editor` every `interval`, forever.
///
/// Runs on a local executor alongside whatever feeds input into the editor.
/// Dropping the future stops the loop. A frame is skipped if the editor is
/// mutably borrowed when it comes due.
pub async fn redraw_loop(
    editor: Rc<RefCell<Editor>>,
    painter: &mut dyn Painter,
    theme: Theme,
    interval: Duration,
) {
    loop {
        match editor.try_borrow() {
            Ok(editor) => paint(&editor, &theme, painter),
            Err(_) => log::trace!("editor busy, skipping frame"),
        }
        Timer::after(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Stroke;
    use glam::Vec2;
    use theme::Color;
    use zone::CanvasSize;

    #[derive(Default)]
    struct FrameCounter {
        frames: usize,
        circles: usize,
    }

    impl Painter for FrameCounter {
        fn clear(&mut self, _: CanvasSize, _: Color) {
            self.frames += 1;
            self.circles = 0;
        }

        fn stroke_path(&mut self, _: &[Vec2], _: bool, _: Stroke) {}

        fn fill_path(&mut self, _: &[Vec2], _: Color) {}

        fn stroke_circle(&mut self, _: Vec2, _: f32, _: Stroke) {
            self.circles += 1;
        }
    }

    #[test]
    fn repaints_until_dropped() {
        let editor = Rc::new(RefCell::new(Editor::default()));
        let mut counter = FrameCounter::default();

        smol::block_on(async {
            let input = async {
                Timer::after(Duration::from_millis(20)).await;
                editor.borrow_mut().append();
                Timer::after(Duration::from_millis(40)).await;
            };
            smol::future::or(
                redraw_loop(
                    editor.clone(),
                    &mut counter,
                    Theme::light(),
                    Duration::from_millis(5),
                ),
                input,
            )
            .await;
        });

        assert!(counter.frames >= 2);
        // The last frame saw the appended square.
        assert_eq!(counter.circles, 4);
    }
}
