//! Binding an editor to a drawing surface.

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::input::InputEvent;
use crate::redraw::redraw_loop;
use crate::render::{paint, Painter};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;
use theme::Theme;
use zone::{CanvasSize, Zone, ZoneOption};

/// Something the editor can be mounted on.
pub trait Surface {
    type Painter: Painter;

    /// Drawable size, if the surface knows it. Overrides the configured size.
    fn size(&self) -> Option<CanvasSize> {
        None
    }

    /// A painter for this surface, or `None` if it cannot be drawn on.
    fn painter(&mut self) -> Option<Self::Painter>;
}

/// A mounted editor together with the painter for its surface.
pub struct Session<P: Painter> {
    editor: Rc<RefCell<Editor>>,
    painter: P,
    theme: Theme,
}

impl<P: Painter> Session<P> {
    /// Mount an editor on `surface`, loaded with `zones`.
    ///
    /// Returns `None`, constructing nothing, if the surface has no painter.
    pub fn mount<S>(surface: &mut S, zones: &[ZoneOption], config: EditorConfig) -> Option<Self>
    where
        S: Surface<Painter = P>,
    {
        let zones = zones.iter().map(|z| Zone::from_option(z)).collect();
        Self::mount_zones(surface, zones, config)
    }

    /// Like [`Session::mount`], for zones that were already built, such as
    /// the ones a document carries.
    pub fn mount_zones<S>(surface: &mut S, zones: Vec<Zone>, mut config: EditorConfig) -> Option<Self>
    where
        S: Surface<Painter = P>,
    {
        let Some(painter) = surface.painter() else {
            log::warn!("surface has no painter, not mounting");
            return None;
        };
        if let Some(size) = surface.size() {
            config = config.with_size(size.width(), size.height());
        }
        log::info!(
            "mounted editor {}x{} with {} zones",
            config.width,
            config.height,
            zones.len()
        );
        Some(Self {
            editor: Rc::new(RefCell::new(Editor::from_zones(config, zones))),
            painter,
            theme: Theme::default(),
        })
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn editor(&self) -> Ref<'_, Editor> {
        self.editor.borrow()
    }

    pub fn editor_mut(&self) -> RefMut<'_, Editor> {
        self.editor.borrow_mut()
    }

    /// Shared handle for tasks running next to the session.
    pub fn handle_ref(&self) -> Rc<RefCell<Editor>> {
        self.editor.clone()
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn handle(&self, event: InputEvent) {
        self.editor.borrow_mut().handle(event);
    }

    pub fn to_option(&self) -> Vec<ZoneOption> {
        self.editor.borrow().to_option()
    }

    /// Paint a single frame.
    pub fn redraw(&mut self) {
        paint(&self.editor.borrow(), &self.theme, &mut self.painter);
    }

    /// Repaint forever at `interval`.
    pub async fn run(&mut self, interval: Duration) {
        redraw_loop(
            self.editor.clone(),
            &mut self.painter,
            self.theme.clone(),
            interval,
        )
        .await
    }
}
