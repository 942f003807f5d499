//! Interaction state machine.
//!
//! [`Editor`] owns the whole mutable state bundle (camera, rectangles,
//! selection, active gesture, background image) and turns raw input events
//! into mutations of it. One event is handled to completion before the next,
//! so every handler sees a consistent snapshot.
//!
//! Gestures are a single [`Mode`] tag, set once per press:
//!
//! | Press                                   | Result                     |
//! |-----------------------------------------|----------------------------|
//! | primary, near an edge of the selection  | `Resizing`                 |
//! | primary, inside the selection           | `Moving`                   |
//! | primary, on another rectangle           | selects it, stays `Idle`   |
//! | primary, on empty space                 | clears selection, `Drawing`|
//! | secondary                               | `Panning`                  |
//!
//! Wheel events zoom regardless of the active gesture and never change it.

mod mode;


pub use mode::{classify_press, resize_edge, Mode, PressAction};

use crate::camera::Camera;
use crate::config::{ConfigError, EditorConfig};
use crate::error::EditorError;
use crate::geometry::{Point, Rect};
use crate::input::{EventResponse, InputEvent, MouseButton};
use crate::render::{Raster, Scene, Styles};
use crate::store::AnnotationStore;

/// Canvas editor state and input handling.
#[derive(Debug, Clone)]
pub struct Editor {
    camera: Camera,
    store: AnnotationStore,
    mode: Mode,
    image: Option<Raster>,
    styles: Styles,
    edge_threshold_px: f32,
    wheel_sensitivity: f32,
    /// Logical surface width and height
    surface_size: (f32, f32),
    /// Camera, draft or image changed since the last frame
    view_dirty: bool,
}

impl Editor {
    /// Build an editor from `config` after validating it.
    pub fn new(config: &EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: &EditorConfig) -> Self {
        Self {
            camera: Camera::new(config.zoom.min_scale, config.zoom.max_scale),
            store: AnnotationStore::new(),
            mode: Mode::Idle,
            image: None,
            styles: config.styles,
            edge_threshold_px: config.edge_threshold_px,
            wheel_sensitivity: config.zoom.wheel_sensitivity,
            surface_size: (config.surface.width, config.surface.height),
            view_dirty: true,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Logical size of the drawing surface as `(width, height)`.
    pub fn surface_size(&self) -> (f32, f32) {
        self.surface_size
    }

    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    /// Install the background image once the host has decoded it.
    pub fn set_image(&mut self, image: Option<Raster>) {
        if self.image != image {
            log::debug!("Background image set: {:?}", image);
            self.image = image;
            self.view_dirty = true;
        }
    }

    /// Snapshot of everything a frame is drawn from.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            size: self.surface_size,
            image: self.image.as_ref(),
            rects: self.store.as_slice(),
            selected: self.store.selected(),
            draft: self.mode.draft(),
            camera: &self.camera,
            styles: &self.styles,
        }
    }

    /// Check if anything visible changed since `mark_drawn()`.
    pub fn needs_redraw(&self) -> bool {
        self.view_dirty || self.store.is_dirty()
    }

    /// Record that the current state has been drawn.
    pub fn mark_drawn(&mut self) {
        self.view_dirty = false;
        self.store.clear_dirty();
    }

    /// Handle one input event.
    ///
    /// Events with non-finite coordinates are dropped. An error means the
    /// gesture state referenced a rectangle the store does not hold.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<EventResponse, EditorError> {
        if let Some(position) = event.position() {
            if !position.is_finite() {
                log::warn!("Dropping {:?} with non-finite position", event);
                return Ok(EventResponse::default());
            }
        }

        let suppress_default = match event {
            InputEvent::Pressed { button, position } => {
                self.on_press(button, position)?;
                false
            }
            InputEvent::Moved { position } => {
                self.on_move(position)?;
                false
            }
            InputEvent::Released { button, position } => {
                self.on_release(button, position)?;
                false
            }
            InputEvent::Wheel { delta, position } => {
                self.on_wheel(delta, position);
                false
            }
            InputEvent::ContextMenu { .. } => {
                // Secondary button drives panning
                true
            }
            InputEvent::Cancel => {
                self.cancel()?;
                false
            }
        };

        Ok(EventResponse {
            redraw: self.needs_redraw(),
            suppress_default,
        })
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode.name() != mode.name() {
            log::debug!("Gesture: {} -> {}", self.mode.name(), mode.name());
        }
        if self.mode.draft() != mode.draft() {
            self.view_dirty = true;
        }
        self.mode = mode;
    }

    fn on_press(&mut self, button: MouseButton, screen: Point) -> Result<(), EditorError> {
        if !self.mode.is_idle() {
            log::debug!(
                "Ignoring {:?} press during {} gesture",
                button,
                self.mode.name()
            );
            return Ok(());
        }

        match button {
            MouseButton::Primary => self.on_primary_press(screen),
            MouseButton::Secondary => {
                self.set_mode(Mode::Panning { last: screen });
                Ok(())
            }
            other => {
                log::trace!("Ignoring {:?} press", other);
                Ok(())
            }
        }
    }

    fn on_primary_press(&mut self, screen: Point) -> Result<(), EditorError> {
        let world = self.camera.to_world(screen);
        let threshold = self.camera.screen_distance_to_world(self.edge_threshold_px);

        match classify_press(&self.store, world, threshold) {
            PressAction::Resize { index, edge } => {
                let original = self.store.get(index)?;
                log::debug!("Resize rectangle {} from {:?} edge", index, edge);
                self.set_mode(Mode::Resizing {
                    index,
                    edge,
                    original,
                });
            }
            PressAction::Move { index } => {
                let original = self.store.get(index)?;
                let grab = world.delta_from(Point::new(original.x, original.y));
                self.set_mode(Mode::Moving {
                    index,
                    grab,
                    original,
                });
            }
            PressAction::Select { index } => {
                self.store.select(Some(index))?;
            }
            PressAction::Draw => {
                self.store.select(None)?;
                log::debug!("Draw started at ({:.1}, {:.1})", world.x, world.y);
                self.set_mode(Mode::Drawing {
                    draft: Rect::at(world),
                });
            }
        }
        Ok(())
    }

    fn on_move(&mut self, screen: Point) -> Result<(), EditorError> {
        match self.mode {
            Mode::Idle => {}
            Mode::Drawing { draft } => {
                let world = self.camera.to_world(screen);
                let (width, height) = world.delta_from(Point::new(draft.x, draft.y));
                log::trace!("Draft size {:.1}x{:.1}", width, height);
                self.set_mode(Mode::Drawing {
                    draft: Rect::new(draft.x, draft.y, width, height),
                });
            }
            Mode::Panning { last } => {
                let (dx, dy) = screen.delta_from(last);
                if self.camera.pan_by(dx, dy) {
                    self.view_dirty = true;
                }
                self.mode = Mode::Panning { last: screen };
            }
            Mode::Moving { index, grab, .. } => {
                let world = self.camera.to_world(screen);
                let current = self.store.get(index)?;
                let moved = Rect::new(world.x - grab.0, world.y - grab.1, current.width, current.height);
                self.store.replace(index, moved)?;
            }
            Mode::Resizing {
                index,
                edge,
                original,
            } => {
                let world = self.camera.to_world(screen);
                self.store.replace(index, resize_edge(&original, edge, world))?;
            }
        }
        Ok(())
    }

    fn on_release(&mut self, button: MouseButton, screen: Point) -> Result<(), EditorError> {
        if self.mode.button() != Some(button) {
            log::trace!("Ignoring {:?} release during {} gesture", button, self.mode.name());
            return Ok(());
        }

        // The release position is the final sample of the gesture
        self.on_move(screen)?;

        match self.mode {
            Mode::Idle => {}
            Mode::Drawing { draft } => {
                let index = self.store.append(draft.normalized());
                log::debug!("Draw finished as rectangle {}", index);
            }
            Mode::Panning { .. } => {}
            Mode::Moving { index, .. } | Mode::Resizing { index, .. } => {
                let rect = self.store.get(index)?;
                self.store.replace(index, rect.normalized())?;
                log::debug!("Rectangle {} now {:?}", index, rect.normalized());
            }
        }
        self.set_mode(Mode::Idle);
        Ok(())
    }

    fn on_wheel(&mut self, delta: f32, screen: Point) {
        let delta_scale = delta * self.wheel_sensitivity;
        if self.camera.zoom_at(screen, delta_scale) {
            self.view_dirty = true;
        }
    }

    /// Abort the active gesture.
    ///
    /// A draft is discarded, a moved or resized rectangle goes back to where
    /// it was at press time, and panning stops where it is.
    ///
    /// The editor is back in `Idle` afterwards even if the restore fails.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        let restored = match self.mode {
            Mode::Idle => return Ok(()),
            Mode::Drawing { .. } => {
                log::debug!("Draft discarded");
                Ok(())
            }
            Mode::Panning { .. } => Ok(()),
            Mode::Moving { index, original, .. } | Mode::Resizing { index, original, .. } => self
                .store
                .replace(index, original)
                .inspect(|()| log::debug!("Rectangle {} restored", index)),
        };
        self.set_mode(Mode::Idle);
        restored
    }

    #[cfg(test)]
    pub(crate) fn force_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}
