//! Listener lifecycle for a drawing surface.
//!
//! A [`Session`] pairs an [`Editor`] with the [`Surface`] it draws on. The
//! host attaches exactly one listener set, gets a [`Subscription`] back, and
//! routes every input event through it. Attaching twice fails, and events
//! sent through a subscription that was detached are rejected, so one
//! physical input can never be applied twice.

use crate::editor::Editor;
use crate::error::SessionError;
use crate::input::{EventResponse, InputEvent};
use crate::render::{render, Raster, Surface};

/// Proof of an attached listener set. Not cloneable; give it back to
/// [`Session::detach`] to tear the listeners down.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// An editor bound to its output surface.
#[derive(Debug)]
pub struct Session<S: Surface> {
    editor: Editor,
    surface: S,
    active: Option<u64>,
    next_id: u64,
}

impl<S: Surface> Session<S> {
    pub fn new(editor: Editor, surface: S) -> Self {
        Self {
            editor,
            surface,
            active: None,
            next_id: 1,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }

    /// Bind the listener set and draw the first frame.
    pub fn attach(&mut self) -> Result<Subscription, SessionError> {
        if self.active.is_some() {
            log::warn!("Refusing to attach a second listener set");
            return Err(SessionError::AlreadyAttached);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.active = Some(id);
        log::debug!("Listener set {} attached", id);
        self.redraw();
        Ok(Subscription { id })
    }

    /// Unbind the listener set. Any gesture in progress is cancelled, since
    /// its button release will no longer be delivered.
    ///
    /// The session is detached even when cancelling reports an error.
    pub fn detach(&mut self, subscription: Subscription) -> Result<(), SessionError> {
        self.check(&subscription)?;
        self.active = None;
        log::debug!("Listener set {} detached", subscription.id);
        let cancelled = self.editor.cancel();
        self.redraw_if_needed();
        cancelled.map_err(SessionError::from)
    }

    /// Deliver one event and redraw if it changed anything visible.
    pub fn dispatch(
        &mut self,
        subscription: &Subscription,
        event: InputEvent,
    ) -> Result<EventResponse, SessionError> {
        self.check(subscription)?;
        let response = self.editor.handle_event(event)?;
        if response.redraw {
            self.redraw();
        }
        Ok(response)
    }

    /// Image-ready signal from the host's loader.
    pub fn set_image(&mut self, image: Option<Raster>) {
        self.editor.set_image(image);
        if self.is_attached() {
            self.redraw_if_needed();
        }
    }

    /// Draw the current state unconditionally.
    pub fn redraw(&mut self) {
        render(&self.editor.scene(), &mut self.surface);
        self.editor.mark_drawn();
    }

    fn redraw_if_needed(&mut self) {
        if self.editor.needs_redraw() {
            self.redraw();
        }
    }

    fn check(&self, subscription: &Subscription) -> Result<(), SessionError> {
        if self.active == Some(subscription.id) {
            Ok(())
        } else {
            log::warn!("Rejecting event from stale subscription {}", subscription.id);
            Err(SessionError::StaleSubscription {
                id: subscription.id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Mode;
    use crate::error::EditorError;
    use crate::geometry::{Point, Rect};
    use crate::input::MouseButton;
    use crate::render::{CommandRecorder, DrawCommand};

    fn session() -> Session<CommandRecorder> {
        Session::new(Editor::default(), CommandRecorder::new())
    }

    fn pressed(x: f32, y: f32) -> InputEvent {
        InputEvent::Pressed {
            button: MouseButton::Primary,
            position: Point::new(x, y),
        }
    }

    fn released(x: f32, y: f32) -> InputEvent {
        InputEvent::Released {
            button: MouseButton::Primary,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_attach_draws_first_frame() {
        let mut session = session();
        let _sub = session.attach().unwrap();
        assert_eq!(session.surface().frames(), 1);
        assert_eq!(
            session.surface().commands(),
            &[DrawCommand::Clear {
                width: 1600.0,
                height: 800.0
            }]
        );
    }

    #[test]
    fn test_second_attach_rejected() {
        let mut session = session();
        let _sub = session.attach().unwrap();
        assert_eq!(session.attach(), Err(SessionError::AlreadyAttached));
    }

    #[test]
    fn test_stale_subscription_rejected() {
        let mut session = session();
        let first = session.attach().unwrap();
        let first_id = first.id();
        session.detach(first).unwrap();

        let second = session.attach().unwrap();
        assert_ne!(second.id(), first_id);

        let stale = Subscription { id: first_id };
        let err = session.dispatch(&stale, pressed(1.0, 1.0)).unwrap_err();
        assert_eq!(err, SessionError::StaleSubscription { id: first_id });
        assert!(session.editor().mode().is_idle());
    }

    #[test]
    fn test_dispatch_redraws_once_per_change() {
        let mut session = session();
        let sub = session.attach().unwrap();

        session.dispatch(&sub, pressed(10.0, 10.0)).unwrap();
        session.dispatch(&sub, released(60.0, 40.0)).unwrap();
        let frames = session.surface().frames();

        // Idle move changes nothing
        session
            .dispatch(
                &sub,
                InputEvent::Moved {
                    position: Point::new(500.0, 500.0),
                },
            )
            .unwrap();
        assert_eq!(session.surface().frames(), frames);
        assert_eq!(
            session.surface().stroked()[0].0,
            Rect::new(10.0, 10.0, 50.0, 30.0)
        );
    }

    #[test]
    fn test_detach_cancels_gesture() {
        let mut session = session();
        let sub = session.attach().unwrap();
        session.dispatch(&sub, pressed(10.0, 10.0)).unwrap();
        assert_eq!(session.editor().mode().name(), "Drawing");

        session.detach(sub).unwrap();
        assert!(session.editor().mode().is_idle());
        assert!(session.editor().store().is_empty());
        assert!(!session.is_attached());
    }

    #[test]
    fn test_image_ready_triggers_frame() {
        let mut session = session();
        let _sub = session.attach().unwrap();
        session.set_image(Some(Raster::new(640, 480)));

        assert_eq!(session.surface().frames(), 2);
        assert!(matches!(
            session.surface().commands()[1],
            DrawCommand::DrawImage { width, height, .. } if width == 640.0 && height == 480.0
        ));
    }

    #[test]
    fn test_failed_cancel_still_detaches() {
        let mut session = session();
        let sub = session.attach().unwrap();
        session.editor.force_mode(Mode::Moving {
            index: 3,
            grab: (0.0, 0.0),
            original: Rect::default(),
        });

        let err = session.detach(sub).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Editor(EditorError::IndexOutOfRange { index: 3, len: 0 })
        ));
        assert!(!session.is_attached());
        assert!(session.editor().mode().is_idle());
        assert!(session.attach().is_ok());
    }
}
