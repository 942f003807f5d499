//! Raw input events delivered by the host shell.
//!
//! Positions are in screen space relative to the drawing surface's top-left
//! corner; the host is responsible for subtracting the surface position.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Mouse buttons the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Left button: draw, select, move, resize
    Primary,
    /// Right button: pan
    Secondary,
    /// Middle button
    Middle,
    Other(u16),
}

/// One input event on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse button pressed.
    Pressed { button: MouseButton, position: Point },
    /// Mouse moved.
    Moved { position: Point },
    /// Mouse button released.
    Released { button: MouseButton, position: Point },
    /// Wheel scrolled. Positive `delta` zooms in.
    Wheel { delta: f32, position: Point },
    /// The platform is about to open its context menu on the surface.
    ContextMenu { position: Point },
    /// Abort the active gesture (Escape, pointer capture lost).
    Cancel,
}

impl InputEvent {
    /// Screen position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Pressed { position, .. }
            | InputEvent::Moved { position }
            | InputEvent::Released { position, .. }
            | InputEvent::Wheel { position, .. }
            | InputEvent::ContextMenu { position } => Some(*position),
            InputEvent::Cancel => None,
        }
    }
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Editor state changed and the surface should be redrawn
    pub redraw: bool,
    /// The platform's default action (e.g. context menu) must not run
    pub suppress_default: bool,
}
