//! Rect Canvas - rectangle annotation over a pannable, zoomable image
//!
//! The crate holds the editor core: the pan/zoom camera, the rectangle store,
//! the gesture state machine that turns pointer and wheel input into
//! mutations, and the pure render pass that turns state into draw calls.
//! Windowing, image decoding and the drawing backend belong to the host.

pub mod camera;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod replay;
pub mod session;
pub mod store;

pub use camera::Camera;
pub use config::EditorConfig;
pub use editor::{Editor, Mode};
pub use error::{EditorError, SessionError};
pub use geometry::{Point, Rect};
pub use input::{EventResponse, InputEvent, MouseButton};
pub use render::{render, CommandRecorder, DrawCommand, Raster, Surface};
pub use session::{Session, Subscription};
pub use store::{AnnotationStore, Edge};
