//! Frame projection.
//!
//! [`render`] is a pure function of the scene (image, rectangles, selection,
//! draft, camera) that issues draw calls to a [`Surface`]. The actual drawing
//! backend lives in the host; [`CommandRecorder`] is a surface that records
//! the calls, which is what the replay tool and the tests use.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::geometry::Rect;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const RED: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const DRAFT_BLUE: Color = Color {
        r: 0.2,
        g: 0.5,
        b: 1.0,
        a: 1.0,
    };
}

/// How a rectangle outline is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in screen pixels
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// The three outline styles a frame can use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Styles {
    /// Committed, unselected rectangles
    #[serde(default = "default_normal")]
    pub normal: StrokeStyle,
    /// The selected rectangle
    #[serde(default = "default_highlighted")]
    pub highlighted: StrokeStyle,
    /// The rectangle currently being drawn
    #[serde(default = "default_draft")]
    pub draft: StrokeStyle,
}

fn default_normal() -> StrokeStyle {
    StrokeStyle::new(Color::BLACK, 1.0)
}

fn default_highlighted() -> StrokeStyle {
    StrokeStyle::new(Color::RED, 1.0)
}

fn default_draft() -> StrokeStyle {
    StrokeStyle::new(Color::DRAFT_BLUE, 1.0)
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            normal: default_normal(),
            highlighted: default_highlighted(),
            draft: default_draft(),
        }
    }
}

/// A decoded background image. Only its pixel size matters to the editor;
/// the pixels themselves stay with the host's drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Output sink for a frame.
pub trait Surface {
    /// Erase the surface area `(0, 0)` to `(width, height)`.
    fn clear(&mut self, width: f32, height: f32);

    /// Draw the background image scaled into the given screen rectangle.
    fn draw_image(&mut self, image: &Raster, x: f32, y: f32, width: f32, height: f32);

    /// Stroke the outline of a screen-space rectangle.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle);
}

/// A draw call captured by [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    DrawImage {
        image: Raster,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    StrokeRect {
        rect: Rect,
        style: StrokeStyle,
    },
}

/// Surface that keeps the draw calls of the most recent frame.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last `clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Rectangles stroked in the current frame, in draw order.
    pub fn stroked(&self) -> Vec<(Rect, StrokeStyle)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeRect { rect, style } => Some((*rect, *style)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
        self.frames += 1;
    }

    fn draw_image(&mut self, image: &Raster, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::DrawImage {
            image: *image,
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            style: *style,
        });
    }
}

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Logical surface size as `(width, height)`
    pub size: (f32, f32),
    pub image: Option<&'a Raster>,
    pub rects: &'a [Rect],
    pub selected: Option<usize>,
    pub draft: Option<Rect>,
    pub camera: &'a Camera,
    pub styles: &'a Styles,
}

/// Draw one frame of `scene` onto `surface`.
///
/// Rectangles are stroked in store order, so later ones end up on top; the
/// selected one only changes style, it is never reordered. The draft, if
/// any, is stroked last.
pub fn render<S: Surface + ?Sized>(scene: &Scene<'_>, surface: &mut S) {
    let (width, height) = scene.size;
    surface.clear(width, height);

    if let Some(image) = scene.image {
        let (x, y) = scene.camera.offset();
        let scale = scene.camera.scale();
        surface.draw_image(
            image,
            x,
            y,
            image.width as f32 * scale,
            image.height as f32 * scale,
        );
    }

    for (index, rect) in scene.rects.iter().enumerate() {
        let style = if scene.selected == Some(index) {
            &scene.styles.highlighted
        } else {
            &scene.styles.normal
        };
        surface.stroke_rect(scene.camera.to_screen_rect(rect), style);
    }

    if let Some(draft) = scene.draft {
        surface.stroke_rect(scene.camera.to_screen_rect(&draft), &scene.styles.draft);
    }
}
