//! Gesture state for the editor.

use crate::geometry::{Point, Rect};
use crate::input::MouseButton;
use crate::store::{AnnotationStore, Edge};

/// The one gesture currently consuming pointer moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    /// No button held.
    #[default]
    Idle,
    /// Drawing a new rectangle. The draft's anchor is the press point.
    Drawing { draft: Rect },
    /// Dragging the view with the secondary button.
    Panning {
        /// Last screen position seen, for per-move deltas
        last: Point,
    },
    /// Dragging the selected rectangle.
    Moving {
        index: usize,
        /// World offset from the rectangle anchor to the grab point
        grab: (f32, f32),
        /// Rectangle before the gesture, restored on cancel
        original: Rect,
    },
    /// Dragging one edge of the selected rectangle.
    Resizing {
        index: usize,
        edge: Edge,
        /// Rectangle before the gesture, restored on cancel
        original: Rect,
    },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::Drawing { .. } => "Drawing",
            Mode::Panning { .. } => "Panning",
            Mode::Moving { .. } => "Moving",
            Mode::Resizing { .. } => "Resizing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    /// The button whose release ends this gesture.
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            Mode::Idle => None,
            Mode::Panning { .. } => Some(MouseButton::Secondary),
            Mode::Drawing { .. } | Mode::Moving { .. } | Mode::Resizing { .. } => {
                Some(MouseButton::Primary)
            }
        }
    }

    /// The draft rectangle, while drawing.
    pub fn draft(&self) -> Option<Rect> {
        match self {
            Mode::Drawing { draft } => Some(*draft),
            _ => None,
        }
    }
}

/// What a primary press at a given point should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    /// Grab an edge of the selected rectangle.
    Resize { index: usize, edge: Edge },
    /// Drag the selected rectangle.
    Move { index: usize },
    /// Select a different rectangle; no gesture starts.
    Select { index: usize },
    /// Clear the selection and start a new rectangle.
    Draw,
}

/// Decide what a primary press does, by priority:
/// resize edge of the selection, move the selection, select another
/// rectangle, draw on empty space.
///
/// `threshold` is the edge grab distance in world units.
pub fn classify_press(store: &AnnotationStore, world: Point, threshold: f32) -> PressAction {
    if let Some(index) = store.selected() {
        // Selection always points into the store
        if let Ok(Some(edge)) = store.edge_near(world, index, threshold) {
            return PressAction::Resize { index, edge };
        }
        if store.get(index).is_ok_and(|rect| rect.contains(world)) {
            return PressAction::Move { index };
        }
    }

    match store.hit_test(world) {
        Some(index) => PressAction::Select { index },
        None => PressAction::Draw,
    }
}

/// Apply an edge drag to `original`, keeping the opposite edge fixed.
///
/// Size may go negative when the dragged edge crosses the fixed one.
pub fn resize_edge(original: &Rect, edge: Edge, world: Point) -> Rect {
    let mut rect = *original;
    match edge {
        Edge::Left => {
            rect.x = world.x;
            rect.width = original.x + original.width - world.x;
        }
        Edge::Right => {
            rect.width = world.x - original.x;
        }
        Edge::Top => {
            rect.y = world.y;
            rect.height = original.y + original.height - world.y;
        }
        Edge::Bottom => {
            rect.height = world.y - original.y;
        }
    }
    rect
}
