//! Rectangle annotation storage.
//!
//! The store keeps rectangles in insertion order. That order is the z-order
//! for hit-testing (first match wins) and for rendering (later draws on top).
//! Selection is held here as well, so every mutation can re-check that the
//! selected index still points into the store.

use crate::error::EditorError;
use crate::geometry::{Point, Rect};

/// Which edge of a rectangle a point is close to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Edges in the order they are checked; earlier entries win at corners.
    pub const CHECK_ORDER: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

/// Ordered collection of rectangles plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    rects: Vec<Rect>,
    selected: Option<usize>,
    /// Set when rectangles or selection change; cleared after a redraw.
    dirty: bool,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store has been modified since the last `clear_dirty()`.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Call after redrawing.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Append a rectangle and return its index.
    pub fn append(&mut self, rect: Rect) -> usize {
        self.rects.push(rect);
        self.dirty = true;
        let index = self.rects.len() - 1;
        log::debug!(
            "Appended rectangle {} at ({:.1}, {:.1}) size {:.1}x{:.1}",
            index,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        index
    }

    /// Overwrite the rectangle at `index`.
    pub fn replace(&mut self, index: usize, rect: Rect) -> Result<(), EditorError> {
        let len = self.rects.len();
        let slot = self
            .rects
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })?;
        if *slot != rect {
            *slot = rect;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<Rect, EditorError> {
        self.rects
            .get(index)
            .copied()
            .ok_or(EditorError::IndexOutOfRange {
                index,
                len: self.rects.len(),
            })
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Find the first (lowest-index) rectangle containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.rects.iter().position(|rect| rect.contains(point))
    }

    /// Report the first edge of rectangle `index` within `threshold` of `point`.
    ///
    /// Distance is measured to the edge segment, so a point must also lie
    /// within the rectangle's span (widened by `threshold`) along the edge.
    /// Edges are checked left, right, top, bottom; only one is reported.
    pub fn edge_near(
        &self,
        point: Point,
        index: usize,
        threshold: f32,
    ) -> Result<Option<Edge>, EditorError> {
        let rect = self.get(index)?;
        let within_x = point.x >= rect.left() - threshold && point.x <= rect.right() + threshold;
        let within_y = point.y >= rect.top() - threshold && point.y <= rect.bottom() + threshold;

        let edge = Edge::CHECK_ORDER.into_iter().find(|edge| match edge {
            Edge::Left => within_y && (point.x - rect.x).abs() < threshold,
            Edge::Right => within_y && (point.x - (rect.x + rect.width)).abs() < threshold,
            Edge::Top => within_x && (point.y - rect.y).abs() < threshold,
            Edge::Bottom => within_x && (point.y - (rect.y + rect.height)).abs() < threshold,
        });
        Ok(edge)
    }

    /// Currently selected rectangle index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Change the selection. `Some(index)` must refer to a stored rectangle.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), EditorError> {
        if let Some(index) = index {
            if index >= self.rects.len() {
                return Err(EditorError::IndexOutOfRange {
                    index,
                    len: self.rects.len(),
                });
            }
        }
        if self.selected != index {
            log::debug!("Selection changed: {:?} -> {:?}", self.selected, index);
            self.selected = index;
            self.dirty = true;
        }
        Ok(())
    }
}
