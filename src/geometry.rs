//! Core geometry types shared by the camera, the store and the renderer.
//!
//! Rectangles are stored exactly as the user shaped them, so `width` and
//! `height` may be negative while a drag crosses its anchor. Queries go
//! through [`Rect::normalized`] so they behave the same regardless of sign.

use serde::{Deserialize, Serialize};

/// A 2D point, either in screen or world space depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise difference `self - other`.
    pub fn delta_from(&self, other: Point) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }
}

/// An axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Anchor corner X coordinate
    pub x: f32,
    /// Anchor corner Y coordinate
    pub y: f32,
    /// Signed width (negative while dragged leftwards of the anchor)
    pub width: f32,
    /// Signed height (negative while dragged above the anchor)
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A zero-sized rectangle anchored at `point`.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Return the same area with a top-left anchor and non-negative size.
    pub fn normalized(&self) -> Self {
        Self {
            x: self.left(),
            y: self.top(),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Smallest X covered by the rectangle.
    pub fn left(&self) -> f32 {
        self.x.min(self.x + self.width)
    }

    /// Largest X covered by the rectangle.
    pub fn right(&self) -> f32 {
        self.x.max(self.x + self.width)
    }

    /// Smallest Y covered by the rectangle.
    pub fn top(&self) -> f32 {
        self.y.min(self.y + self.height)
    }

    /// Largest Y covered by the rectangle.
    pub fn bottom(&self) -> f32 {
        self.y.max(self.y + self.height)
    }

    /// Check if a point lies inside or on the border of the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}
