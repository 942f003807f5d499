//! Zoom-to-cursor camera.
//!
//! The camera maps world (image) coordinates to screen coordinates with
//! `screen = world * scale + offset`. Scale is clamped to the configured
//! limits on every update, and all mutation goes through [`Camera::zoom_at`]
//! and [`Camera::pan_by`] so that clamp cannot be bypassed.

use crate::constants::zoom;
use crate::geometry::{Point, Rect};

/// Pan/zoom transform between world and screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    min_scale: f32,
    max_scale: f32,
}

impl Camera {
    /// Create an identity camera (scale=1, no offset) with the given scale limits.
    ///
    /// Inverted limits are swapped. Limits that are not finite and positive
    /// are replaced by the default zoom range.
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        let usable = min_scale.is_finite() && max_scale.is_finite() && min_scale.min(max_scale) > 0.0;
        let (min_scale, max_scale) = if usable {
            (min_scale.min(max_scale), min_scale.max(max_scale))
        } else {
            log::warn!(
                "Unusable zoom limits [{}, {}], using [{}, {}]",
                min_scale,
                max_scale,
                zoom::MIN,
                zoom::MAX
            );
            (zoom::MIN, zoom::MAX)
        };
        Self {
            scale: 1.0_f32.clamp(min_scale, max_scale),
            offset_x: 0.0,
            offset_y: 0.0,
            min_scale,
            max_scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current screen-space offset of the world origin.
    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    /// Convert a screen point to world space.
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    /// Convert a world point to screen space.
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset_x,
            world.y * self.scale + self.offset_y,
        )
    }

    /// Project a world rectangle to screen space, keeping the sign of its size.
    pub fn to_screen_rect(&self, rect: &Rect) -> Rect {
        let anchor = self.to_screen(Point::new(rect.x, rect.y));
        Rect::new(
            anchor.x,
            anchor.y,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }

    /// Convert a screen-space distance (pixels) to a world-space distance.
    pub fn screen_distance_to_world(&self, distance: f32) -> f32 {
        distance / self.scale
    }

    /// Change the scale by `delta_scale` while keeping the world point under
    /// `screen` fixed on screen.
    ///
    /// The algorithm:
    /// 1. Find the world point under the cursor
    /// 2. Clamp the new scale to the limits
    /// 3. Solve `offset = screen - world * new_scale`
    ///
    /// Returns `false` and leaves the camera untouched when the inputs are not
    /// finite or the clamped scale is unchanged.
    pub fn zoom_at(&mut self, screen: Point, delta_scale: f32) -> bool {
        if !screen.is_finite() || !delta_scale.is_finite() {
            log::warn!(
                "Ignoring zoom with non-finite input: point=({}, {}), delta={}",
                screen.x,
                screen.y,
                delta_scale
            );
            return false;
        }

        let new_scale = (self.scale + delta_scale).clamp(self.min_scale, self.max_scale);
        if new_scale == self.scale {
            return false;
        }

        let anchor = self.to_world(screen);
        let new_offset_x = screen.x - anchor.x * new_scale;
        let new_offset_y = screen.y - anchor.y * new_scale;
        if !new_offset_x.is_finite() || !new_offset_y.is_finite() {
            log::warn!("Zoom produced a non-finite offset, keeping previous camera");
            return false;
        }

        self.scale = new_scale;
        self.offset_x = new_offset_x;
        self.offset_y = new_offset_y;
        log::debug!(
            "Zoom-to-cursor: {:.2}x at ({:.1}, {:.1}), offset: ({:.1}, {:.1})",
            self.scale,
            screen.x,
            screen.y,
            self.offset_x,
            self.offset_y
        );
        true
    }

    /// Add a screen-space delta to the offset. Scale is unchanged.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            log::warn!("Ignoring pan with non-finite delta ({}, {})", dx, dy);
            return false;
        }
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.offset_x += dx;
        self.offset_y += dy;
        log::trace!(
            "Panning: delta({:.1}, {:.1}) -> offset({:.1}, {:.1})",
            dx,
            dy,
            self.offset_x,
            self.offset_y
        );
        true
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(zoom::MIN, zoom::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_default_camera_is_identity() {
        let camera = Camera::default();
        assert_eq!(camera.scale(), 1.0);
        assert_eq!(camera.offset(), (0.0, 0.0));
        assert_eq!(camera.to_world(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
    }

    #[test]
    fn test_world_screen_roundtrip() {
        let mut camera = Camera::default();
        camera.pan_by(40.0, -25.0);
        camera.zoom_at(Point::new(300.0, 200.0), 1.5);

        let world = Point::new(123.0, 456.0);
        let back = camera.to_world(camera.to_screen(world));
        assert!(approx_eq(back.x, world.x));
        assert!(approx_eq(back.y, world.y));
    }

    #[test]
    fn test_zoom_at_preserves_cursor_point() {
        let mut camera = Camera::default();
        camera.pan_by(50.0, 30.0);
        let cursor = Point::new(150.0, 120.0);
        let before = camera.to_world(cursor);

        assert!(camera.zoom_at(cursor, 1.0));

        let after = camera.to_world(cursor);
        assert_eq!(camera.scale(), 2.0);
        assert!(approx_eq(before.x, after.x));
        assert!(approx_eq(before.y, after.y));
    }

    #[test]
    fn test_zoom_at_origin_keeps_offset() {
        let mut camera = Camera::default();
        camera.zoom_at(Point::new(0.0, 0.0), 0.5);
        assert!(approx_eq(camera.offset().0, 0.0));
        assert!(approx_eq(camera.offset().1, 0.0));
    }

    #[test]
    fn test_zoom_anchor_holds_over_many_steps() {
        let mut camera = Camera::default();
        let cursors = [
            Point::new(10.0, 700.0),
            Point::new(1590.0, 20.0),
            Point::new(800.0, 400.0),
            Point::new(333.3, 666.6),
        ];
        let deltas = [0.7, -0.2, 1.3, -0.9, 0.05, 2.0, -3.5, 0.4];

        for (i, delta) in deltas.iter().enumerate() {
            let cursor = cursors[i % cursors.len()];
            let before = camera.to_world(cursor);
            camera.zoom_at(cursor, *delta);
            let after = camera.to_world(cursor);
            assert!((before.x - after.x).abs() < 0.01, "x drifted at step {}", i);
            assert!((before.y - after.y).abs() < 0.01, "y drifted at step {}", i);
        }
    }

    #[test]
    fn test_scale_clamped_on_extreme_deltas() {
        let mut camera = Camera::default();
        let cursor = Point::new(400.0, 300.0);

        camera.zoom_at(cursor, 1000.0);
        assert_eq!(camera.scale(), zoom::MAX);
        camera.zoom_at(cursor, 1000.0);
        assert_eq!(camera.scale(), zoom::MAX);

        camera.zoom_at(cursor, -1.0e9);
        assert_eq!(camera.scale(), zoom::MIN);
        camera.zoom_at(cursor, f32::MAX);
        assert_eq!(camera.scale(), zoom::MAX);
    }

    #[test]
    fn test_zoom_at_limit_is_noop() {
        let mut camera = Camera::default();
        camera.pan_by(10.0, 10.0);
        let before = camera;
        assert!(!camera.zoom_at(Point::new(100.0, 100.0), -0.5));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_non_finite_inputs_ignored() {
        let mut camera = Camera::default();
        let before = camera;

        assert!(!camera.zoom_at(Point::new(f32::NAN, 0.0), 1.0));
        assert!(!camera.zoom_at(Point::new(0.0, 0.0), f32::INFINITY));
        assert!(!camera.zoom_at(Point::new(0.0, 0.0), f32::NAN));
        assert!(!camera.pan_by(f32::NEG_INFINITY, 0.0));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_pan_by() {
        let mut camera = Camera::default();
        camera.pan_by(10.0, 20.0);
        camera.pan_by(5.0, -10.0);

        assert_eq!(camera.scale(), 1.0);
        assert_eq!(camera.offset(), (15.0, 10.0));
    }

    #[test]
    fn test_pan_preserves_scale() {
        let mut camera = Camera::default();
        camera.zoom_at(Point::new(0.0, 0.0), 1.5);
        camera.pan_by(100.0, 200.0);
        assert_eq!(camera.scale(), 2.5);
    }

    #[test]
    fn test_screen_rect_projection() {
        let mut camera = Camera::default();
        camera.zoom_at(Point::new(0.0, 0.0), 1.0);
        camera.pan_by(10.0, 20.0);

        let screen = camera.to_screen_rect(&Rect::new(5.0, 5.0, -2.0, 3.0));
        assert_eq!(screen, Rect::new(20.0, 30.0, -4.0, 6.0));
    }

    #[test]
    fn test_custom_limits() {
        let mut camera = Camera::new(0.5, 2.0);
        camera.zoom_at(Point::new(0.0, 0.0), -10.0);
        assert_eq!(camera.scale(), 0.5);
        camera.zoom_at(Point::new(0.0, 0.0), 10.0);
        assert_eq!(camera.scale(), 2.0);
    }

    #[test]
    fn test_inverted_limits_are_swapped() {
        let mut camera = Camera::new(5.0, 2.0);
        assert_eq!(camera.scale(), 2.0);
        camera.zoom_at(Point::new(0.0, 0.0), 10.0);
        assert_eq!(camera.scale(), 5.0);
    }

    #[test]
    fn test_unusable_limits_fall_back_to_defaults() {
        for (min, max) in [(f32::NAN, 2.0), (1.0, f32::INFINITY), (0.0, 3.0)] {
            let mut camera = Camera::new(min, max);
            assert_eq!(camera.scale(), 1.0);
            camera.zoom_at(Point::new(0.0, 0.0), 100.0);
            assert_eq!(camera.scale(), zoom::MAX);
        }
    }
}
