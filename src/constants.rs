//! Global constants for the canvas editor

/// Logical width of the drawing surface
pub const SURFACE_WIDTH: f32 = 1600.0;

/// Logical height of the drawing surface
pub const SURFACE_HEIGHT: f32 = 800.0;

/// Zoom limits and wheel mapping.
pub mod zoom {
    /// Smallest allowed camera scale
    pub const MIN: f32 = 1.0;
    /// Largest allowed camera scale
    pub const MAX: f32 = 4.0;
    /// Scale change per unit of wheel delta
    pub const WHEEL_SENSITIVITY: f32 = 0.01;
}

/// Distance from a rectangle edge, in screen pixels, that still counts as a resize grab
pub const EDGE_THRESHOLD_PX: f32 = 10.0;
