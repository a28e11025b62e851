//! World <-> screen coordinate mapping for a camera-centered viewport.
//!
//! Conventions
//! - World space is Y-up; screen space is Y-down with the origin at the top-left.
//! - The camera focus maps to the viewport center.
//! - One world unit is one logical pixel; there is no zoom.

use nalgebra::Vector2;

/// Size of the rendered viewport in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half_extents(&self) -> Vector2<f32> {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Map a world-space point to integer screen pixels.
///
/// The result is truncated toward zero, matching how pixel coordinates are
/// handed to the renderer.
#[inline]
pub fn world_to_screen(point: Vector2<f32>, camera: Vector2<f32>, viewport: Viewport) -> (i32, i32) {
    let half = viewport.half_extents();
    let x = (point.x - camera.x) + half.x;
    let y = half.y - (point.y - camera.y);
    (x as i32, y as i32)
}

/// Inverse of [`world_to_screen`], used for translating pointer positions.
#[inline]
pub fn screen_to_world(point: (i32, i32), camera: Vector2<f32>, viewport: Viewport) -> Vector2<f32> {
    let half = viewport.half_extents();
    let x = point.0 as f32 - half.x + camera.x;
    let y = camera.y - (point.1 as f32 - half.y);
    Vector2::new(x, y)
}
