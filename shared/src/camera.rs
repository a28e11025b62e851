use nalgebra::Vector2;

use crate::CAMERA_SMOOTHING;

/// World-space focus point of the view, eased toward a target every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFollow {
    pub position: Vector2<f32>,
    /// Fraction of the remaining distance covered per second.
    pub smoothing_rate: f32,
}

impl CameraFollow {
    pub fn new(position: Vector2<f32>) -> Self {
        Self {
            position,
            smoothing_rate: CAMERA_SMOOTHING,
        }
    }

    /// First-order exponential smoothing toward `target`.
    ///
    /// Not critically damped: when `smoothing_rate * dt > 1` the camera passes
    /// the target. The factor is left unclamped.
    pub fn update(&mut self, target: Vector2<f32>, dt: f32) {
        self.position += (target - self.position) * self.smoothing_rate * dt;
    }
}
