/// Width of the sample level in world units (1 unit = 1 logical pixel).
///
/// Only the built-in test area and the player spawn use this. Levels loaded from
/// file define their own playable area through their segments.
pub const LEVEL_WIDTH: f32 = 2000.0;

/// Height of the sample level in world units.
pub const LEVEL_HEIGHT: f32 = 1200.0;

/// Diameter of the player circle (and its sprite) in world units.
pub const PLAYER_SIZE: f32 = 50.0;

/// Player body mass.
pub const PLAYER_MASS: f32 = 1.0;

/// Friction coefficient of the player's circle collider.
pub const PLAYER_FRICTION: f32 = 0.7;

/// Player spawn position: slightly above the ground, inside the level bounds.
pub const PLAYER_SPAWN: [f32; 2] = [100.0, LEVEL_HEIGHT - 100.0];

/// Gravity magnitude (units/s^2). World Y is up, so this is applied along -Y.
pub const GRAVITY: f32 = 900.0;

/// Baseline impulse applied per frame for the up/down keys.
pub const IMPULSE_STRENGTH: f32 = 50.0;

/// Impulse applied per frame for the left/right keys.
///
/// Half of [`IMPULSE_STRENGTH`]. The asymmetry is a tuning choice.
pub const HALF_IMPULSE: f32 = IMPULSE_STRENGTH / 2.0;

/// Camera follow rate, in 1/s.
///
/// Convention:
/// - `camera += (target - camera) * CAMERA_SMOOTHING * dt`
/// - values where `CAMERA_SMOOTHING * dt > 1` overshoot the target
pub const CAMERA_SMOOTHING: f32 = 5.0;

/// Upper bound on the force the drag constraint may exert on the dragged body.
///
/// High enough for responsive dragging, low enough that the body can escape the
/// drag under large external forces.
pub const DRAG_MAX_FORCE: f32 = 10_000.0;

/// Stiffness of the drag constraint's positional motors.
pub const DRAG_STIFFNESS: f32 = 1_000.0;

/// Damping of the drag constraint's positional motors.
pub const DRAG_DAMPING: f32 = 50.0;

/// Substitute for a zero or negative frame delta anywhere we divide by it.
pub const DT_EPSILON: f32 = 1.0e-6;

/// Friction of a level segment that does not specify one.
pub const DEFAULT_SEGMENT_FRICTION: f32 = 1.0;

/// Height of the floor of the built-in test area.
pub const TEST_AREA_FLOOR_Y: f32 = 40.0;

/// Rapier length unit: typical object size in world units.
///
/// The sandbox works in pixels, so tolerances must scale with the player size.
pub const PHYSICS_LENGTH_UNIT: f32 = PLAYER_SIZE;

/// Clamp a frame delta so it is always strictly positive.
#[inline]
pub fn guard_dt(dt: f32) -> f32 {
    if dt <= 0.0 || !dt.is_finite() {
        DT_EPSILON
    } else {
        dt
    }
}
