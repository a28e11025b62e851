pub mod camera;
pub mod constants;
pub mod drag;
pub mod level;
pub mod physics;
pub mod player;
pub mod transform;

pub use camera::CameraFollow;
pub use constants::{
    CAMERA_SMOOTHING, DEFAULT_SEGMENT_FRICTION, DRAG_DAMPING, DRAG_MAX_FORCE, DRAG_STIFFNESS,
    DT_EPSILON, GRAVITY, HALF_IMPULSE, IMPULSE_STRENGTH, LEVEL_HEIGHT, LEVEL_WIDTH,
    PHYSICS_LENGTH_UNIT, PLAYER_FRICTION, PLAYER_MASS, PLAYER_SIZE, PLAYER_SPAWN,
    TEST_AREA_FLOOR_Y, guard_dt,
};
pub use drag::{DragController, DragState};
pub use level::{LevelDef, LevelError, LevelFormat, SegmentDef};
pub use physics::{PhysicsWorld, StaticSegment, rapier2d};
pub use player::{DirectionalInput, PlayerController};
pub use transform::{Viewport, screen_to_world, world_to_screen};
