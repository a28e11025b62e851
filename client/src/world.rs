use std::path::PathBuf;

use bevy::prelude::*;
use nalgebra::Vector2;
use sandbox_shared::{
    CameraFollow, DragController, GRAVITY, LEVEL_HEIGHT, LEVEL_WIDTH, LevelDef, PLAYER_SPAWN,
    PhysicsWorld, PlayerController, StaticSegment, world_to_screen,
};

use crate::{
    FrameSet,
    camera::{CameraFocus, RenderCamera, screen_to_render},
    drag::Drag,
    player::PlayerBody,
    viewport::ViewportSize,
};

/// Where the level geometry comes from.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub enum LevelSource {
    File(PathBuf),
    /// The built-in boxed area.
    TestArea,
}

impl LevelSource {
    pub fn default_level() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("levels")
            .join("sample_level.json")
    }

    /// `--test-area` selects the boxed area, any other argument is a level path.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        match args.next() {
            Some(arg) if arg == "--test-area" => Self::TestArea,
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::File(Self::default_level()),
        }
    }
}

/// The physics simulation plus the static geometry it was built from.
#[derive(Resource)]
pub struct Sandbox {
    pub physics: PhysicsWorld,
    pub segments: Vec<StaticSegment>,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, (setup, configure_gizmos));
    app.add_systems(Update, step.in_set(FrameSet::Simulate));
    app.add_systems(Update, draw_segments.in_set(FrameSet::Present));
}

fn setup(mut commands: Commands, source: Res<LevelSource>) -> Result {
    let level = match &*source {
        LevelSource::File(path) => LevelDef::load(path)?,
        LevelSource::TestArea => LevelDef::test_area(LEVEL_WIDTH, LEVEL_HEIGHT),
    };

    let mut physics = PhysicsWorld::new(Vector2::new(0.0, -GRAVITY));
    // The player exists before anything reads its position.
    let spawn = Vector2::from(PLAYER_SPAWN);
    let player = PlayerController::spawn(&mut physics, spawn);
    let segments = physics.add_static_segments(&level);
    tracing::info!("sandbox ready: {} static segments", segments.len());

    commands.insert_resource(CameraFocus(CameraFollow::new(spawn)));
    commands.insert_resource(Drag(DragController::new(player.body, player.collider)));
    commands.insert_resource(PlayerBody(player));
    commands.insert_resource(Sandbox { physics, segments });
    Ok(())
}

fn configure_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = 2.0;
}

pub(crate) fn step(mut sandbox: ResMut<Sandbox>, time: Res<Time>) {
    sandbox.physics.step(time.delta_secs());
}

fn draw_segments(
    mut gizmos: Gizmos,
    sandbox: Res<Sandbox>,
    focus: Res<CameraFocus>,
    viewport: Res<ViewportSize>,
    camera: Single<(&Camera, &GlobalTransform), With<RenderCamera>>,
) {
    let (camera, camera_transform) = *camera;
    for segment in &sandbox.segments {
        let a = world_to_screen(segment.a, focus.0.position, viewport.0);
        let b = world_to_screen(segment.b, focus.0.position, viewport.0);
        let (Some(a), Some(b)) = (
            screen_to_render(camera, camera_transform, a),
            screen_to_render(camera, camera_transform, b),
        ) else {
            continue;
        };
        gizmos.line_2d(a, b, Color::BLACK);
    }
}
