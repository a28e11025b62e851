use bevy::prelude::*;
use sandbox_shared::CameraFollow;

use crate::{
    FrameSet,
    player::PlayerBody,
    world::{self, Sandbox},
};

/// The sandbox camera focus in world space.
#[derive(Resource, Debug)]
pub struct CameraFocus(pub CameraFollow);

/// Marker for the Bevy camera that renders the sandbox.
///
/// It stays at the origin: scrolling is done by the sandbox transform, and this
/// camera only maps screen pixels onto its own render space.
#[derive(Component)]
pub struct RenderCamera;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(
        Update,
        follow_player.in_set(FrameSet::Simulate).before(world::step),
    );
}

fn add_camera(mut commands: Commands) {
    commands.spawn((RenderCamera, Camera2d, Transform::default()));
}

fn follow_player(
    mut focus: ResMut<CameraFocus>,
    player: Res<PlayerBody>,
    sandbox: Res<Sandbox>,
    time: Res<Time>,
) {
    let Some(target) = player.0.position(&sandbox.physics) else {
        return;
    };
    focus.0.update(target, time.delta_secs());
}

/// Map integer screen pixels onto the render camera's 2D space.
pub fn screen_to_render(camera: &Camera, transform: &GlobalTransform, screen: (i32, i32)) -> Option<Vec2> {
    camera
        .viewport_to_world_2d(transform, Vec2::new(screen.0 as f32, screen.1 as f32))
        .ok()
}
