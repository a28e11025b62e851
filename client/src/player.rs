use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};
use leafwing_input_manager::prelude::ActionState;
use sandbox_shared::{PLAYER_SIZE, PlayerController, world_to_screen};

use crate::{
    FrameSet,
    camera::{CameraFocus, RenderCamera, screen_to_render},
    input::{InputAction, directional_input},
    viewport::ViewportSize,
    world::Sandbox,
};

/// The player's physics handles.
#[derive(Resource, Debug)]
pub struct PlayerBody(pub PlayerController);

/// Marker for the sprite that shows the player body.
#[derive(Component)]
pub struct PlayerSprite;

/// Side of the generated player texture in pixels.
const SPRITE_TEXTURE_SIZE: u32 = 64;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(PostStartup, spawn_sprite);
    app.add_systems(Update, handle_input.in_set(FrameSet::Input));
    app.add_systems(Update, place_sprite.in_set(FrameSet::Present));
}

fn spawn_sprite(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let image = images.add(player_image(SPRITE_TEXTURE_SIZE));
    commands.spawn((
        PlayerSprite,
        Sprite {
            image,
            custom_size: Some(Vec2::splat(PLAYER_SIZE)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));
}

pub(crate) fn handle_input(
    actions: Res<ActionState<InputAction>>,
    player: Res<PlayerBody>,
    mut sandbox: ResMut<Sandbox>,
) {
    player
        .0
        .handle_input(&mut sandbox.physics, directional_input(&actions));
}

/// Put the sprite on the body's screen position, rotated with the body.
fn place_sprite(
    mut sprite: Single<&mut Transform, With<PlayerSprite>>,
    camera: Single<(&Camera, &GlobalTransform), With<RenderCamera>>,
    player: Res<PlayerBody>,
    sandbox: Res<Sandbox>,
    focus: Res<CameraFocus>,
    viewport: Res<ViewportSize>,
) {
    let (Some(position), Some(angle)) = (
        player.0.position(&sandbox.physics),
        player.0.angle(&sandbox.physics),
    ) else {
        return;
    };
    let screen = world_to_screen(position, focus.0.position, viewport.0);
    let (camera, camera_transform) = *camera;
    let Some(center) = screen_to_render(camera, camera_transform, screen) else {
        return;
    };

    sprite.translation = center.extend(sprite.translation.z);
    sprite.rotation = Quat::from_rotation_z(angle);
}

/// A red disc with a darker band from the center to the right edge, so the
/// body's roll is visible.
fn player_image(size: u32) -> Image {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;
    let band = size as f32 * 0.06;

    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let pixel = if dx * dx + dy * dy > radius * radius {
                [0, 0, 0, 0]
            } else if dx > 0.0 && dy.abs() < band {
                [120, 0, 0, 255]
            } else {
                [255, 0, 0, 255]
            };
            data.extend_from_slice(&pixel);
        }
    }

    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}
