//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).
//!
//! Besides the perf overlay it outlines the player collider and, while a drag is
//! active, draws the pin from the pointer to the grab point on the body.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use sandbox_shared::{drag::world_anchor, world_to_screen};

use crate::{
    FrameSet,
    camera::{CameraFocus, RenderCamera, screen_to_render},
    drag::Drag,
    player::PlayerBody,
    viewport::ViewportSize,
    world::Sandbox,
};

const COLLIDER_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const PIN_COLOR: Color = Color::srgb(0.1, 0.2, 1.0);

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, draw_player_debug.in_set(FrameSet::Present));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn draw_player_debug(
    mut gizmos: Gizmos,
    camera: Single<(&Camera, &GlobalTransform), With<RenderCamera>>,
    player: Res<PlayerBody>,
    drag: Res<Drag>,
    sandbox: Res<Sandbox>,
    focus: Res<CameraFocus>,
    viewport: Res<ViewportSize>,
) {
    let (camera, camera_transform) = *camera;
    let to_render = |world: nalgebra::Vector2<f32>| {
        let screen = world_to_screen(world, focus.0.position, viewport.0);
        screen_to_render(camera, camera_transform, screen)
    };

    let (Some(position), Some(angle)) = (
        player.0.position(&sandbox.physics),
        player.0.angle(&sandbox.physics),
    ) else {
        return;
    };
    if let Some(center) = to_render(position) {
        gizmos.circle_2d(center, player.0.radius, COLLIDER_COLOR);
    }

    let Some(state) = drag.0.state() else {
        return;
    };
    let anchor = world_anchor(state.local_anchor, position, angle);
    if let (Some(from), Some(to)) = (to_render(state.previous_pointer), to_render(anchor)) {
        gizmos.line_2d(from, to, PIN_COLOR);
    }
}
