use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use sandbox_shared::{DragController, screen_to_world};

use crate::{
    FrameSet,
    camera::CameraFocus,
    input::InputAction,
    player,
    viewport::{PointerState, ViewportSize},
    world::Sandbox,
};

/// Pointer drag of the player body.
#[derive(Resource, Debug)]
pub struct Drag(pub DragController);

pub(super) fn plugin(app: &mut App) {
    // Grab/release resolve before this frame's keyboard impulses, as the pointer
    // events arrive first.
    app.add_systems(
        Update,
        handle_pointer
            .in_set(FrameSet::Input)
            .before(player::handle_input),
    );
}

fn handle_pointer(
    actions: Res<ActionState<InputAction>>,
    pointer: Res<PointerState>,
    viewport: Res<ViewportSize>,
    focus: Res<CameraFocus>,
    mut drag: ResMut<Drag>,
    mut sandbox: ResMut<Sandbox>,
    time: Res<Time>,
) {
    let physics = &mut sandbox.physics;
    let pointer_world = pointer
        .screen
        .map(|screen| screen_to_world(screen, focus.0.position, viewport.0));

    if actions.just_pressed(&InputAction::Drag) {
        if let Some(at) = pointer_world {
            if drag.0.start_drag(physics, at) {
                tracing::debug!("grabbed player at ({:.1}, {:.1})", at.x, at.y);
            }
        }
    } else if actions.just_released(&InputAction::Drag) {
        drag.0.end_drag(physics);
    }

    if let Some(at) = pointer_world {
        drag.0.update_drag(physics, at, time.delta_secs());
    }
}
