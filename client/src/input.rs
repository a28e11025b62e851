use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use sandbox_shared::DirectionalInput;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Left,
    Right,
    Up,
    Down,
    /// Grab and fling the player with the pointer.
    Drag,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Left, KeyCode::KeyA);
    input_map.insert(InputAction::Left, KeyCode::ArrowLeft);
    input_map.insert(InputAction::Right, KeyCode::KeyD);
    input_map.insert(InputAction::Right, KeyCode::ArrowRight);
    input_map.insert(InputAction::Up, KeyCode::KeyW);
    input_map.insert(InputAction::Up, KeyCode::ArrowUp);
    input_map.insert(InputAction::Down, KeyCode::KeyS);
    input_map.insert(InputAction::Down, KeyCode::ArrowDown);
    input_map.insert(InputAction::Drag, MouseButton::Left);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}

/// Snapshot of the held directional actions for this frame.
pub fn directional_input(actions: &ActionState<InputAction>) -> DirectionalInput {
    DirectionalInput {
        left: actions.pressed(&InputAction::Left),
        right: actions.pressed(&InputAction::Right),
        up: actions.pressed(&InputAction::Up),
        down: actions.pressed(&InputAction::Down),
    }
}
