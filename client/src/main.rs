// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod camera;
mod drag;
mod input;
mod player;
mod viewport;
mod world;

use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() -> AppExit {
    let level = world::LevelSource::from_args(std::env::args().skip(1));
    App::new()
        .insert_resource(level)
        .add_plugins(AppPlugin)
        .run()
}

/// Order of the sandbox work inside a frame.
///
/// Everything that touches the physics world runs in one chain, so the frame
/// is strictly sequential: read input, simulate, then draw.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Window size and cursor position.
    Viewport,
    /// Pointer drag and keyboard impulses.
    Input,
    /// Camera follow and the physics step.
    Simulate,
    /// Segment lines and the player sprite.
    Present,
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Physics Example".to_string(),
                resolution: WindowResolution::new(800, 600),
                resizable: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        // Sky blue backdrop.
        app.insert_resource(ClearColor(Color::srgb_u8(135, 206, 235)));

        app.configure_sets(
            Update,
            (
                FrameSet::Viewport,
                FrameSet::Input,
                FrameSet::Simulate,
                FrameSet::Present,
            )
                .chain(),
        );

        app.add_plugins((
            input::plugin,
            viewport::plugin,
            world::plugin,
            camera::plugin,
            player::plugin,
            drag::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
