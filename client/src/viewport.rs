use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};
use sandbox_shared::Viewport;

use crate::FrameSet;

/// Current window size in logical pixels.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ViewportSize(pub Viewport);

impl Default for ViewportSize {
    fn default() -> Self {
        Self(Viewport::new(800.0, 600.0))
    }
}

/// Last known cursor position in screen pixels (origin top-left, Y down).
///
/// Keeps the previous value while the cursor is outside the window so an active
/// drag holds still instead of jumping.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerState {
    pub screen: Option<(i32, i32)>,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ViewportSize>();
    app.init_resource::<PointerState>();
    app.add_systems(Startup, read_initial_size);
    app.add_systems(
        Update,
        (track_resize, track_pointer).chain().in_set(FrameSet::Viewport),
    );
}

fn read_initial_size(window: Single<&Window, With<PrimaryWindow>>, mut viewport: ResMut<ViewportSize>) {
    viewport.0 = Viewport::new(window.width(), window.height());
}

fn track_resize(mut messages: MessageReader<WindowResized>, mut viewport: ResMut<ViewportSize>) {
    for message in messages.read() {
        viewport.0 = Viewport::new(message.width, message.height);
        tracing::debug!("viewport resized to {}x{}", message.width, message.height);
    }
}

fn track_pointer(window: Single<&Window, With<PrimaryWindow>>, mut pointer: ResMut<PointerState>) {
    if let Some(cursor) = window.cursor_position() {
        pointer.screen = Some((cursor.x as i32, cursor.y as i32));
    }
}
