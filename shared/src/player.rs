use nalgebra::Vector2;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

use crate::{
    HALF_IMPULSE, IMPULSE_STRENGTH, PLAYER_FRICTION, PLAYER_MASS, PLAYER_SIZE, PhysicsWorld,
};

/// Snapshot of the directional keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalInput {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Sum of the world-axis impulses for every held key.
    ///
    /// Left/right use [`HALF_IMPULSE`], up/down use [`IMPULSE_STRENGTH`].
    pub fn impulse(&self) -> Vector2<f32> {
        let mut impulse = Vector2::zeros();
        if self.left {
            impulse.x -= HALF_IMPULSE;
        }
        if self.right {
            impulse.x += HALF_IMPULSE;
        }
        if self.up {
            impulse.y += IMPULSE_STRENGTH;
        }
        if self.down {
            impulse.y -= IMPULSE_STRENGTH;
        }
        impulse
    }
}

/// The player circle and its keyboard controls.
#[derive(Clone, Copy, Debug)]
pub struct PlayerController {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub radius: f32,
}

impl PlayerController {
    pub fn spawn(world: &mut PhysicsWorld, position: Vector2<f32>) -> Self {
        let radius = PLAYER_SIZE / 2.0;
        let (body, collider) = world.spawn_circle(position, radius, PLAYER_MASS, PLAYER_FRICTION);
        Self {
            body,
            collider,
            radius,
        }
    }

    /// Apply one impulse per held key at the body's world position.
    ///
    /// Impulses are along world axes so the controls do not depend on how the
    /// circle has rolled.
    pub fn handle_input(&self, world: &mut PhysicsWorld, pressed: DirectionalInput) {
        if pressed.is_idle() {
            return;
        }
        let Some(position) = world.body_position(self.body) else {
            log::warn!("player body {:?} is missing", self.body);
            return;
        };
        world.apply_impulse_at_world_point(self.body, pressed.impulse(), position);
    }

    pub fn position(&self, world: &PhysicsWorld) -> Option<Vector2<f32>> {
        world.body_position(self.body)
    }

    pub fn angle(&self, world: &PhysicsWorld) -> Option<f32> {
        world.body_angle(self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GRAVITY;

    fn setup() -> (PhysicsWorld, PlayerController) {
        let mut world = PhysicsWorld::new(Vector2::new(0.0, -GRAVITY));
        let player = PlayerController::spawn(&mut world, Vector2::new(100.0, 1100.0));
        (world, player)
    }

    fn velocity(world: &PhysicsWorld, player: &PlayerController) -> Vector2<f32> {
        world.linear_velocity(player.body).unwrap()
    }

    #[test]
    fn left_is_negative_world_x_regardless_of_rotation() {
        for angle in [0.0, 0.7, std::f32::consts::FRAC_PI_2, 2.5] {
            let (mut world, player) = setup();
            world.set_body_angle(player.body, angle);

            player.handle_input(&mut world, DirectionalInput {
                left: true,
                ..Default::default()
            });

            let v = velocity(&world, &player);
            assert!((v.x + HALF_IMPULSE / PLAYER_MASS).abs() < 1.0e-3, "angle {angle}: {v:?}");
            assert!(v.y.abs() < 1.0e-3, "angle {angle}: {v:?}");
        }
    }

    #[test]
    fn impulse_does_not_spin_the_body() {
        let (mut world, player) = setup();
        player.handle_input(&mut world, DirectionalInput {
            right: true,
            up: true,
            ..Default::default()
        });
        let angvel = world.bodies[player.body].angvel();
        assert!(angvel.abs() < 1.0e-4);
    }

    #[test]
    fn up_down_are_twice_left_right() {
        let up = DirectionalInput {
            up: true,
            ..Default::default()
        };
        let right = DirectionalInput {
            right: true,
            ..Default::default()
        };
        assert_eq!(up.impulse(), Vector2::new(0.0, IMPULSE_STRENGTH));
        assert_eq!(right.impulse(), Vector2::new(HALF_IMPULSE, 0.0));
        assert_eq!(up.impulse().norm(), 2.0 * right.impulse().norm());
    }

    #[test]
    fn held_keys_compose_additively() {
        let (mut world, player) = setup();
        player.handle_input(&mut world, DirectionalInput {
            left: true,
            right: true,
            up: true,
            down: false,
        });
        let v = velocity(&world, &player);
        assert!(v.x.abs() < 1.0e-3);
        assert!((v.y - IMPULSE_STRENGTH).abs() < 1.0e-3);
    }

    #[test]
    fn no_keys_no_impulse() {
        let (mut world, player) = setup();
        player.handle_input(&mut world, DirectionalInput::default());
        assert_eq!(velocity(&world, &player), Vector2::zeros());
    }
}
