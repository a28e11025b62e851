//! Pointer drag of a dynamic body through a force-limited pin.
//!
//! State machine: Idle -> Dragging -> Idle.
//! - `start_drag` grabs the body only when the pointer is over its shape.
//! - `update_drag` moves a kinematic control point with the pointer and gives
//!   it the pointer's estimated velocity.
//! - `end_drag` hands the control point's velocity to the body (a fling) and
//!   tears the pin down.
//!
//! The pin is a joint with no locked axes and positional motors on both linear
//! axes, so it pulls the grab point onto the pointer with at most
//! `DRAG_MAX_FORCE` while leaving rotation free.

use nalgebra::{Point2, UnitComplex, Vector2};
use rapier2d::prelude::{
    ColliderHandle, GenericJoint, GenericJointBuilder, ImpulseJointHandle, JointAxesMask,
    JointAxis, MotorModel, RigidBodyHandle,
};

use crate::{DRAG_DAMPING, DRAG_MAX_FORCE, DRAG_STIFFNESS, PhysicsWorld, guard_dt};

/// Live state of an active drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    /// Grab point in the body's local frame, independent of its rotation.
    pub local_anchor: Vector2<f32>,
    /// Pointer world position at the previous sample.
    pub previous_pointer: Vector2<f32>,
    pub control_point: RigidBodyHandle,
    pub joint: ImpulseJointHandle,
}

/// Drags one body (the one owning `collider`) with the pointer.
#[derive(Clone, Debug)]
pub struct DragController {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub max_force: f32,
    state: Option<DragState>,
}

impl DragController {
    pub fn new(body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            body,
            collider,
            max_force: DRAG_MAX_FORCE,
            state: None,
        }
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// Begin dragging if `pointer` is on or inside the body's shape.
    ///
    /// Returns whether a drag started. A second grab while one is active is ignored.
    pub fn start_drag(&mut self, world: &mut PhysicsWorld, pointer: Vector2<f32>) -> bool {
        if self.state.is_some() {
            return false;
        }
        match world.point_distance(self.collider, pointer) {
            Some(distance) if distance <= 0.0 => {}
            _ => return false,
        }
        let (Some(position), Some(angle)) =
            (world.body_position(self.body), world.body_angle(self.body))
        else {
            return false;
        };

        let local_anchor = local_anchor(pointer, position, angle);
        let control_point = world.spawn_control_point(pointer);
        let joint = world.insert_joint(control_point, self.body, self.pin(local_anchor));

        log::debug!("drag started at {pointer:?}, anchor {local_anchor:?}");
        self.state = Some(DragState {
            local_anchor,
            previous_pointer: pointer,
            control_point,
            joint,
        });
        true
    }

    /// Move the control point to `pointer` with the velocity it took to get there.
    pub fn update_drag(&mut self, world: &mut PhysicsWorld, pointer: Vector2<f32>, dt: f32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let velocity = estimate_velocity(state.previous_pointer, pointer, dt);
        world.set_kinematic_state(state.control_point, pointer, velocity);
        state.previous_pointer = pointer;
    }

    /// Release the body, flinging it with the control point's last velocity.
    pub fn end_drag(&mut self, world: &mut PhysicsWorld) {
        let Some(state) = self.state.take() else {
            return;
        };

        let velocity = world
            .linear_velocity(state.control_point)
            .unwrap_or_else(Vector2::zeros);
        world.set_linear_velocity(self.body, velocity);

        world.remove_joint(state.joint);
        world.set_linear_velocity(state.control_point, Vector2::zeros());
        if world.remove_body(state.control_point).is_none() {
            log::warn!("drag control point {:?} was already gone", state.control_point);
        }
        log::debug!("drag released with velocity {velocity:?}");
    }

    fn pin(&self, local_anchor: Vector2<f32>) -> GenericJoint {
        let mut builder = GenericJointBuilder::new(JointAxesMask::empty())
            .local_anchor1(Point2::origin())
            .local_anchor2(Point2::from(local_anchor));
        for axis in [JointAxis::LinX, JointAxis::LinY] {
            builder = builder
                .motor_model(axis, MotorModel::ForceBased)
                .motor_position(axis, 0.0, DRAG_STIFFNESS, DRAG_DAMPING)
                .motor_max_force(axis, self.max_force);
        }
        builder.build()
    }
}

/// Grab point relative to the body center, expressed in the body's unrotated frame.
#[inline]
pub fn local_anchor(pointer: Vector2<f32>, body_position: Vector2<f32>, body_angle: f32) -> Vector2<f32> {
    UnitComplex::new(-body_angle) * (pointer - body_position)
}

/// World position of a local anchor for the body's current pose.
#[inline]
pub fn world_anchor(local_anchor: Vector2<f32>, body_position: Vector2<f32>, body_angle: f32) -> Vector2<f32> {
    body_position + UnitComplex::new(body_angle) * local_anchor
}

/// Finite-difference pointer velocity; non-positive `dt` is replaced by a tiny epsilon.
#[inline]
pub fn estimate_velocity(previous: Vector2<f32>, current: Vector2<f32>, dt: f32) -> Vector2<f32> {
    (current - previous) / guard_dt(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GRAVITY, PlayerController};

    fn player_at() -> Vector2<f32> {
        Vector2::new(100.0, 1100.0)
    }

    fn setup() -> (PhysicsWorld, PlayerController, DragController) {
        let mut world = PhysicsWorld::new(Vector2::new(0.0, -GRAVITY));
        let player = PlayerController::spawn(&mut world, player_at());
        let drag = DragController::new(player.body, player.collider);
        (world, player, drag)
    }

    fn control_velocity(world: &PhysicsWorld, drag: &DragController) -> Vector2<f32> {
        let state = drag.state().unwrap();
        world.linear_velocity(state.control_point).unwrap()
    }

    #[test]
    fn grab_inside_shape_starts_drag() {
        let (mut world, _, mut drag) = setup();
        let pointer = player_at() + Vector2::new(10.0, -5.0);

        assert!(drag.start_drag(&mut world, pointer));

        let state = *drag.state().unwrap();
        assert_eq!(state.previous_pointer, pointer);
        assert!((state.local_anchor - Vector2::new(10.0, -5.0)).norm() < 1.0e-4);
        assert_eq!(world.body_position(state.control_point), Some(pointer));
        assert!(world.impulse_joints.get(state.joint).is_some());
    }

    #[test]
    fn grab_outside_shape_is_ignored() {
        let (mut world, _, mut drag) = setup();
        let bodies_before = world.bodies.len();

        assert!(!drag.start_drag(&mut world, player_at() + Vector2::new(30.0, 0.0)));

        assert!(!drag.is_dragging());
        assert_eq!(world.bodies.len(), bodies_before);
        assert_eq!(world.impulse_joints.iter().count(), 0);
    }

    #[test]
    fn second_grab_does_not_stack_constraints() {
        let (mut world, _, mut drag) = setup();
        assert!(drag.start_drag(&mut world, player_at()));
        assert!(!drag.start_drag(&mut world, player_at() + Vector2::new(5.0, 5.0)));
        assert_eq!(world.impulse_joints.iter().count(), 1);
    }

    #[test]
    fn anchor_is_expressed_in_the_unrotated_body_frame() {
        let (mut world, player, mut drag) = setup();
        world.set_body_angle(player.body, std::f32::consts::FRAC_PI_2);
        let pointer = player_at() + Vector2::new(0.0, 10.0);

        assert!(drag.start_drag(&mut world, pointer));

        // World +Y offset on a body turned a quarter counter-clockwise is local +X.
        let anchor = drag.state().unwrap().local_anchor;
        assert!((anchor - Vector2::new(10.0, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn anchor_follows_body_rotation() {
        let (mut world, player, mut drag) = setup();
        let start_angle = 0.4;
        world.set_body_angle(player.body, start_angle);
        let grab = player_at() + Vector2::new(12.0, 7.0);
        assert!(drag.start_drag(&mut world, grab));
        let anchor = drag.state().unwrap().local_anchor;

        // Without rotation the anchor maps back onto the grab point.
        assert!((world_anchor(anchor, player_at(), start_angle) - grab).norm() < 1.0e-4);

        for theta in [0.3, 1.0, -2.2, std::f32::consts::PI] {
            let expected = player_at() + UnitComplex::new(theta) * (grab - player_at());
            let moved = world_anchor(anchor, player_at(), start_angle + theta);
            assert!((moved - expected).norm() < 1.0e-3, "theta {theta}: {moved:?}");
            assert!(((moved - player_at()).norm() - (grab - player_at()).norm()).abs() < 1.0e-3);
        }
    }

    #[test]
    fn update_sets_finite_difference_velocity() {
        let (mut world, _, mut drag) = setup();
        let p0 = player_at();
        let p1 = player_at() + Vector2::new(3.0, -1.5);
        assert!(drag.start_drag(&mut world, p0));

        drag.update_drag(&mut world, p1, 0.25);

        assert_eq!(control_velocity(&world, &drag), (p1 - p0) / 0.25);
        let state = drag.state().unwrap();
        assert_eq!(state.previous_pointer, p1);
        assert_eq!(world.body_position(state.control_point), Some(p1));
    }

    #[test]
    fn zero_dt_yields_finite_velocity() {
        let (mut world, _, mut drag) = setup();
        assert!(drag.start_drag(&mut world, player_at()));

        drag.update_drag(&mut world, player_at() + Vector2::new(1.0e-3, 0.0), 0.0);

        let v = control_velocity(&world, &drag);
        assert!(v.x.is_finite() && v.y.is_finite());
        assert!(v.x > 0.0);

        drag.update_drag(&mut world, player_at(), -1.0);
        let v = control_velocity(&world, &drag);
        assert!(v.x.is_finite() && v.x < 0.0);
    }

    #[test]
    fn update_while_idle_is_a_no_op() {
        let (mut world, player, mut drag) = setup();
        let bodies_before = world.bodies.len();

        drag.update_drag(&mut world, player_at(), 1.0 / 60.0);

        assert!(!drag.is_dragging());
        assert_eq!(world.bodies.len(), bodies_before);
        assert_eq!(world.linear_velocity(player.body), Some(Vector2::zeros()));
    }

    #[test]
    fn release_flings_body_and_cleans_up() {
        let (mut world, player, mut drag) = setup();
        assert!(drag.start_drag(&mut world, player_at()));
        drag.update_drag(&mut world, player_at() + Vector2::new(8.0, 4.0), 0.5);
        let control_point = drag.state().unwrap().control_point;

        drag.end_drag(&mut world);

        assert!(!drag.is_dragging());
        assert_eq!(world.linear_velocity(player.body), Some(Vector2::new(16.0, 8.0)));
        assert_eq!(world.body_position(control_point), None);
        assert_eq!(world.impulse_joints.iter().count(), 0);
    }

    #[test]
    fn end_drag_twice_is_idempotent() {
        let (mut world, player, mut drag) = setup();
        assert!(drag.start_drag(&mut world, player_at()));
        drag.update_drag(&mut world, player_at() + Vector2::new(2.0, 0.0), 0.1);

        drag.end_drag(&mut world);
        let after_first = world.linear_velocity(player.body);
        let bodies_after_first = world.bodies.len();

        drag.end_drag(&mut world);

        assert!(!drag.is_dragging());
        assert_eq!(world.linear_velocity(player.body), after_first);
        assert_eq!(world.bodies.len(), bodies_after_first);
    }

    #[test]
    fn missed_grab_gesture_leaves_velocity_untouched() {
        let (mut world, player, mut drag) = setup();
        let miss = player_at() + Vector2::new(0.0, 40.0);

        drag.start_drag(&mut world, miss);
        drag.update_drag(&mut world, miss + Vector2::new(50.0, 50.0), 1.0 / 60.0);
        drag.end_drag(&mut world);

        assert_eq!(world.linear_velocity(player.body), Some(Vector2::zeros()));
    }

    #[test]
    fn dragged_body_is_pulled_toward_pointer() {
        let (mut world, player, mut drag) = setup();
        assert!(drag.start_drag(&mut world, player_at()));
        let target = player_at() + Vector2::new(40.0, 0.0);

        let dt = 1.0 / 60.0;
        drag.update_drag(&mut world, target, dt);
        for _ in 0..30 {
            drag.update_drag(&mut world, target, dt);
            world.step(dt);
        }

        let position = player.position(&world).unwrap();
        assert!(position.x > player_at().x + 10.0, "{position:?}");
    }
}
