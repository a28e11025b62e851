//! Rapier world wrapper for the sandbox.
//!
//! Owns every Rapier set and pipeline needed to step a 2D simulation and exposes
//! the handful of capabilities the controllers need: body/shape creation,
//! impulses, point queries, kinematic control points and joints.
//!
//! Conventions
//! - Units are logical pixels; world Y is up.
//! - Level geometry is inserted as parentless (static) colliders.
//! - Lookups with stale handles return `None` instead of panicking.

// Re-export Rapier so the client can name handles and types without depending
// on `rapier2d` directly.
pub use rapier2d;

use nalgebra::{Isometry2, Point2, UnitComplex, Vector2};
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::{LevelDef, PHYSICS_LENGTH_UNIT, guard_dt};

/// A static segment that has been inserted into the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticSegment {
    pub collider: ColliderHandle,
    pub a: Vector2<f32>,
    pub b: Vector2<f32>,
    pub friction: f32,
}

pub struct PhysicsWorld {
    pub gravity: Vector2<f32>,
    pub integration_parameters: IntegrationParameters,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    pipeline: PhysicsPipeline,
}

impl PhysicsWorld {
    pub fn new(gravity: Vector2<f32>) -> Self {
        let integration_parameters = IntegrationParameters {
            length_unit: PHYSICS_LENGTH_UNIT,
            ..IntegrationParameters::default()
        };

        Self {
            gravity,
            integration_parameters,
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
        }
    }

    /// Insert every segment of `level` as immovable collision geometry.
    pub fn add_static_segments(&mut self, level: &LevelDef) -> Vec<StaticSegment> {
        level
            .segments
            .iter()
            .map(|def| {
                let a = Vector2::new(def.a[0], def.a[1]);
                let b = Vector2::new(def.b[0], def.b[1]);
                let collider = ColliderBuilder::segment(Point2::from(a), Point2::from(b))
                    .friction(def.friction)
                    .build();
                StaticSegment {
                    collider: self.colliders.insert(collider),
                    a,
                    b,
                    friction: def.friction,
                }
            })
            .collect()
    }

    /// Create a dynamic body with a circle collider centered on its origin.
    ///
    /// The moment of inertia is that of a solid disc of the given mass.
    pub fn spawn_circle(
        &mut self,
        position: Vector2<f32>,
        radius: f32,
        mass: f32,
        friction: f32,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self
            .bodies
            .insert(RigidBodyBuilder::dynamic().translation(position).build());
        let collider = ColliderBuilder::ball(radius)
            .mass(mass)
            .friction(friction)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        // Make the mass usable by impulses before the first step.
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }

        (body, collider)
    }

    /// Create a massless, velocity-driven body with no collider.
    pub fn spawn_control_point(&mut self, position: Vector2<f32>) -> RigidBodyHandle {
        self.bodies.insert(
            RigidBodyBuilder::kinematic_velocity_based()
                .translation(position)
                .build(),
        )
    }

    /// Remove a body together with its colliders and any joints attached to it.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        )
    }

    pub fn insert_joint(
        &mut self,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        joint: impl Into<GenericJoint>,
    ) -> ImpulseJointHandle {
        self.impulse_joints.insert(body1, body2, joint, true)
    }

    pub fn remove_joint(&mut self, handle: ImpulseJointHandle) -> Option<ImpulseJoint> {
        self.impulse_joints.remove(handle, true)
    }

    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vector2<f32>> {
        self.bodies.get(handle).map(|rb| *rb.translation())
    }

    /// Body rotation in radians, counter-clockwise.
    pub fn body_angle(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|rb| rb.rotation().angle())
    }

    pub fn set_body_angle(&mut self, handle: RigidBodyHandle, angle: f32) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_rotation(UnitComplex::new(angle), true);
        }
    }

    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Option<Vector2<f32>> {
        self.bodies.get(handle).map(|rb| *rb.linvel())
    }

    pub fn set_linear_velocity(&mut self, handle: RigidBodyHandle, velocity: Vector2<f32>) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(velocity, true);
        }
    }

    /// Place a kinematic body and give it a velocity in one go.
    pub fn set_kinematic_state(
        &mut self,
        handle: RigidBodyHandle,
        position: Vector2<f32>,
        velocity: Vector2<f32>,
    ) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(velocity, true);
            rb.set_translation(position, true);
        }
    }

    pub fn apply_impulse_at_world_point(
        &mut self,
        handle: RigidBodyHandle,
        impulse: Vector2<f32>,
        point: Vector2<f32>,
    ) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.apply_impulse_at_point(impulse, Point2::from(point), true);
        }
    }

    /// Signed distance from `point` to the collider's shape: negative inside,
    /// zero on the boundary.
    ///
    /// The collider is assumed to sit at its parent body's origin.
    pub fn point_distance(&self, collider: ColliderHandle, point: Vector2<f32>) -> Option<f32> {
        let co = self.colliders.get(collider)?;
        let pose = match co.parent().and_then(|parent| self.bodies.get(parent)) {
            Some(rb) => Isometry2::new(*rb.translation(), rb.rotation().angle()),
            None => Isometry2::identity(),
        };
        Some(co.shape().distance_to_point(&pose, &Point2::from(point), false))
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = guard_dt(dt);
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GRAVITY, SegmentDef};

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vector2::new(0.0, -GRAVITY))
    }

    #[test]
    fn static_segments_keep_their_definition() {
        let mut world = world();
        let level = LevelDef {
            segments: vec![SegmentDef {
                a: [0.0, 0.0],
                b: [100.0, 0.0],
                friction: 0.5,
            }],
        };

        let segments = world.add_static_segments(&level);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].a, Vector2::new(0.0, 0.0));
        assert_eq!(segments[0].b, Vector2::new(100.0, 0.0));
        assert_eq!(segments[0].friction, 0.5);
        let collider = &world.colliders[segments[0].collider];
        assert_eq!(collider.friction(), 0.5);
        assert!(collider.parent().is_none());
    }

    #[test]
    fn point_distance_is_signed() {
        let mut world = world();
        let (_, collider) = world.spawn_circle(Vector2::new(10.0, 10.0), 25.0, 1.0, 0.7);

        let center = world.point_distance(collider, Vector2::new(10.0, 10.0)).unwrap();
        let outside = world.point_distance(collider, Vector2::new(10.0, 45.0)).unwrap();

        assert!(center < 0.0);
        assert!((center + 25.0).abs() < 1.0e-3);
        assert!((outside - 10.0).abs() < 1.0e-3);
    }

    #[test]
    fn gravity_pulls_bodies_down() {
        let mut world = world();
        let (body, _) = world.spawn_circle(Vector2::new(0.0, 500.0), 25.0, 1.0, 0.7);

        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }

        let velocity = world.linear_velocity(body).unwrap();
        assert!(velocity.y < 0.0);
        assert!(velocity.x.abs() < 1.0e-3);
        assert!(world.body_position(body).unwrap().y < 500.0);
    }

    #[test]
    fn zero_dt_step_is_guarded() {
        let mut world = world();
        let (body, _) = world.spawn_circle(Vector2::new(0.0, 500.0), 25.0, 1.0, 0.7);

        world.step(0.0);

        let position = world.body_position(body).unwrap();
        assert!(position.x.is_finite() && position.y.is_finite());
        assert!((position.y - 500.0).abs() < 1.0e-2);
    }

    #[test]
    fn removed_body_lookups_return_none() {
        let mut world = world();
        let point = world.spawn_control_point(Vector2::new(1.0, 2.0));
        assert_eq!(world.body_position(point), Some(Vector2::new(1.0, 2.0)));

        assert!(world.remove_body(point).is_some());
        assert_eq!(world.body_position(point), None);
        assert_eq!(world.linear_velocity(point), None);
    }
}
