/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use nalgebra::{UnitQuaternion, Vector3};

use crate::attitude::world_up;
use crate::physical_types::*;
use crate::planet::{ExternalForceEnvironment, GeoConstraintBox};


/**
The slice of a physics engine body that flight control touches.
Forces accumulate until the host integrates; the rotation command is an overwrite.
*/
pub trait RigidBody {
    fn mass(&self) -> MassUnits;

    /// Magnitude of world gravity acting on this body
    fn gravity_magnitude(&self) -> AccelUnits;

    fn orientation(&self) -> UnitQuaternion<f32>;

    /// The body's local up direction in world frame
    fn up(&self) -> Vector3<f32> {
        self.orientation() * world_up()
    }

    fn add_force(&mut self, force: &Vector3<ForceUnits>);

    /// Command the orientation the body will have after the next integration step
    fn move_rotation(&mut self, rotation: UnitQuaternion<f32>);
}


/**
A minimal point-mass integrator implementing `RigidBody`.
Stands in for the host physics engine: orientation is commanded rather than
integrated from torques.
*/
#[derive(Clone, Debug)]
pub struct RigidBodyState {
    pub mass: MassUnits,

    /// Linear drag coefficient, 1/s
    pub linear_damping: f32,
    /// Bookkeeping only: rotation is commanded, so `integrate` never reads it
    pub angular_damping: f32,

    pub inertial_position: Vector3<DistanceUnits>,
    pub inertial_velocity: Vector3<SpeedUnits>,
    pub inertial_accel: Vector3<AccelUnits>,
    pub orientation: UnitQuaternion<f32>,

    start_linear_damping: f32,
    start_angular_damping: f32,
    gravity: Vector3<AccelUnits>,
    accumulated_force: Vector3<ForceUnits>,
    pending_rotation: Option<UnitQuaternion<f32>>,
}

impl RigidBodyState {

    pub fn new(mass: MassUnits, enviro: &ExternalForceEnvironment) -> Self {
        RigidBodyState {
            mass,
            linear_damping: 0.0,
            angular_damping: 0.0,
            inertial_position: Vector3::zeros(),
            inertial_velocity: Vector3::zeros(),
            inertial_accel: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            start_linear_damping: 0.0,
            start_angular_damping: 0.0,
            gravity: enviro.gravity,
            accumulated_force: Vector3::zeros(),
            pending_rotation: None,
        }
    }

    /// Spawn a body whose mass is derived from the configured weight
    pub fn from_weight(
        weight: WeightUnits,
        linear_damping: f32,
        angular_damping: f32,
        enviro: &ExternalForceEnvironment) -> Self
    {
        let mut body = Self::new(mass_from_weight(weight), enviro);
        body.linear_damping = linear_damping;
        body.angular_damping = angular_damping;
        body.start_linear_damping = linear_damping;
        body.start_angular_damping = angular_damping;
        body
    }

    /// Damping values recorded at spawn
    pub fn start_damping(&self) -> (f32, f32) {
        (self.start_linear_damping, self.start_angular_damping)
    }

    pub fn restore_damping(&mut self) {
        self.linear_damping = self.start_linear_damping;
        self.angular_damping = self.start_angular_damping;
    }

    /// Forces added since the last integration step
    pub fn net_force(&self) -> Vector3<ForceUnits> {
        self.accumulated_force
    }

    pub fn pending_rotation(&self) -> Option<UnitQuaternion<f32>> {
        self.pending_rotation
    }

    /// Place the body at rest at the given position
    pub fn teleport(&mut self, position: Vector3<DistanceUnits>) {
        self.inertial_position = position;
        self.inertial_velocity = Vector3::zeros();
        self.inertial_accel = Vector3::zeros();
        self.accumulated_force = Vector3::zeros();
    }

    /// Snap to level, discarding any commanded rotation
    pub fn reset_orientation(&mut self) {
        self.orientation = UnitQuaternion::identity();
        self.pending_rotation = None;
    }

    /**
    Advance one physics step:
    - convert accumulated force to acceleration, add gravity
    - semi-implicit Euler on velocity then position, with linear drag
    - apply the commanded rotation
    - clear the force accumulator
    */
    pub fn integrate(&mut self, interval: TimeIntervalUnits, constraint: &GeoConstraintBox) {
        self.inertial_accel = self.accumulated_force / self.mass + self.gravity;
        self.inertial_velocity += self.inertial_accel * interval;
        let drag = (1.0 - interval * self.linear_damping).max(0.0);
        self.inertial_velocity *= drag;
        self.inertial_position += self.inertial_velocity * interval;

        if needs_grounding(constraint, self) {
            self.inertial_position[1] = constraint.minimum[1];
            self.inertial_velocity[1] = 0.0;
        }

        if let Some(rotation) = self.pending_rotation.take() {
            self.orientation = rotation;
        }
        self.accumulated_force = Vector3::zeros();
    }
}

impl RigidBody for RigidBodyState {
    fn mass(&self) -> MassUnits {
        self.mass
    }

    fn gravity_magnitude(&self) -> AccelUnits {
        self.gravity.norm()
    }

    fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    fn add_force(&mut self, force: &Vector3<ForceUnits>) {
        self.accumulated_force += force;
    }

    fn move_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.pending_rotation = Some(rotation);
    }
}


/// The body has reached the floor but is still moving down
fn needs_grounding(constraint: &GeoConstraintBox, motion: &RigidBodyState) -> bool {
    let y_pos = motion.inertial_position[1];
    let y_vel = motion.inertial_velocity[1];
    (y_pos <= constraint.minimum[1]) && (y_vel < 0.0)
}
