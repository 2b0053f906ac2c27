/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use log::{debug, warn};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::attitude::{euler_to_rotation, tilt_angle, tilt_compensation, world_up};
use crate::physical_types::*;
use crate::rigid_body::RigidBody;


/**
Floor applied to cos(tilt) before dividing the hover force by it.
Sits just under cos(89 degrees) so compensation still grows through 89 degrees,
but a sideways or inverted airframe no longer demands unbounded thrust.
*/
pub const MIN_TILT_COMPENSATION: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropellerConfig {
    /// Cosmetic spin applied every tick
    pub rotation_speed: AngularDegreesUnits,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Added thrust at full throttle, when throttle is routed through the engines
    pub max_power: ForceUnits,
    /// Rotor mount relative to the airframe: [pitch, yaw, roll] degrees
    pub mount_euler: [AngularDegreesUnits; 3],
    pub propeller: Option<PropellerConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_power: 2.0,
            mount_euler: [0.0, 0.0, 0.0],
            propeller: Some(PropellerConfig { rotation_speed: 300.0 }),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.max_power.is_finite() || self.max_power < 0.0 {
            return Err(format!("max_power must be a non-negative number, got {}", self.max_power));
        }
        if self.mount_euler.iter().any(|angle| !angle.is_finite()) {
            return Err("mount_euler must be finite".to_string());
        }
        if let Some(prop) = self.propeller {
            if !prop.rotation_speed.is_finite() {
                return Err("propeller rotation_speed must be finite".to_string());
            }
        }
        Ok(())
    }
}


/// Receives cosmetic propeller rotation; nothing flows back into flight control
pub trait PropellerAnimator {
    fn rotate(&mut self, engine: usize, axis: &Vector3<f32>, degrees: AngularDegreesUnits);
}

/// Keeps the current spin angle of each propeller, for renderers that poll
#[derive(Clone, Debug, Default)]
pub struct PropellerAngles {
    angles: Vec<AngularDegreesUnits>,
}

impl PropellerAngles {
    pub fn angle(&self, engine: usize) -> AngularDegreesUnits {
        self.angles.get(engine).copied().unwrap_or(0.0)
    }
}

impl PropellerAnimator for PropellerAngles {
    fn rotate(&mut self, engine: usize, _axis: &Vector3<f32>, degrees: AngularDegreesUnits) {
        if self.angles.len() <= engine {
            self.angles.resize(engine + 1, 0.0);
        }
        self.angles[engine] = (self.angles[engine] + degrees).rem_euclid(360.0);
    }
}


/// Vertical thrust contributed by one compensated engine
#[derive(Clone, Copy, Debug)]
pub struct Thrust {
    pub force: Vector3<ForceUnits>,
    /// True when the tilt compensation hit `MIN_TILT_COMPENSATION`
    pub clamped: bool,
}

/// One rotor: hover thrust compensated for airframe tilt, plus a throttle term
#[derive(Clone, Debug)]
pub struct EngineUnit {
    config: EngineConfig,
    mount: UnitQuaternion<f32>,
    /// Fraction of the total this engine produces: 1 / engine count
    share: f32,
}

impl EngineUnit {

    pub fn new(config: EngineConfig, engine_count: usize) -> Self {
        let [pitch, yaw, roll] = config.mount_euler;
        EngineUnit {
            config,
            mount: euler_to_rotation(pitch, yaw, roll),
            share: 1.0 / (engine_count.max(1) as f32),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// This rotor's up direction in world frame
    pub fn local_up(&self, body: &dyn RigidBody) -> Vector3<f32> {
        body.orientation() * self.mount * world_up()
    }

    /**
    Force this engine applies this tick:
    `local_up * ((mass * g) / max(cos(tilt), MIN_TILT_COMPENSATION) + throttle * max_power) * share`
    */
    pub fn compute_thrust(&self, body: &dyn RigidBody, throttle: ControlUnits) -> Thrust {
        let up = self.local_up(body);
        let raw_compensation = tilt_compensation(tilt_angle(&up));
        let clamped = raw_compensation < MIN_TILT_COMPENSATION;
        let compensation = raw_compensation.max(MIN_TILT_COMPENSATION);

        let hover = (body.mass() * body.gravity_magnitude()) / compensation;
        let total = hover + throttle * self.config.max_power;

        Thrust {
            force: up * (total * self.share),
            clamped,
        }
    }

    fn spin_propeller(&self, index: usize, animator: &mut dyn PropellerAnimator) {
        if let Some(prop) = self.config.propeller {
            animator.rotate(index, &Vector3::z(), prop.rotation_speed);
        }
    }
}


/// The engines mounted on one airframe, in mount order
#[derive(Clone, Debug)]
pub struct EngineSet {
    units: Vec<EngineUnit>,
    clamp_warned: Vec<bool>,
}

impl EngineSet {

    pub fn new(configs: &[EngineConfig]) -> Self {
        let count = configs.len();
        let units: Vec<EngineUnit> = configs.iter()
            .map(|config| EngineUnit::new(*config, count))
            .collect();

        for (idx, unit) in units.iter().enumerate() {
            if unit.config.propeller.is_none() {
                warn!("engine {} has no propeller; spin animation disabled", idx);
            }
        }

        EngineSet {
            clamp_warned: vec![false; units.len()],
            units,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[EngineUnit] {
        &self.units
    }

    /// Sum of all engine forces for the given body state, without applying them
    pub fn total_thrust(&self, body: &dyn RigidBody, throttle: ControlUnits) -> Vector3<ForceUnits> {
        self.units.iter()
            .map(|unit| unit.compute_thrust(body, throttle).force)
            .fold(Vector3::zeros(), |acc, force| acc + force)
    }

    /// Add every engine's thrust to the body and spin the propellers
    pub fn apply(
        &mut self,
        body: &mut dyn RigidBody,
        throttle: ControlUnits,
        animator: &mut dyn PropellerAnimator)
    {
        for (idx, unit) in self.units.iter().enumerate() {
            let thrust = unit.compute_thrust(&*body, throttle);
            body.add_force(&thrust.force);

            if thrust.clamped && !self.clamp_warned[idx] {
                warn!("engine {} tilt compensation clamped to {}", idx, MIN_TILT_COMPENSATION);
            }
            else if !thrust.clamped && self.clamp_warned[idx] {
                debug!("engine {} tilt back within compensation range", idx);
            }
            self.clamp_warned[idx] = thrust.clamped;

            unit.spin_propeller(idx, animator);
        }
    }
}
