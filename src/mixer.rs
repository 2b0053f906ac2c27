/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use log::trace;
use nalgebra::{UnitQuaternion, Vector3};

use crate::attitude::{euler_to_rotation, lerp, lerp_factor, RADIANS_PER_DEGREE};
use crate::config::{FlightConfig, ThrottlePath};
use crate::control::ControlInput;
use crate::physical_types::*;
use crate::rigid_body::RigidBody;


/**
Attitude the airframe is being steered through.
Each `final_*` value lags its target by a first-order filter; the yaw
accumulator is the integrated heading the filter chases.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedAttitude {
    pub final_pitch: AngularDegreesUnits,
    pub final_roll: AngularDegreesUnits,
    pub final_yaw: AngularDegreesUnits,
    pub yaw_accumulator: AngularDegreesUnits,
}

/// Everything the mixer wants applied to the body for one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixerOutput {
    pub vertical_force: Vector3<ForceUnits>,
    pub horizontal_force: Vector3<ForceUnits>,
    pub rotation: UnitQuaternion<f32>,
}

impl MixerOutput {
    pub fn total_force(&self) -> Vector3<ForceUnits> {
        self.vertical_force + self.horizontal_force
    }
}

/// Turns normalized control channels into smoothed attitude and body forces
#[derive(Clone, Debug)]
pub struct FlightMixer {
    max_power: ForceUnits,
    min_max_pitch: AngularDegreesUnits,
    min_max_roll: AngularDegreesUnits,
    yaw_power: AngularDegreesUnits,
    horizontal_speed_factor: f32,
    lerp_speed: f32,
    throttle_path: ThrottlePath,
    engine_count: usize,
    attitude: SmoothedAttitude,
}

impl FlightMixer {

    pub fn new(config: &FlightConfig) -> Self {
        FlightMixer {
            max_power: config.max_power,
            min_max_pitch: config.min_max_pitch,
            min_max_roll: config.min_max_roll,
            yaw_power: config.yaw_power,
            horizontal_speed_factor: config.horizontal_speed_factor,
            lerp_speed: config.lerp_speed,
            throttle_path: config.throttle_path,
            engine_count: config.engines.len().max(1),
            attitude: SmoothedAttitude::default(),
        }
    }

    pub fn attitude(&self) -> &SmoothedAttitude {
        &self.attitude
    }

    /// Zero the smoothed attitude and heading, at episode or session start
    pub fn reset(&mut self) {
        self.attitude = SmoothedAttitude::default();
    }

    /**
    Advance the smoothed attitude by one tick and compute the resulting forces.
    `body_up` is the airframe's current up direction, along which the throttle force acts.
    */
    pub fn step(
        &mut self,
        input: &ControlInput,
        interval: TimeIntervalUnits,
        body_up: &Vector3<f32>) -> MixerOutput
    {
        let input = input.sanitized();
        let target_roll = -input.roll * self.min_max_roll;
        let target_pitch = input.pitch * self.min_max_pitch;
        self.attitude.yaw_accumulator += input.yaw_rate * self.yaw_power;

        let factor = lerp_factor(interval, self.lerp_speed);
        let att = &mut self.attitude;
        att.final_pitch = lerp(att.final_pitch, target_pitch, factor);
        att.final_roll = lerp(att.final_roll, target_roll, factor);
        att.final_yaw = lerp(att.final_yaw, att.yaw_accumulator, factor);

        let vertical_force = match self.throttle_path {
            ThrottlePath::Mixer =>
                body_up * (input.throttle * self.max_power / self.engine_count as f32),
            ThrottlePath::Engines => Vector3::zeros(),
        };

        let output = MixerOutput {
            vertical_force,
            horizontal_force: self.horizontal_force(),
            rotation: euler_to_rotation(
                self.attitude.final_pitch,
                self.attitude.final_yaw,
                self.attitude.final_roll),
        };
        trace!("mixer {:?} -> {:?}", self.attitude, output.total_force());
        output
    }

    /// Smoothed pitch and roll projected onto the ground plane, headed by the smoothed yaw
    fn horizontal_force(&self) -> Vector3<ForceUnits> {
        let yaw_rad = self.attitude.final_yaw * RADIANS_PER_DEGREE;
        let (sin_yaw, cos_yaw) = yaw_rad.sin_cos();
        let pitch = self.attitude.final_pitch * self.horizontal_speed_factor;
        let roll = self.attitude.final_roll * self.horizontal_speed_factor;

        let forward_x = sin_yaw * pitch;
        let forward_z = cos_yaw * pitch;
        let right_x = -cos_yaw * roll;
        let right_z = sin_yaw * roll;

        Vector3::new(forward_x + right_x, 0.0, forward_z + right_z)
    }

    /// Add the mixer forces, then command the orientation
    pub fn apply(&self, output: &MixerOutput, body: &mut dyn RigidBody) {
        body.add_force(&output.total_force());
        body.move_rotation(output.rotation);
    }
}
