/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use log::debug;
use nalgebra::Vector3;

use crate::config::FlightConfig;
use crate::control::ControlSource;
use crate::controller::FlightController;
use crate::engine::PropellerAngles;
use crate::error::Result;
use crate::mixer::MixerOutput;
use crate::physical_types::*;
use crate::planet::{ExternalForceEnvironment, Planetary, PlanetEarth};
use crate::rigid_body::{RigidBody, RigidBodyState};


/// Owns one drone and the body it flies, and steps both at a fixed cadence
pub struct Simulato {
    pub vehicle_state: RigidBodyState,
    pub controller: FlightController,
    pub propellers: PropellerAngles,
    enviro: ExternalForceEnvironment,
    home: Vector3<DistanceUnits>,
    simulated_time: TimeIntervalUnits,
}


impl Simulato {

    /// Spawn at the origin of the default environment
    pub fn new(config: &FlightConfig, source: ControlSource) -> Result<Self> {
        Self::with_environment(
            config,
            source,
            PlanetEarth::default_local_environment(),
            Vector3::zeros())
    }

    pub fn with_environment(
        config: &FlightConfig,
        source: ControlSource,
        enviro: ExternalForceEnvironment,
        home: Vector3<DistanceUnits>) -> Result<Self>
    {
        config.validate()?;
        let mut vehicle_state = RigidBodyState::from_weight(
            config.weight_in_pounds,
            config.linear_damping,
            config.angular_damping,
            &enviro);
        vehicle_state.teleport(home);

        Ok(Simulato {
            vehicle_state,
            controller: FlightController::new(config, source),
            propellers: PropellerAngles::default(),
            enviro,
            home,
            simulated_time: 0.0,
        })
    }

    pub fn environment(&self) -> &ExternalForceEnvironment {
        &self.enviro
    }

    pub fn simulated_time(&self) -> TimeIntervalUnits {
        self.simulated_time
    }

    /**
    Heart of the update loop:
    - Run flight control against the body: controls, engines, mixer, rotation command.
    - Then integrate the body, which consumes the accumulated forces.
    */
    pub fn update(&mut self, interval: TimeIntervalUnits) -> Option<MixerOutput> {
        let output = self.controller.tick(
            Some(&mut self.vehicle_state as &mut dyn RigidBody),
            interval,
            &mut self.propellers);
        self.vehicle_state.integrate(interval, &self.enviro.constraint);
        self.simulated_time += interval;
        output
    }

    /// Level the airframe and zero the control state; position and velocity are kept
    pub fn begin_episode(&mut self) {
        debug!("episode begin at t={:.3}", self.simulated_time);
        self.controller.begin_episode();
        self.vehicle_state.reset_orientation();
        self.vehicle_state.restore_damping();
    }

    /// Start a new episode at rest at the given position
    pub fn respawn(&mut self, position: Vector3<DistanceUnits>) {
        debug!("respawn at {:?}", position);
        self.begin_episode();
        self.vehicle_state.teleport(position);
    }

    /// Start a new episode at rest at the spawn position
    pub fn respawn_home(&mut self) {
        let home = self.home;
        self.respawn(home);
    }
}
