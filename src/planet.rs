/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use nalgebra::Vector3;

use crate::physical_types::*;


/**
Axis-aligned box the vehicle is confined to.
Only the floor (`minimum[1]`) is currently enforced by the integrator.
*/
#[derive(Clone, Copy, Debug)]
pub struct GeoConstraintBox {
    pub minimum: Vector3<DistanceUnits>,
    pub maximum: Vector3<DistanceUnits>,
}

/**
Forces acting on the vehicle that are not produced by the vehicle itself.
Frame is y-up: gravity points along -y.
*/
#[derive(Clone, Copy, Debug)]
pub struct ExternalForceEnvironment {
    pub gravity: Vector3<AccelUnits>,
    pub constraint: GeoConstraintBox,
}

impl ExternalForceEnvironment {
    /// Magnitude of the gravity vector, the "world constant" read by engines
    pub fn gravity_magnitude(&self) -> AccelUnits {
        self.gravity.norm()
    }
}

pub trait Planetary {
    /// The environment a vehicle spawned at the default home location sees
    fn default_local_environment() -> ExternalForceEnvironment;
}

pub struct PlanetEarth {}

impl PlanetEarth {
    /// Gravity used by the host simulation, m/s^2
    pub const STD_GRAVITY_ACCEL: AccelUnits = 9.81;

    /// Horizontal extent of the default flying area, meters
    const LOCAL_EXTENT: DistanceUnits = 10_000.0;
    const CEILING: DistanceUnits = 10_000.0;
}

impl Planetary for PlanetEarth {
    fn default_local_environment() -> ExternalForceEnvironment {
        ExternalForceEnvironment {
            gravity: Vector3::new(0.0, -Self::STD_GRAVITY_ACCEL, 0.0),
            constraint: GeoConstraintBox {
                minimum: Vector3::new(-Self::LOCAL_EXTENT, 0.0, -Self::LOCAL_EXTENT),
                maximum: Vector3::new(Self::LOCAL_EXTENT, Self::CEILING, Self::LOCAL_EXTENT),
            },
        }
    }
}
