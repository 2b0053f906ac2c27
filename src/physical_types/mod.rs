/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

/// physical type definitions

mod raw_types;


/// For distance measurements
pub type DistanceUnits = raw_types::Meters;

/// For angular position measurements
pub type AngularPosUnits = raw_types::Radians;
pub type AngularDegreesUnits = raw_types::AngleDegrees;

/// For speed measurements
pub type SpeedUnits = raw_types::MetersPerSecond;

/// For acceleration measurements
pub type AccelUnits = raw_types::MetersPerSecondPerSecond;

/// Physics step length
pub type TimeIntervalUnits = raw_types::Seconds;

pub type MassUnits = raw_types::Kilograms;

/// Configured airframe weight, as entered by the user
pub type WeightUnits = raw_types::Pounds;

pub type ForceUnits = raw_types::Newtons;

/// For control channels: roll, pitch, yaw rate, throttle
pub type ControlUnits = raw_types::NormalizedUnits;


/// Fixed conversion applied to the configured weight to obtain the rigid body mass
pub const POUNDS_TO_KILOGRAMS: f32 = 0.78;

/// Derive rigid body mass from the configured weight
pub fn mass_from_weight(weight: WeightUnits) -> MassUnits {
    weight * POUNDS_TO_KILOGRAMS
}
