/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

/// Raw physical type definitions


/// private types
pub type Meters = f32;
pub type MetersPerSecond = f32;
pub type MetersPerSecondPerSecond = f32;
pub type Seconds = f32;

pub type Radians = f32;
pub type AngleDegrees = f32;

/// For mass and weight
pub type Kilograms = f32;
pub type Pounds = f32;

/// For applied forces
pub type Newtons = f32;

/// Dimensionless control channel value, nominally -1 .. 1
pub type NormalizedUnits = f32;
