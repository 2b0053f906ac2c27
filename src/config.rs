/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::error::{FlightError, Result};
use crate::physical_types::*;


/// Which force path carries the throttle channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottlePath {
    /// Engines hold hover only; the mixer adds `up * throttle * max_power / engine_count`
    Mixer,
    /// Each engine adds `throttle * engine.max_power` before its share is taken
    Engines,
}

/**
Externally set tuning for one drone.
Angles are degrees; `max_power` values are newtons at full throttle.
*/
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub max_power: ForceUnits,
    pub min_max_pitch: AngularDegreesUnits,
    pub min_max_roll: AngularDegreesUnits,
    /// Heading change per tick at full yaw rate
    pub yaw_power: AngularDegreesUnits,
    pub weight_in_pounds: WeightUnits,
    pub horizontal_speed_factor: f32,
    pub lerp_speed: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub throttle_path: ThrottlePath,
    pub engines: Vec<EngineConfig>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        FlightConfig {
            max_power: 100.0,
            min_max_pitch: 20.0,
            min_max_roll: 20.0,
            yaw_power: 5.0,
            weight_in_pounds: 1.0,
            horizontal_speed_factor: 2.0,
            lerp_speed: 2.0,
            linear_damping: 1.0,
            angular_damping: 0.05,
            throttle_path: ThrottlePath::Mixer,
            engines: vec![EngineConfig::default(); 4],
        }
    }
}

impl FlightConfig {

    /// Tuning used by the keyboard/gamepad piloted drone
    pub fn human_piloted() -> Self {
        FlightConfig {
            min_max_pitch: 30.0,
            min_max_roll: 30.0,
            yaw_power: 4.0,
            horizontal_speed_factor: 0.0,
            throttle_path: ThrottlePath::Engines,
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: FlightConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn mass(&self) -> MassUnits {
        mass_from_weight(self.weight_in_pounds)
    }

    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("max_power", self.max_power),
            ("min_max_pitch", self.min_max_pitch),
            ("min_max_roll", self.min_max_roll),
            ("yaw_power", self.yaw_power),
            ("weight_in_pounds", self.weight_in_pounds),
            ("horizontal_speed_factor", self.horizontal_speed_factor),
            ("lerp_speed", self.lerp_speed),
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ];
        for (name, val) in scalars.iter() {
            if !val.is_finite() {
                return Err(FlightError::InvalidConfig(format!("{} is not finite", name)));
            }
        }

        if self.weight_in_pounds <= 0.0 {
            return Err(FlightError::InvalidConfig(
                format!("weight_in_pounds must be positive, got {}", self.weight_in_pounds)));
        }
        if self.lerp_speed < 0.0 {
            return Err(FlightError::InvalidConfig(
                format!("lerp_speed must not be negative, got {}", self.lerp_speed)));
        }
        if self.linear_damping < 0.0 || self.angular_damping < 0.0 {
            return Err(FlightError::InvalidConfig("damping must not be negative".to_string()));
        }
        if self.engines.is_empty() {
            return Err(FlightError::InvalidConfig("at least one engine is required".to_string()));
        }
        for (idx, engine) in self.engines.iter().enumerate() {
            engine.validate()
                .map_err(|msg| FlightError::InvalidConfig(format!("engine {}: {}", idx, msg)))?;
        }
        Ok(())
    }
}
