/*
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

/*!
Flight control for a simulated quadrotor.

Normalized control channels (roll, pitch, yaw rate, throttle), supplied either by a
policy's action buffer or by a human input device, are turned into forces and an
orientation command on a rigid body owned by the host physics engine:

- each engine adds hover thrust compensated for airframe tilt
- the mixer smooths the commanded attitude, adds throttle and horizontal forces,
  and commands the orientation once per tick
*/

pub mod physical_types;

pub mod attitude;
pub mod config;
pub mod control;
pub mod controller;
pub mod engine;
pub mod error;
pub mod mixer;
pub mod planet;
pub mod rigid_body;
pub mod simulato;

pub use config::{FlightConfig, ThrottlePath};
pub use control::{ControlInput, ControlSource, ControlSourceLike, DeviceEvent, HeuristicKeys};
pub use controller::FlightController;
pub use engine::{EngineConfig, EngineSet, EngineUnit, PropellerAnimator};
pub use error::{FlightError, Result};
pub use mixer::{FlightMixer, MixerOutput, SmoothedAttitude};
pub use rigid_body::{RigidBody, RigidBodyState};
pub use simulato::Simulato;
