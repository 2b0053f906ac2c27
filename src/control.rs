/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use nalgebra::Vector2;

use crate::error::{FlightError, Result};
use crate::physical_types::*;


/**
The four control channels resolved for one tick.
Every channel is finite and within -1 .. 1; use `ControlInput::new` to build one.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    pub roll: ControlUnits,
    pub pitch: ControlUnits,
    pub yaw_rate: ControlUnits,
    pub throttle: ControlUnits,
}

impl ControlInput {
    pub fn new(
        roll: ControlUnits,
        pitch: ControlUnits,
        yaw_rate: ControlUnits,
        throttle: ControlUnits) -> Self
    {
        ControlInput {
            roll: sanitize_channel(roll),
            pitch: sanitize_channel(pitch),
            yaw_rate: sanitize_channel(yaw_rate),
            throttle: sanitize_channel(throttle),
        }
    }

    /// Re-apply channel sanitizing to a value that may have been built field by field
    pub fn sanitized(&self) -> Self {
        Self::new(self.roll, self.pitch, self.yaw_rate, self.throttle)
    }
}

/// NaN reads as an unset channel (0); everything else is clamped to -1 .. 1
fn sanitize_channel(val: ControlUnits) -> ControlUnits {
    if val.is_nan() {
        0.0
    }
    else {
        num::clamp(val, -1.0, 1.0)
    }
}


pub trait ControlSourceLike {
    /// Current channel values, available synchronously at any point in a tick
    fn resolve(&self) -> ControlInput;
    /// Return every channel to 0, at episode or session start
    fn reset(&mut self);
}


/// Number of continuous actions the inference harness writes each tick
pub const ACTION_COUNT: usize = 4;

pub const ROLL_ACTION: usize = 0;
pub const PITCH_ACTION: usize = 1;
pub const YAW_ACTION: usize = 2;
pub const THROTTLE_ACTION: usize = 3;

/**
Channels read positionally from a policy's continuous action buffer:
`[roll, pitch, yaw rate, throttle]`.
*/
#[derive(Clone, Debug, Default)]
pub struct PolicyControl {
    actions: [ControlUnits; ACTION_COUNT],
}

impl PolicyControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_actions(&mut self, actions: &[ControlUnits]) -> Result<()> {
        if actions.len() != ACTION_COUNT {
            return Err(FlightError::ActionLength {
                expected: ACTION_COUNT,
                actual: actions.len(),
            });
        }
        self.actions.copy_from_slice(actions);
        Ok(())
    }

    /// Direct access for harnesses that write the buffer in place
    pub fn action_buffer_mut(&mut self) -> &mut [ControlUnits; ACTION_COUNT] {
        &mut self.actions
    }

    pub fn actions(&self) -> &[ControlUnits; ACTION_COUNT] {
        &self.actions
    }
}

impl ControlSourceLike for PolicyControl {
    fn resolve(&self) -> ControlInput {
        ControlInput::new(
            self.actions[ROLL_ACTION],
            self.actions[PITCH_ACTION],
            self.actions[YAW_ACTION],
            self.actions[THROTTLE_ACTION])
    }

    fn reset(&mut self) {
        self.actions = [0.0; ACTION_COUNT];
    }
}


/// A change reported by the input device for one of its controls
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeviceEvent {
    /// x: roll, y: pitch
    Cyclic(Vector2<ControlUnits>),
    /// Yaw rate
    Pedals(ControlUnits),
    Throttle(ControlUnits),
}

/// Channels latched from the most recent device event for each control
#[derive(Clone, Debug)]
pub struct HumanControl {
    cyclic: Vector2<ControlUnits>,
    pedals: ControlUnits,
    throttle: ControlUnits,
}

impl Default for HumanControl {
    fn default() -> Self {
        HumanControl {
            cyclic: Vector2::zeros(),
            pedals: 0.0,
            throttle: 0.0,
        }
    }
}

impl HumanControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Cyclic(val) => self.cyclic = val,
            DeviceEvent::Pedals(val) => self.pedals = val,
            DeviceEvent::Throttle(val) => self.throttle = val,
        }
    }

    pub fn cyclic(&self) -> Vector2<ControlUnits> {
        self.cyclic
    }

    pub fn pedals(&self) -> ControlUnits {
        self.pedals
    }

    pub fn throttle(&self) -> ControlUnits {
        self.throttle
    }
}

impl ControlSourceLike for HumanControl {
    fn resolve(&self) -> ControlInput {
        ControlInput::new(self.cyclic.x, self.cyclic.y, self.pedals, self.throttle)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}


/// Where a drone's control channels come from
#[derive(Clone, Debug)]
pub enum ControlSource {
    Policy(PolicyControl),
    Human(HumanControl),
}

impl ControlSource {
    pub fn policy() -> Self {
        ControlSource::Policy(PolicyControl::new())
    }

    pub fn human() -> Self {
        ControlSource::Human(HumanControl::new())
    }

    pub fn as_policy_mut(&mut self) -> Option<&mut PolicyControl> {
        match self {
            ControlSource::Policy(policy) => Some(policy),
            _ => None,
        }
    }

    pub fn as_human_mut(&mut self) -> Option<&mut HumanControl> {
        match self {
            ControlSource::Human(human) => Some(human),
            _ => None,
        }
    }
}

impl ControlSourceLike for ControlSource {
    fn resolve(&self) -> ControlInput {
        match self {
            ControlSource::Policy(policy) => policy.resolve(),
            ControlSource::Human(human) => human.resolve(),
        }
    }

    fn reset(&mut self) {
        match self {
            ControlSource::Policy(policy) => policy.reset(),
            ControlSource::Human(human) => human.reset(),
        }
    }
}


/**
Keyboard snapshot used to fly a policy-driven drone by hand.
Axes are the raw -1 .. 1 horizontal/vertical axes; Q/E yaw, Space/Left Shift throttle.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicKeys {
    pub horizontal: ControlUnits,
    pub vertical: ControlUnits,
    /// Q
    pub yaw_left: bool,
    /// E
    pub yaw_right: bool,
    /// Space
    pub ascend: bool,
    /// Left Shift
    pub descend: bool,
}

impl HeuristicKeys {
    /// Fill an action buffer the way the inference harness would
    pub fn to_actions(&self) -> [ControlUnits; ACTION_COUNT] {
        let yaw = if self.yaw_left { -1.0 } else if self.yaw_right { 1.0 } else { 0.0 };
        let throttle = if self.ascend { 1.0 } else if self.descend { -1.0 } else { 0.0 };

        let mut actions = [0.0; ACTION_COUNT];
        actions[ROLL_ACTION] = self.horizontal;
        actions[PITCH_ACTION] = self.vertical;
        actions[YAW_ACTION] = yaw;
        actions[THROTTLE_ACTION] = throttle;
        actions
    }
}
