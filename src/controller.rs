/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use log::{debug, warn};

use crate::config::{FlightConfig, ThrottlePath};
use crate::control::{ControlSource, ControlSourceLike};
use crate::engine::{EngineSet, PropellerAnimator};
use crate::mixer::{FlightMixer, MixerOutput};
use crate::physical_types::*;
use crate::rigid_body::RigidBody;


/**
Flight control for one drone: the engines, the mixer and whatever supplies
the control channels. Driven once per physics tick by its owner.
*/
#[derive(Clone, Debug)]
pub struct FlightController {
    engines: EngineSet,
    mixer: FlightMixer,
    source: ControlSource,
    throttle_path: ThrottlePath,
    missing_body_warned: bool,
}

impl FlightController {

    pub fn new(config: &FlightConfig, source: ControlSource) -> Self {
        FlightController {
            engines: EngineSet::new(&config.engines),
            mixer: FlightMixer::new(config),
            source,
            throttle_path: config.throttle_path,
            missing_body_warned: false,
        }
    }

    pub fn engines(&self) -> &EngineSet {
        &self.engines
    }

    pub fn mixer(&self) -> &FlightMixer {
        &self.mixer
    }

    pub fn source(&self) -> &ControlSource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut ControlSource {
        &mut self.source
    }

    /// Zero the smoothed attitude, heading and latched controls
    pub fn begin_episode(&mut self) {
        self.mixer.reset();
        self.source.reset();
    }

    /**
    One physics tick, in fixed order:
    - resolve the control channels
    - every engine adds its compensated thrust
    - the mixer adds throttle and horizontal forces
    - the orientation is commanded, once, after all forces are in

    Without a body the whole tick is skipped and nothing advances.
    */
    pub fn tick(
        &mut self,
        body: Option<&mut dyn RigidBody>,
        interval: TimeIntervalUnits,
        animator: &mut dyn PropellerAnimator) -> Option<MixerOutput>
    {
        let body = match body {
            Some(body) => {
                if self.missing_body_warned {
                    debug!("rigid body attached, resuming flight control");
                    self.missing_body_warned = false;
                }
                body
            }
            None => {
                if !self.missing_body_warned {
                    warn!("no rigid body attached, skipping flight control");
                    self.missing_body_warned = true;
                }
                return None;
            }
        };

        let input = self.source.resolve();
        let engine_throttle = match self.throttle_path {
            ThrottlePath::Engines => input.throttle,
            ThrottlePath::Mixer => 0.0,
        };
        self.engines.apply(&mut *body, engine_throttle, animator);

        let output = self.mixer.step(&input, interval, &body.up());
        self.mixer.apply(&output, body);
        Some(output)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlInput, DeviceEvent};
    use crate::engine::PropellerAngles;
    use crate::mixer::SmoothedAttitude;
    use crate::planet::{Planetary, PlanetEarth};
    use crate::rigid_body::RigidBodyState;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector2;

    const TICK: TimeIntervalUnits = 0.02;

    fn body_for(config: &FlightConfig) -> RigidBodyState {
        let enviro = PlanetEarth::default_local_environment();
        RigidBodyState::from_weight(
            config.weight_in_pounds, config.linear_damping, config.angular_damping, &enviro)
    }

    #[test]
    fn test_missing_body_skips_tick() {
        let config = FlightConfig::default();
        let mut controller = FlightController::new(&config, ControlSource::policy());
        controller.source_mut().as_policy_mut().unwrap()
            .set_actions(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        let mut props = PropellerAngles::default();

        assert_eq!(controller.tick(None, TICK, &mut props), None);
        assert_eq!(controller.tick(None, TICK, &mut props), None);
        assert_eq!(controller.mixer().attitude(), &SmoothedAttitude::default());
        assert_eq!(props.angle(0), 0.0);

        // recovers as soon as a body shows up
        let mut body = body_for(&config);
        let out = controller.tick(Some(&mut body as &mut dyn RigidBody), TICK, &mut props);
        assert_eq!(true, out.is_some());
        assert_approx_eq!(props.angle(0), 300.0);
    }

    #[test]
    fn test_hover_with_mixer_throttle_path() {
        let config = FlightConfig::default();
        let mut controller = FlightController::new(&config, ControlSource::policy());
        let mut body = body_for(&config);
        let mut props = PropellerAngles::default();

        controller.source_mut().as_policy_mut().unwrap()
            .set_actions(&[0.0, 0.0, 0.0, 1.0]).unwrap();
        controller.tick(Some(&mut body as &mut dyn RigidBody), TICK, &mut props);

        // engines hold hover, the mixer alone carries the throttle
        let expected = 0.78 * 9.81 + 100.0 / 4.0;
        assert_approx_eq!(body.net_force()[1], expected, 1E-3);
    }

    #[test]
    fn test_engine_throttle_path() {
        let config = FlightConfig::human_piloted();
        let mut controller = FlightController::new(&config, ControlSource::human());
        let mut body = body_for(&config);
        let mut props = PropellerAngles::default();

        controller.source_mut().as_human_mut().unwrap()
            .handle_event(DeviceEvent::Throttle(1.0));
        controller.tick(Some(&mut body as &mut dyn RigidBody), TICK, &mut props);

        // each engine adds its own max power, the mixer adds nothing vertical
        let expected = 0.78 * 9.81 + 2.0;
        assert_approx_eq!(body.net_force()[1], expected, 1E-3);
    }

    #[test]
    fn test_both_sources_mix_identically() {
        let config = FlightConfig::default();
        let mut policy_ctl = FlightController::new(&config, ControlSource::policy());
        let mut human_ctl = FlightController::new(&config, ControlSource::human());
        let mut policy_body = body_for(&config);
        let mut human_body = body_for(&config);
        let mut props = PropellerAngles::default();

        policy_ctl.source_mut().as_policy_mut().unwrap()
            .set_actions(&[0.4, -0.3, 0.8, 0.2]).unwrap();
        let human = human_ctl.source_mut().as_human_mut().unwrap();
        human.handle_event(DeviceEvent::Cyclic(Vector2::new(0.4, -0.3)));
        human.handle_event(DeviceEvent::Pedals(0.8));
        human.handle_event(DeviceEvent::Throttle(0.2));

        for _i in 0..20 {
            let a = policy_ctl.tick(Some(&mut policy_body as &mut dyn RigidBody), TICK, &mut props);
            let b = human_ctl.tick(Some(&mut human_body as &mut dyn RigidBody), TICK, &mut props);
            assert_eq!(a, b);
            policy_body.integrate(TICK, &PlanetEarth::default_local_environment().constraint);
            human_body.integrate(TICK, &PlanetEarth::default_local_environment().constraint);
        }
        assert_eq!(policy_ctl.mixer().attitude(), human_ctl.mixer().attitude());
    }

    #[test]
    fn test_begin_episode_resets_attitude() {
        let config = FlightConfig::default();
        let mut controller = FlightController::new(&config, ControlSource::policy());
        let mut body = body_for(&config);
        let mut props = PropellerAngles::default();
        controller.source_mut().as_policy_mut().unwrap()
            .set_actions(&[0.5, 0.5, 1.0, 0.0]).unwrap();
        for _i in 0..10 {
            controller.tick(Some(&mut body as &mut dyn RigidBody), TICK, &mut props);
        }
        assert_eq!(true, controller.mixer().attitude().yaw_accumulator > 0.0);

        controller.begin_episode();
        assert_eq!(controller.mixer().attitude(), &SmoothedAttitude::default());
        assert_eq!(controller.source().resolve(), ControlInput::default());
    }
}
