extern crate quadlift;

use quadlift::control::{DeviceEvent, HeuristicKeys};
use quadlift::physical_types::*;
use quadlift::planet::{Planetary, PlanetEarth};
use quadlift::{ControlSource, FlightConfig, Simulato, ThrottlePath};
use assert_approx_eq::assert_approx_eq;
use nalgebra::{Vector2, Vector3};

const TICK: TimeIntervalUnits = 0.02;

fn get_test_home_position() -> Vector3<DistanceUnits> {
    Vector3::new(0.0, 50.0, 0.0)
}

fn policy_sim(config: &FlightConfig) -> Simulato {
    Simulato::with_environment(
        config,
        ControlSource::policy(),
        PlanetEarth::default_local_environment(),
        get_test_home_position()).unwrap()
}

fn set_actions(sim: &mut Simulato, actions: &[ControlUnits]) {
    sim.controller.source_mut().as_policy_mut().unwrap()
        .set_actions(actions).unwrap();
}

#[test]
pub fn test_vehicle_hover() {
    let mut sim = policy_sim(&FlightConfig::default());

    for _i in 0..500 {
        sim.update(TICK);
        // no input: engines exactly offset gravity
        assert_approx_eq!(sim.vehicle_state.inertial_accel[1], 0.0, 1E-4);
    }
    let pos = sim.vehicle_state.inertial_position;
    println!("hover pos: {:?}", pos);
    assert_approx_eq!(pos[1], 50.0, 1E-2);
    assert_approx_eq!(pos[0], 0.0, 1E-4);
    assert_approx_eq!(pos[2], 0.0, 1E-4);
}

#[test]
pub fn test_vehicle_takeoff() {
    let mut sim = policy_sim(&FlightConfig::default());
    set_actions(&mut sim, &[0.0, 0.0, 0.0, 1.0]);

    let mass = sim.vehicle_state.mass;
    let expected_accel = (100.0 / 4.0) / mass;
    let mut last_alt = sim.vehicle_state.inertial_position[1];
    let mut last_y_vel: SpeedUnits = 0.0;

    for _i in 0..100 {
        sim.update(TICK);

        // with constant throttle and level attitude, accel is constant
        let y_accel = sim.vehicle_state.inertial_accel[1];
        assert_approx_eq!(y_accel, expected_accel, 1E-3);

        let y_vel = sim.vehicle_state.inertial_velocity[1];
        assert_eq!(true, y_vel > last_y_vel);
        last_y_vel = y_vel;

        let alt = sim.vehicle_state.inertial_position[1];
        assert_eq!(true, alt > last_alt);
        last_alt = alt;
    }
}

#[test]
pub fn test_vehicle_descent_lands() {
    let mut sim = policy_sim(&FlightConfig::default());
    set_actions(&mut sim, &[0.0, 0.0, 0.0, -1.0]);

    let mut last_alt = sim.vehicle_state.inertial_position[1];
    let mut landed = false;
    for _i in 0..2000 {
        sim.update(TICK);
        let alt = sim.vehicle_state.inertial_position[1];
        assert_eq!(true, alt <= last_alt);
        if alt == 0.0 {
            landed = true;
        }
        last_alt = alt;
    }
    assert_eq!(true, landed);
    assert_eq!(sim.vehicle_state.inertial_velocity[1], 0.0);
}

#[test]
pub fn test_forward_pitch_moves_forward() {
    let mut sim = policy_sim(&FlightConfig::default());
    set_actions(&mut sim, &[0.0, 1.0, 0.0, 0.0]);
    for _i in 0..200 {
        sim.update(TICK);
    }
    let pos = sim.vehicle_state.inertial_position;
    println!("pitch pos: {:?}", pos);
    assert_eq!(true, pos[2] > 1.0);
    assert_approx_eq!(pos[0], 0.0, 1E-3);
    // tilt compensation keeps altitude while pitched
    assert_approx_eq!(pos[1], 50.0, 1E-1);
}

#[test]
pub fn test_heuristic_keys_turn_and_climb() {
    let mut sim = policy_sim(&FlightConfig::default());
    let keys = HeuristicKeys { yaw_right: true, ascend: true, ..Default::default() };
    set_actions(&mut sim, &keys.to_actions());
    for _i in 0..10 {
        sim.update(TICK);
    }
    let att = *sim.controller.mixer().attitude();
    assert_approx_eq!(att.yaw_accumulator, 50.0);
    assert_eq!(true, att.final_yaw > 0.0 && att.final_yaw < 50.0);
    assert_eq!(true, sim.vehicle_state.inertial_position[1] > 50.0);
}

#[test]
pub fn test_episode_reset() {
    let mut sim = policy_sim(&FlightConfig::default());
    set_actions(&mut sim, &[0.7, -0.4, 1.0, 0.3]);
    for _i in 0..50 {
        sim.update(TICK);
    }
    sim.respawn_home();

    let att = *sim.controller.mixer().attitude();
    assert_eq!(att.final_pitch, 0.0);
    assert_eq!(att.final_roll, 0.0);
    assert_eq!(att.final_yaw, 0.0);
    assert_eq!(att.yaw_accumulator, 0.0);
    assert_eq!(sim.vehicle_state.orientation.angle(), 0.0);
    assert_eq!(sim.vehicle_state.inertial_position, get_test_home_position());

    // zero actions after reset: the drone hovers in place
    sim.update(TICK);
    assert_approx_eq!(sim.vehicle_state.inertial_accel[1], 0.0, 1E-4);
}

#[test]
pub fn test_human_piloted_climb() {
    let config = FlightConfig::human_piloted();
    assert_eq!(config.throttle_path, ThrottlePath::Engines);
    let mut sim = Simulato::with_environment(
        &config,
        ControlSource::human(),
        PlanetEarth::default_local_environment(),
        get_test_home_position()).unwrap();

    let human = sim.controller.source_mut().as_human_mut().unwrap();
    human.handle_event(DeviceEvent::Throttle(1.0));
    human.handle_event(DeviceEvent::Cyclic(Vector2::new(0.0, 0.5)));

    for _i in 0..100 {
        sim.update(TICK);
    }
    // the human tuning climbs on engine throttle while the cyclic pitches the airframe
    let pos = sim.vehicle_state.inertial_position;
    assert_eq!(true, pos[1] > 50.0);
    assert_approx_eq!(sim.controller.mixer().attitude().final_pitch, 15.0 * (1.0 - 0.96f32.powi(100)), 1E-2);
}
