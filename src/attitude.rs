/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use nalgebra::{UnitQuaternion, Vector3};

use crate::physical_types::*;


pub const RADIANS_PER_DEGREE: f32 = std::f32::consts::PI / 180.0;
pub const DEGREES_PER_RADIAN: f32 = 180.0 / std::f32::consts::PI;

/// World up in the y-up simulation frame
pub fn world_up() -> Vector3<f32> {
    Vector3::y()
}

/**
Compose an orientation from Euler angles given in degrees.
Roll (about z) is applied first, then pitch (about x), then yaw (about y),
so yaw always acts as a heading about world up.
*/
pub fn euler_to_rotation(
    pitch: AngularDegreesUnits,
    yaw: AngularDegreesUnits,
    roll: AngularDegreesUnits) -> UnitQuaternion<f32>
{
    let q_yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw * RADIANS_PER_DEGREE);
    let q_pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch * RADIANS_PER_DEGREE);
    let q_roll = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), roll * RADIANS_PER_DEGREE);
    q_yaw * q_pitch * q_roll
}

/// Unclamped linear interpolation
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/**
Fraction of the remaining distance to cover in one tick.
Clamped so that a long tick never overshoots the target.
*/
pub fn lerp_factor(interval: TimeIntervalUnits, lerp_speed: f32) -> f32 {
    num::clamp(interval * lerp_speed, 0.0, 1.0)
}

/// Angle between world up and the given local up direction, in degrees
pub fn tilt_angle(local_up: &Vector3<f32>) -> AngularDegreesUnits {
    world_up().angle(local_up) * DEGREES_PER_RADIAN
}

/// Vertical lift fraction remaining at the given tilt: cos(tilt)
pub fn tilt_compensation(tilt: AngularDegreesUnits) -> f32 {
    (tilt * RADIANS_PER_DEGREE).cos()
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn assert_vec_approx(actual: &Vector3<f32>, expected: &Vector3<f32>) {
        for i in 0..3 {
            assert_approx_eq!(actual[i], expected[i], 1E-5);
        }
    }

    #[test]
    fn test_identity_euler() {
        let rot = euler_to_rotation(0.0, 0.0, 0.0);
        assert_approx_eq!(rot.angle(), 0.0);
    }

    #[test]
    fn test_single_axis_rotations() {
        // positive pitch tips the up vector toward +z
        let up = euler_to_rotation(90.0, 0.0, 0.0) * world_up();
        assert_vec_approx(&up, &Vector3::new(0.0, 0.0, 1.0));

        // positive yaw turns forward (+z) toward +x
        let fwd = euler_to_rotation(0.0, 90.0, 0.0) * Vector3::z();
        assert_vec_approx(&fwd, &Vector3::new(1.0, 0.0, 0.0));

        // negative roll tips the up vector toward +x
        let up = euler_to_rotation(0.0, 0.0, -90.0) * world_up();
        assert_vec_approx(&up, &Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_yaw_applied_last() {
        let up = euler_to_rotation(90.0, 90.0, 0.0) * world_up();
        assert_vec_approx(&up, &Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_lerp_factor_clamped() {
        assert_approx_eq!(lerp_factor(0.02, 2.0), 0.04);
        assert_eq!(lerp_factor(1.0, 5.0), 1.0);
        assert_eq!(lerp_factor(0.02, -2.0), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert_approx_eq!(lerp(0.0, -20.0, 0.04), -0.8);
        assert_approx_eq!(lerp(3.0, 3.0, 0.5), 3.0);
    }

    #[test]
    fn test_tilt_angle() {
        assert_approx_eq!(tilt_angle(&world_up()), 0.0, 1E-3);
        let tipped = euler_to_rotation(30.0, 45.0, 0.0) * world_up();
        assert_approx_eq!(tilt_angle(&tipped), 30.0, 1E-3);
        assert_approx_eq!(tilt_compensation(60.0), 0.5, 1E-5);
    }
}
