use crate::constants::{SPHERE_BOB_AMPLITUDE, SPHERE_DRIFT_X_AMPLITUDE, SPHERE_DRIFT_Z_AMPLITUDE};
use crate::scene::Transform;
use glam::Vec3;
use std::f64::consts::TAU;

// Pose functions of elapsed time. Replaying a `t` always yields the same pose.

/// Elapsed seconds folded into one period of the motion, then narrowed.
///
/// Every pose below is 2π-periodic in `t`.
#[inline]
pub fn phase(t: f64) -> f32 {
    t.rem_euclid(TAU) as f32
}

#[inline]
pub fn bob_y(t: f32) -> f32 {
    t.sin() * SPHERE_BOB_AMPLITUDE
}

#[inline]
pub fn drift_x(t: f32) -> f32 {
    t.cos() * SPHERE_DRIFT_X_AMPLITUDE
}

#[inline]
pub fn drift_z(t: f32) -> f32 {
    t.cos() * SPHERE_DRIFT_Z_AMPLITUDE
}

/// Full position of the orbiting sphere at time `t`.
#[inline]
pub fn orbit_position(t: f32) -> Vec3 {
    Vec3::new(drift_x(t), bob_y(t), drift_z(t))
}

/// Yaw follows the motion phase while `enabled`; otherwise the current yaw is kept.
#[inline]
pub fn spin_yaw(transform: &mut Transform, t: f32, enabled: bool) {
    if enabled {
        transform.rotation.y = t;
    }
}
