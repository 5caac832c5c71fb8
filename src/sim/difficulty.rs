//! Speed ramp
//!
//! Speed climbs with running time only; score and pickups never affect it.

use crate::tuning::Tuning;

/// Speed after `dt` running seconds, capped at `max_speed`
#[inline]
pub fn ramp_speed(speed: f32, dt: f32, tuning: &Tuning) -> f32 {
    (speed + tuning.speed_increment * dt).min(tuning.max_speed)
}
