//! Trigger time computation
//!
//! The target is server-local midnight plus the configured delay. Expressed
//! in host-local wall-clock time that is the difference between the two UTC
//! offsets, shifted by the delay and jitter, wrapped into a single day.

use rand::Rng;

/// Host-local daily trigger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Compute the host-local trigger equivalent to server midnight plus delay
/// plus jitter.
///
/// Components are wrapped into non-negative ranges, so any combination of
/// offsets yields `0 <= hour < 24`, `0 <= minute < 60`, `0 <= second < 60`.
pub fn compute_trigger(
    host_offset_secs: i32,
    server_utc_offset_hours: i32,
    delay_minutes: u32,
    jitter_secs: u32,
) -> TriggerTime {
    let delta: i64 = host_offset_secs as i64 - (server_utc_offset_hours as i64) * 3600
        + (delay_minutes as i64) * 60
        + jitter_secs as i64;

    TriggerTime {
        hour: delta.div_euclid(3600).rem_euclid(24) as u32,
        minute: delta.div_euclid(60).rem_euclid(60) as u32,
        second: delta.rem_euclid(60) as u32,
    }
}

/// Sample a uniform jitter in `[0, range_seconds]` inclusive.
pub fn sample_jitter<R: Rng>(range_seconds: u32, rng: &mut R) -> u32 {
    if range_seconds == 0 {
        return 0;
    }
    rng.gen_range(0..=range_seconds)
}
