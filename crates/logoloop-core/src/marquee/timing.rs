//! L4 Atomic Layer: Time and wrap arithmetic for the marquee
//!
//! Pure functions shared by the velocity integrator and the simulator.

use std::time::Instant;

/// Seconds elapsed between two frames, never negative
///
/// The first frame of a loop has no predecessor and advances by zero.
#[inline]
pub fn elapsed_secs(last: Option<Instant>, now: Instant) -> f64 {
    match last {
        Some(last) => now.saturating_duration_since(last).as_secs_f64(),
        None => 0.0,
    }
}

/// Exponential smoothing factor for a frame of `dt` seconds
///
/// `1 - e^(-dt/tau)`; a non-positive `tau` snaps straight to the target.
#[inline]
pub fn easing_factor(dt: f64, tau: f64) -> f64 {
    if tau <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt.max(0.0) / tau).exp()
}

/// Wrap `offset` into `[0, width)`
///
/// Returns `offset` untouched when `width` is not positive.
#[inline]
pub fn wrap_offset(offset: f64, width: f64) -> f64 {
    if !(width > 0.0) {
        return offset;
    }
    let wrapped = ((offset % width) + width) % width;
    // `x % w + w` can round up to exactly `w` for tiny negative remainders
    if wrapped >= width {
        0.0
    } else {
        wrapped
    }
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
