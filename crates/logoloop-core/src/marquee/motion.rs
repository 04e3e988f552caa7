//! L3 Molecular Layer: Velocity integrator
//!
//! Each frame the current velocity is eased towards the target with an
//! exponential filter, then the offset advances by `velocity * dt` and is
//! wrapped into one sequence width.

use std::time::Instant;

use super::timing::{easing_factor, elapsed_secs, wrap_offset};

/// Per-mount animation state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    /// Units per second; starts at rest
    pub velocity: f64,
    /// Kept in `[0, sequence_width)` while a width is known
    pub offset: f64,
    /// Timestamp of the previous frame of the running loop
    pub last_frame: Option<Instant>,
}

/// Smooths velocity and integrates the offset
#[derive(Debug, Clone, Copy)]
pub struct VelocityIntegrator {
    tau: f64,
}

impl VelocityIntegrator {
    pub fn new(tau: f64) -> Self {
        Self { tau }
    }

    /// Velocity to smooth towards: zero while paused by hover
    #[inline]
    pub fn target(base_velocity: f64, pause_on_hover: bool, hovered: bool) -> f64 {
        if pause_on_hover && hovered {
            0.0
        } else {
            base_velocity
        }
    }

    /// Run one frame at `now`; returns the seconds that were integrated
    pub fn step(
        &self,
        state: &mut MotionState,
        now: Instant,
        target: f64,
        sequence_width: f64,
    ) -> f64 {
        let dt = elapsed_secs(state.last_frame, now);
        state.last_frame = Some(now);
        self.advance(state, dt, target, sequence_width);
        dt
    }

    /// Integrate `dt` seconds without touching the frame timestamp
    pub fn advance(&self, state: &mut MotionState, dt: f64, target: f64, sequence_width: f64) {
        let dt = dt.max(0.0);
        let easing = easing_factor(dt, self.tau);
        state.velocity += (target - state.velocity) * easing;

        if sequence_width > 0.0 {
            state.offset = wrap_offset(state.offset + state.velocity * dt, sequence_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn frames(
        integrator: &VelocityIntegrator,
        state: &mut MotionState,
        start: Instant,
        count: u32,
        target: f64,
        width: f64,
    ) -> Instant {
        let frame = Duration::from_secs_f64(1.0 / 60.0);
        let mut now = start;
        for _ in 0..count {
            integrator.step(state, now, target, width);
            now += frame;
        }
        now
    }

    #[test]
    fn test_target_velocity() {
        assert_eq!(VelocityIntegrator::target(80.0, true, true), 0.0);
        assert_eq!(VelocityIntegrator::target(80.0, false, true), 80.0);
        assert_eq!(VelocityIntegrator::target(80.0, true, false), 80.0);
    }

    #[test]
    fn test_first_frame_does_not_move() {
        let integrator = VelocityIntegrator::new(0.25);
        let mut state = MotionState::default();
        let dt = integrator.step(&mut state, Instant::now(), 80.0, 1000.0);
        assert_eq!(dt, 0.0);
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.offset, 0.0);
    }

    #[test]
    fn test_velocity_approaches_target_from_rest() {
        let integrator = VelocityIntegrator::new(0.25);
        let mut state = MotionState::default();
        // 61 frames = 1 second of elapsed time after the first frame
        frames(&integrator, &mut state, Instant::now(), 61, 80.0, 1000.0);

        assert!(state.velocity > 0.98 * 80.0, "velocity {}", state.velocity);
        assert!(state.velocity < 80.0);
        // integral of 80 * (1 - e^(-t/0.25)) over one second is about 60.4
        assert!((state.offset - 60.4).abs() < 2.0, "offset {}", state.offset);
    }

    #[test]
    fn test_warm_velocity_covers_full_distance() {
        let integrator = VelocityIntegrator::new(0.25);
        let mut state = MotionState {
            velocity: 80.0,
            ..Default::default()
        };
        frames(&integrator, &mut state, Instant::now(), 61, 80.0, 1000.0);
        assert!(state.offset >= 77.0 && state.offset <= 80.5, "offset {}", state.offset);
    }

    #[test]
    fn test_negative_velocity_wraps() {
        let integrator = VelocityIntegrator::new(0.25);
        let mut state = MotionState {
            velocity: -100.0,
            offset: 10.0,
            last_frame: None,
        };
        integrator.advance(&mut state, 0.5, -100.0, 200.0);
        assert!((state.offset - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_keeps_offset() {
        let integrator = VelocityIntegrator::new(0.25);
        let mut state = MotionState {
            velocity: 50.0,
            offset: 12.0,
            last_frame: None,
        };
        integrator.advance(&mut state, 0.1, 50.0, 0.0);
        assert_eq!(state.offset, 12.0);
    }

    #[test]
    fn test_hover_pause_decays_velocity() {
        let integrator = VelocityIntegrator::new(0.25);
        let mut state = MotionState {
            velocity: 120.0,
            ..Default::default()
        };
        let target = VelocityIntegrator::target(120.0, true, true);
        // 5 * tau seconds of frames
        frames(&integrator, &mut state, Instant::now(), 76, target, 1000.0);
        assert!(state.velocity.abs() < 0.01 * 120.0, "velocity {}", state.velocity);
    }
}
