//! L2 Organism Layer: Marquee engine
//!
//! Owns layout, motion and hover state for one marquee instance and hands
//! the render driver a transform per frame.

use std::time::Instant;

use tracing::debug;

use crate::config::{Direction, MarqueeConfig};

use super::layout::{LayoutMeasurer, LayoutState, MeasureTrigger};
use super::motion::{MotionState, VelocityIntegrator};
use super::timing::wrap_offset;
use super::track::Transform;

/// Inputs whose change cancels and reschedules the frame loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoverningInputs {
    pub target_velocity: f64,
    pub sequence_width: f64,
    pub hovered: bool,
    pub pause_on_hover: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone)]
pub struct MarqueeEngine {
    speed: f64,
    direction: Direction,
    pause_on_hover: bool,
    reduced_motion: bool,
    hovered: bool,
    layout: LayoutMeasurer,
    integrator: VelocityIntegrator,
    motion: MotionState,
}

impl MarqueeEngine {
    pub fn new(config: &MarqueeConfig) -> Self {
        Self {
            speed: config.speed,
            direction: config.direction,
            pause_on_hover: config.pause_on_hover,
            reduced_motion: config.reduced_motion,
            hovered: false,
            layout: LayoutMeasurer::from_config(config),
            integrator: VelocityIntegrator::new(config.smoothing_tau),
            motion: MotionState::default(),
        }
    }

    #[inline]
    pub fn layout(&self) -> LayoutState {
        self.layout.state()
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.motion.offset
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.motion.velocity
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn pause_on_hover(&self) -> bool {
        self.pause_on_hover
    }

    #[inline]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Whether a frame loop should be running
    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.reduced_motion
    }

    /// Signed steady-state velocity from speed and direction
    pub fn base_velocity(&self) -> f64 {
        self.direction.signed_speed(self.speed)
    }

    /// Velocity the integrator is currently smoothing towards
    pub fn target_velocity(&self) -> f64 {
        VelocityIntegrator::target(self.base_velocity(), self.pause_on_hover, self.hovered)
    }

    pub fn governing_inputs(&self) -> GoverningInputs {
        GoverningInputs {
            target_velocity: self.base_velocity(),
            sequence_width: self.layout.sequence_width(),
            hovered: self.hovered,
            pause_on_hover: self.pause_on_hover,
            reduced_motion: self.reduced_motion,
        }
    }

    /// Pointer entered or left the container
    ///
    /// Hover is only tracked while pause-on-hover is enabled.
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        if !self.pause_on_hover || self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        true
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) -> bool {
        if self.reduced_motion == reduced {
            return false;
        }
        self.reduced_motion = reduced;
        true
    }

    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.speed = speed;
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Apply a measurement of the container and the first copy
    pub fn measure(
        &mut self,
        container_width: f64,
        sequence_width: f64,
        trigger: MeasureTrigger,
    ) -> bool {
        self.layout.measure(container_width, sequence_width, trigger)
    }

    /// Set up a (re)started frame loop and return the transform to apply
    ///
    /// The offset is re-wrapped against the latest sequence width; with
    /// reduced motion the strip is pinned to a neutral transform.
    pub fn begin(&mut self) -> Transform {
        let width = self.layout.sequence_width();
        let mut transform = Transform::Untransformed;
        if width > 0.0 {
            self.motion.offset = wrap_offset(self.motion.offset, width);
            transform = Transform::Translate(-self.motion.offset);
        }
        if self.reduced_motion {
            debug!(offset = self.motion.offset, "Reduced motion, marquee held static");
            return Transform::NEUTRAL;
        }
        transform
    }

    /// Advance one frame at `now`
    pub fn frame(&mut self, now: Instant) -> Transform {
        if self.reduced_motion {
            return Transform::NEUTRAL;
        }

        let width = self.layout.sequence_width();
        let target = self.target_velocity();
        self.integrator.step(&mut self.motion, now, target, width);

        if width > 0.0 {
            Transform::Translate(-self.motion.offset)
        } else {
            Transform::Untransformed
        }
    }

    /// Transform for the current state without advancing time
    pub fn transform(&self) -> Transform {
        if self.reduced_motion {
            Transform::NEUTRAL
        } else if self.layout.sequence_width() > 0.0 {
            Transform::Translate(-self.motion.offset)
        } else {
            Transform::Untransformed
        }
    }

    /// Loop cancelled; the next loop starts with a zero-length frame
    pub fn teardown(&mut self) {
        self.motion.last_frame = None;
    }
}
