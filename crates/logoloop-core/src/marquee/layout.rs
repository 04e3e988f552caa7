//! L3 Molecular Layer: Layout measurer
//!
//! Turns raw measurements of one content copy and its container into the
//! rounded sequence width and the number of copies to mount.

use tracing::debug;

use crate::config::MarqueeConfig;

/// What caused a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureTrigger {
    /// Eager measurement when the marquee is mounted
    Mount,
    /// An observed element changed width
    Resize,
    /// Window-level resize (fallback when elements cannot be observed)
    WindowResize,
    /// Every image in the first copy has loaded or failed
    ImagesSettled,
    /// Content list, gap or item size changed
    InputsChanged,
}

/// Result of the latest successful measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Width of one copy, rounded up to a whole unit; 0 until measured
    pub sequence_width: f64,
    pub container_width: f64,
    /// Copies of the sequence to mount, never below the configured minimum
    pub copy_count: usize,
}

/// Copies required to tile `container_width` plus headroom
///
/// `max(min_copies, ceil(container / sequence) + headroom)`; callers must
/// pass a positive `sequence_width`.
pub fn copies_needed(
    container_width: f64,
    sequence_width: f64,
    min_copies: usize,
    headroom: usize,
) -> usize {
    let ratio = (container_width / sequence_width).ceil();
    let tiles = if ratio.is_finite() && ratio > 0.0 {
        ratio as usize
    } else {
        0
    };
    tiles.saturating_add(headroom).max(min_copies)
}

#[derive(Debug, Clone)]
pub struct LayoutMeasurer {
    min_copies: usize,
    headroom: usize,
    state: LayoutState,
}

impl LayoutMeasurer {
    pub fn new(min_copies: usize, headroom: usize) -> Self {
        let min_copies = min_copies.max(1);
        Self {
            min_copies,
            headroom,
            state: LayoutState {
                sequence_width: 0.0,
                container_width: 0.0,
                copy_count: min_copies,
            },
        }
    }

    pub fn from_config(config: &MarqueeConfig) -> Self {
        Self::new(config.min_copies, config.copy_headroom)
    }

    #[inline]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    #[inline]
    pub fn sequence_width(&self) -> f64 {
        self.state.sequence_width
    }

    #[inline]
    pub fn copy_count(&self) -> usize {
        self.state.copy_count
    }

    /// Apply a measurement; returns whether the layout changed
    ///
    /// A collapsed sequence (zero, negative or non-finite width) leaves the
    /// previous layout untouched.
    pub fn measure(
        &mut self,
        container_width: f64,
        sequence_width: f64,
        trigger: MeasureTrigger,
    ) -> bool {
        if !(sequence_width.is_finite() && sequence_width > 0.0) {
            debug!(?trigger, sequence_width, "Skipping measurement of collapsed sequence");
            return false;
        }

        let container_width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };

        let next = LayoutState {
            sequence_width: sequence_width.ceil(),
            container_width,
            copy_count: copies_needed(
                container_width,
                sequence_width,
                self.min_copies,
                self.headroom,
            ),
        };

        if next == self.state {
            return false;
        }

        debug!(
            ?trigger,
            sequence_width = next.sequence_width,
            container_width = next.container_width,
            copy_count = next.copy_count,
            "Marquee layout updated"
        );
        self.state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_uses_min_copies() {
        let measurer = LayoutMeasurer::new(3, 2);
        assert_eq!(measurer.copy_count(), 3);
        assert_eq!(measurer.sequence_width(), 0.0);
    }

    #[test]
    fn test_scenario_copy_count() {
        let mut measurer = LayoutMeasurer::new(2, 2);
        assert!(measurer.measure(1200.0, 1000.0, MeasureTrigger::Mount));
        assert_eq!(measurer.copy_count(), 4);
        assert_eq!(measurer.sequence_width(), 1000.0);
    }

    #[test]
    fn test_sequence_width_rounds_up() {
        let mut measurer = LayoutMeasurer::new(2, 2);
        measurer.measure(100.0, 33.2, MeasureTrigger::Resize);
        assert_eq!(measurer.sequence_width(), 34.0);
        // Division uses the raw width: ceil(100 / 33.2) = 4
        assert_eq!(measurer.copy_count(), 6);
    }

    #[test]
    fn test_min_copies_floor() {
        let mut measurer = LayoutMeasurer::new(5, 0);
        measurer.measure(10.0, 1000.0, MeasureTrigger::Resize);
        assert_eq!(measurer.copy_count(), 5);
    }

    #[test]
    fn test_zero_width_keeps_previous_layout() {
        let mut measurer = LayoutMeasurer::new(2, 2);
        measurer.measure(1200.0, 1000.0, MeasureTrigger::Mount);
        let before = measurer.state();

        assert!(!measurer.measure(5000.0, 0.0, MeasureTrigger::Resize));
        assert!(!measurer.measure(5000.0, f64::NAN, MeasureTrigger::Resize));
        assert_eq!(measurer.state(), before);
    }

    #[test]
    fn test_measure_is_idempotent() {
        let mut measurer = LayoutMeasurer::new(2, 2);
        assert!(measurer.measure(800.0, 250.5, MeasureTrigger::Mount));
        let first = measurer.state();
        assert!(!measurer.measure(800.0, 250.5, MeasureTrigger::Resize));
        assert_eq!(measurer.state(), first);
    }

    #[test]
    fn test_copies_needed_empty_container() {
        assert_eq!(copies_needed(0.0, 100.0, 2, 2), 2);
        assert_eq!(copies_needed(0.0, 100.0, 1, 0), 1);
    }
}
