//! Resize observation with a window-resize fallback
//!
//! When element sizes can be observed, any width change of the container or
//! of the first copy requests a measurement. Without that capability only
//! window-level resizes do, plus the eager measurement at mount.

use tracing::debug;

use super::layout::MeasureTrigger;

/// Element whose width is watched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservedTarget {
    Container,
    Sequence,
}

#[derive(Debug, Clone)]
pub struct ResizeWatch {
    supported: bool,
    mounted: bool,
    container: Option<f64>,
    sequence: Option<f64>,
}

impl ResizeWatch {
    pub fn new(supported: bool) -> Self {
        if !supported {
            debug!("Element resize observation unavailable, using window resize events");
        }
        Self {
            supported,
            mounted: false,
            container: None,
            sequence: None,
        }
    }

    /// Whether element widths are observed (false means fallback mode)
    #[inline]
    pub fn is_observing(&self) -> bool {
        self.supported
    }

    /// Eager measurement request, issued once per mount
    pub fn mount(&mut self) -> Option<MeasureTrigger> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(MeasureTrigger::Mount)
    }

    /// Report the current width of an observed element
    pub fn observe(&mut self, target: ObservedTarget, width: f64) -> Option<MeasureTrigger> {
        let slot = match target {
            ObservedTarget::Container => &mut self.container,
            ObservedTarget::Sequence => &mut self.sequence,
        };
        let changed = *slot != Some(width);
        *slot = Some(width);

        if self.supported && changed {
            Some(MeasureTrigger::Resize)
        } else {
            None
        }
    }

    /// Window-level resize notification
    pub fn window_resized(&mut self) -> Option<MeasureTrigger> {
        if self.supported {
            // Observed elements report their own changes
            None
        } else {
            Some(MeasureTrigger::WindowResize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_fires_once() {
        let mut watch = ResizeWatch::new(true);
        assert_eq!(watch.mount(), Some(MeasureTrigger::Mount));
        assert_eq!(watch.mount(), None);
        watch.reset();
        assert_eq!(watch.mount(), Some(MeasureTrigger::Mount));
    }

    #[test]
    fn test_observed_changes() {
        let mut watch = ResizeWatch::new(true);
        assert_eq!(watch.observe(ObservedTarget::Container, 80.0), Some(MeasureTrigger::Resize));
        assert_eq!(watch.observe(ObservedTarget::Container, 80.0), None);
        assert_eq!(watch.observe(ObservedTarget::Sequence, 80.0), Some(MeasureTrigger::Resize));
        assert_eq!(watch.observe(ObservedTarget::Container, 100.0), Some(MeasureTrigger::Resize));
        assert_eq!(watch.window_resized(), None);
    }

    #[test]
    fn test_fallback_only_reacts_to_window() {
        let mut watch = ResizeWatch::new(false);
        assert!(!watch.is_observing());
        assert_eq!(watch.mount(), Some(MeasureTrigger::Mount));
        assert_eq!(watch.observe(ObservedTarget::Container, 80.0), None);
        assert_eq!(watch.observe(ObservedTarget::Container, 120.0), None);
        assert_eq!(watch.window_resized(), Some(MeasureTrigger::WindowResize));
    }
}
