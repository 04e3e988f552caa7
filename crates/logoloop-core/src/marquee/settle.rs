//! Image settle tracking
//!
//! Measurement of the first copy is only meaningful once every image in it
//! has its intrinsic size. A load failure settles an image just like a
//! successful load, so a broken image never blocks measurement.

use std::collections::HashSet;

use tracing::{debug, trace};

/// How an outstanding image finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Loaded,
    Failed,
}

/// A settle round started by [`ImageSettleTracker::begin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleRound {
    pub generation: u64,
    /// Item indices still waiting for a load or error event
    pub pending: Vec<usize>,
    /// True when nothing was outstanding; measure right away
    pub settled: bool,
}

#[derive(Debug, Default)]
pub struct ImageSettleTracker {
    generation: u64,
    pending: HashSet<usize>,
}

impl ImageSettleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Start a new round over `(item index, already complete)` pairs
    ///
    /// Events still in flight for the previous round are ignored from now on.
    pub fn begin<I>(&mut self, images: I) -> SettleRound
    where
        I: IntoIterator<Item = (usize, bool)>,
    {
        self.generation += 1;
        self.pending = images
            .into_iter()
            .filter(|(_, complete)| !complete)
            .map(|(index, _)| index)
            .collect();

        let mut pending: Vec<usize> = self.pending.iter().copied().collect();
        pending.sort_unstable();

        debug!(
            generation = self.generation,
            outstanding = pending.len(),
            "Image settle round started"
        );

        SettleRound {
            generation: self.generation,
            settled: pending.is_empty(),
            pending,
        }
    }

    /// Record a load or error event; returns true when it settles the round
    pub fn settle(&mut self, generation: u64, index: usize, outcome: SettleOutcome) -> bool {
        if generation != self.generation {
            trace!(generation, current = self.generation, "Ignoring stale image event");
            return false;
        }
        if !self.pending.remove(&index) {
            return false;
        }
        trace!(index, ?outcome, remaining = self.pending.len(), "Image settled");
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_images_settles_immediately() {
        let mut tracker = ImageSettleTracker::new();
        let round = tracker.begin(std::iter::empty());
        assert!(round.settled);
        assert!(tracker.is_settled());
    }

    #[test]
    fn test_complete_images_do_not_wait() {
        let mut tracker = ImageSettleTracker::new();
        let round = tracker.begin([(0, true), (1, true)]);
        assert!(round.settled);
    }

    #[test]
    fn test_error_counts_as_settled() {
        let mut tracker = ImageSettleTracker::new();
        let round = tracker.begin([(0, false), (1, false), (2, true)]);
        assert_eq!(round.pending, vec![0, 1]);

        assert!(!tracker.settle(round.generation, 0, SettleOutcome::Loaded));
        assert!(tracker.settle(round.generation, 1, SettleOutcome::Failed));
        assert!(tracker.is_settled());
    }

    #[test]
    fn test_duplicate_events_fire_once() {
        let mut tracker = ImageSettleTracker::new();
        let round = tracker.begin([(3, false)]);
        assert!(tracker.settle(round.generation, 3, SettleOutcome::Loaded));
        assert!(!tracker.settle(round.generation, 3, SettleOutcome::Failed));
        assert!(!tracker.settle(round.generation, 9, SettleOutcome::Loaded));
    }

    #[test]
    fn test_stale_generation_ignored() {
        let mut tracker = ImageSettleTracker::new();
        let old = tracker.begin([(0, false)]);
        let new = tracker.begin([(0, false), (1, false)]);

        assert!(!tracker.settle(old.generation, 0, SettleOutcome::Loaded));
        assert_eq!(tracker.remaining(), 2);
        assert!(!tracker.settle(new.generation, 0, SettleOutcome::Loaded));
        assert!(tracker.settle(new.generation, 1, SettleOutcome::Loaded));
    }
}
