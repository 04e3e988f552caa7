use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// One scheduled animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Loop that produced the tick
    pub generation: u64,
    pub at: Instant,
}

/// Cooperative loop emitting one [`FrameTick`] per interval
///
/// At most one tick is outstanding: when the receiver has not taken the
/// previous one, the next is skipped rather than queued.
pub struct FrameLoop {
    generation: u64,
    current: Arc<AtomicU64>,
    interval: Duration,
    tx: mpsc::Sender<FrameTick>,
}

impl FrameLoop {
    /// Run until shutdown, until superseded by a newer generation, or until
    /// the receiver is gone
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        debug!(
            generation = self.generation,
            interval_ms = self.interval.as_millis() as u64,
            "Frame loop started"
        );

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        break;
                    }
                }

                at = ticker.tick() => {
                    if self.current.load(Ordering::Acquire) != self.generation {
                        break;
                    }
                    let tick = FrameTick {
                        generation: self.generation,
                        at: at.into_std(),
                    };
                    match self.tx.try_send(tick) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => trace!("Previous frame still pending"),
                        Err(TrySendError::Closed(_)) => break,
                    }
                }
            }
        }

        debug!(generation = self.generation, "Frame loop stopped");
    }
}

/// Owner of the running frame loop
///
/// Cancelling (or dropping) the handle stops the loop; `restart` cancels and
/// schedules a fresh loop whose ticks carry a new generation. Ticks from an
/// older loop that are still in the channel fail [`AnimationHandle::is_current`].
pub struct AnimationHandle {
    interval: Duration,
    tx: mpsc::Sender<FrameTick>,
    current: Arc<AtomicU64>,
    generation: u64,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    /// Create a stopped handle feeding `tx`
    ///
    /// A channel of capacity 1 keeps a single frame outstanding.
    pub fn new(interval: Duration, tx: mpsc::Sender<FrameTick>) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            tx,
            current: Arc::new(AtomicU64::new(0)),
            generation: 0,
            shutdown: None,
            task: None,
        }
    }

    /// Create and start a loop; requires a tokio runtime
    pub fn spawn(interval: Duration, tx: mpsc::Sender<FrameTick>) -> Self {
        let mut handle = Self::new(interval, tx);
        handle.start();
        handle
    }

    /// Interval for a frame rate, ~60fps when `fps` is 0
    pub fn interval_for_fps(fps: u32) -> Duration {
        if fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_micros(1_000_000 / fps as u64)
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `tick` came from the loop currently running
    pub fn is_current(&self, tick: &FrameTick) -> bool {
        self.is_running()
            && tick.generation == self.generation
            && self.current.load(Ordering::Acquire) == self.generation
    }

    /// Start a loop unless one is already running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let frame_loop = FrameLoop {
            generation: self.generation,
            current: self.current.clone(),
            interval: self.interval,
            tx: self.tx.clone(),
        };

        self.task = Some(tokio::spawn(frame_loop.run(shutdown_rx)));
        self.shutdown = Some(shutdown_tx);
    }

    /// Stop the running loop; its pending ticks become stale
    pub fn cancel(&mut self) {
        // Bump first so the old loop cannot emit between here and abort
        self.current.fetch_add(1, Ordering::AcqRel);

        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(generation = self.generation, "Frame loop cancelled");
        }
    }

    /// Cancel and immediately schedule a fresh loop
    pub fn restart(&mut self) {
        self.cancel();
        self.start();
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_carry_current_generation() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = AnimationHandle::spawn(Duration::from_millis(16), tx);

        for _ in 0..3 {
            let tick = rx.recv().await.unwrap();
            assert!(handle.is_current(&tick));
            assert_eq!(tick.generation, handle.generation());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut handle = AnimationHandle::spawn(Duration::from_millis(16), tx);
        let first = rx.recv().await.unwrap();

        handle.cancel();
        assert!(!handle.is_running());
        assert!(!handle.is_current(&first));

        while let Ok(Some(_)) = timeout(Duration::from_millis(1), rx.recv()).await {}
        assert!(timeout(Duration::from_millis(200), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_discards_stale_ticks() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut handle = AnimationHandle::spawn(Duration::from_millis(16), tx);
        let old_generation = handle.generation();

        // let the first tick land in the channel
        tokio::time::sleep(Duration::from_millis(1)).await;
        handle.restart();
        assert!(handle.generation() > old_generation);

        let stale = rx.recv().await.unwrap();
        assert_eq!(stale.generation, old_generation);
        assert!(!handle.is_current(&stale));

        let fresh = rx.recv().await.unwrap();
        assert!(handle.is_current(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_closes_channel() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = AnimationHandle::spawn(Duration::from_millis(16), tx);
        tokio::time::sleep(Duration::from_millis(1)).await;
        drop(handle);

        let mut closed = false;
        for _ in 0..3 {
            match timeout(Duration::from_secs(1), rx.recv()).await {
                Ok(Some(_)) => continue,
                Ok(None) => {
                    closed = true;
                    break;
                }
                Err(_) => break,
            }
        }
        assert!(closed);
    }

    #[test]
    fn test_interval_for_fps() {
        assert_eq!(AnimationHandle::interval_for_fps(0), Duration::from_millis(16));
        assert_eq!(AnimationHandle::interval_for_fps(50), Duration::from_millis(20));
    }
}
