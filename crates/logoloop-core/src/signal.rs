//! Ambient theme signal
//!
//! A broadcast light/dark value that any number of components subscribe to.
//! Dropping a subscription unsubscribes.

use tokio::sync::watch;
use tracing::debug;

use crate::config::ThemeMode;

#[derive(Debug)]
pub struct ThemeSignal {
    tx: watch::Sender<ThemeMode>,
}

impl ThemeSignal {
    pub fn new(mode: ThemeMode) -> Self {
        let (tx, _) = watch::channel(mode);
        Self { tx }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.tx.borrow()
    }

    /// Broadcast `mode`; returns false when it was already current
    pub fn set(&self, mode: ThemeMode) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == mode {
                false
            } else {
                *current = mode;
                true
            }
        });
        if changed {
            debug!(?mode, subscribers = self.tx.receiver_count(), "Theme mode changed");
        }
        changed
    }

    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ThemeSignal {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[derive(Debug, Clone)]
pub struct ThemeSubscription {
    rx: watch::Receiver<ThemeMode>,
}

impl ThemeSubscription {
    pub fn current(&self) -> ThemeMode {
        *self.rx.borrow()
    }

    /// Take a pending change, if any, marking it seen
    pub fn poll_change(&mut self) -> Option<ThemeMode> {
        if self.rx.has_changed().unwrap_or(false) {
            Some(*self.rx.borrow_and_update())
        } else {
            None
        }
    }

    /// Wait for the next change; `None` once the signal is gone
    pub async fn changed(&mut self) -> Option<ThemeMode> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
