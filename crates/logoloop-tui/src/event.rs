use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::input::{handle_mouse_event, PointerEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

/// Result of probing a media item's intrinsic size
#[derive(Debug, Clone, PartialEq)]
pub enum MediaLoadResult {
    /// Dimensions read successfully
    Success {
        generation: u64,
        index: usize,
        size: (u32, u32),
    },
    /// Image could not be read; counts as settled
    Failure {
        generation: u64,
        index: usize,
        error: String,
    },
}

impl MediaLoadResult {
    pub fn generation(&self) -> u64 {
        match self {
            MediaLoadResult::Success { generation, .. }
            | MediaLoadResult::Failure { generation, .. } => *generation,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            MediaLoadResult::Success { index, .. } | MediaLoadResult::Failure { index, .. } => {
                *index
            }
        }
    }
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event, waiting up to the tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }

    /// Take every event already queued without blocking
    ///
    /// Used while the frame loop paces the main loop.
    pub fn drain(&self) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(event) = translate(event::read()?) {
                events.push(event);
            }
        }
        Ok(events)
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => {
            // Only handle key press events, ignore release events
            // (crossterm 0.27+ sends release events on some systems)
            if key.kind == KeyEventKind::Press {
                Some(AppEvent::Key(key))
            } else {
                None
            }
        }
        Event::Mouse(mouse) => handle_mouse_event(mouse).map(AppEvent::Pointer),
        Event::FocusLost => Some(AppEvent::Pointer(PointerEvent::Left)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse moved or left the window
    Pointer(PointerEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_release_events_are_dropped() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(translate(Event::Key(key)), Some(AppEvent::Key(_))));

        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert!(translate(Event::Key(key)).is_none());
    }

    #[test]
    fn test_focus_lost_leaves_pointer() {
        assert!(matches!(
            translate(Event::FocusLost),
            Some(AppEvent::Pointer(PointerEvent::Left))
        ));
        assert!(matches!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
    }

    #[test]
    fn test_media_result_accessors() {
        let result = MediaLoadResult::Failure {
            generation: 3,
            index: 7,
            error: "missing".into(),
        };
        assert_eq!(result.generation(), 3);
        assert_eq!(result.index(), 7);
    }
}
