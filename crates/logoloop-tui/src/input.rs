use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use logoloop_core::config::Direction;

use crate::app::{App, Mode};
use crate::keymap::Keymap;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    ToggleTheme,
    /// Hold the track as if hovered
    TogglePause,
    ToggleReducedMotion,
    ReverseDirection,
    SetDirection(Direction),
    SpeedUp,
    SpeedDown,
    /// Open the hovered item's link
    OpenLink,
    ShowHelp,
    ExitMode,
    None,
}

/// Pointer movement relevant to hover tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer is over the given cell
    Moved { column: u16, row: u16 },
    /// Pointer left the terminal
    Left,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Ctrl+C quits from every mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    if let KeyCode::Char('?') = key.code {
        return Action::ShowHelp;
    }

    keymap.lookup(key.code, key.modifiers).unwrap_or(Action::None)
}

/// Translate a mouse event into a pointer position update
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<PointerEvent> {
    match mouse.kind {
        MouseEventKind::Moved
        | MouseEventKind::Drag(_)
        | MouseEventKind::Down(_)
        | MouseEventKind::Up(_) => Some(PointerEvent::Moved {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}
