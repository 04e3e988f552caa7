use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use logoloop_core::config::{Direction, KeymapConfig};
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for efficient key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        // Helper to add binding with conflict detection
        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.toggle_theme, Action::ToggleTheme);
        add_binding(&config.toggle_pause, Action::TogglePause);
        add_binding(&config.toggle_reduced_motion, Action::ToggleReducedMotion);
        add_binding(&config.reverse_direction, Action::ReverseDirection);
        add_binding(&config.speed_up, Action::SpeedUp);
        add_binding(&config.speed_down, Action::SpeedDown);
        add_binding(&config.open_link, Action::OpenLink);

        // Hardcoded bindings that shouldn't be configurable
        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Esc quits unless bound to something else
        bindings.entry(KeyBinding::simple(KeyCode::Esc)).or_insert(Action::Quit);
        // Arrow keys steer the track
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::SpeedUp);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::SpeedDown);
        bindings
            .entry(KeyBinding::simple(KeyCode::Left))
            .or_insert(Action::SetDirection(Direction::Left));
        bindings
            .entry(KeyBinding::simple(KeyCode::Right))
            .or_insert(Action::SetDirection(Direction::Right));

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Look up a key press, ignoring Shift on symbols
    ///
    /// Terminals disagree on whether `+` arrives with the Shift modifier.
    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        if let Some(action) = self.get(&KeyBinding::new(code, modifiers)) {
            return Some(*action);
        }
        match code {
            KeyCode::Char(c) if modifiers == KeyModifiers::SHIFT && !c.is_ascii_alphabetic() => {
                self.get(&KeyBinding::simple(code)).copied()
            }
            _ => None,
        }
    }
}

/// Parse a binding written in Vim notation
///
/// A single character binds that key, an uppercase letter binds it with
/// Shift, and `<...>` names a special key with optional `C-`, `S-` or `A-`
/// prefixes, e.g. `<Space>`, `<CR>`, `<C-r>`, `<S-Left>`.
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    if s == " " {
        return Some(KeyBinding::simple(KeyCode::Char(' ')));
    }
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_bracketed(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

fn parse_bracketed(inner: &str) -> Option<KeyBinding> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = inner;
    loop {
        let (flag, tail) = match rest.get(..2) {
            Some("C-" | "c-") => (KeyModifiers::CONTROL, &rest[2..]),
            Some("S-" | "s-") => (KeyModifiers::SHIFT, &rest[2..]),
            Some("A-" | "a-" | "M-" | "m-") => (KeyModifiers::ALT, &rest[2..]),
            _ => break,
        };
        // "<C-->" binds Ctrl and the minus key
        if tail.is_empty() {
            break;
        }
        modifiers |= flag;
        rest = tail;
    }

    let code = match parse_key_name(rest)? {
        // Terminals report Shift+letter as the uppercase letter
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => {
            KeyCode::Char(c.to_ascii_uppercase())
        }
        code => code,
    };
    Some(KeyBinding::new(code, modifiers))
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" | "spc" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "lt" => KeyCode::Char('<'),
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_bindings() {
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding(" "),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("+"),
            Some(KeyBinding::simple(KeyCode::Char('+')))
        );
        assert_eq!(
            parse_key_binding("-"),
            Some(KeyBinding::simple(KeyCode::Char('-')))
        );
        assert_eq!(
            parse_key_binding("<CR>"),
            Some(KeyBinding::simple(KeyCode::Enter))
        );
    }

    #[test]
    fn test_parse_uppercase_is_shifted() {
        assert_eq!(
            parse_key_binding("R"),
            Some(KeyBinding::shift(KeyCode::Char('R')))
        );
        assert_eq!(
            parse_key_binding("<S-r>"),
            Some(KeyBinding::shift(KeyCode::Char('R')))
        );
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(
            parse_key_binding("<C-r>"),
            Some(KeyBinding::ctrl(KeyCode::Char('r')))
        );
        assert_eq!(
            parse_key_binding("<C-->"),
            Some(KeyBinding::ctrl(KeyCode::Char('-')))
        );
        assert_eq!(
            parse_key_binding("<C-S-Left>"),
            Some(KeyBinding::new(
                KeyCode::Left,
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            ))
        );
        assert_eq!(
            parse_key_binding("<A-m>"),
            Some(KeyBinding::new(KeyCode::Char('m'), KeyModifiers::ALT))
        );
        assert_eq!(parse_key_binding("<F5>"), Some(KeyBinding::simple(KeyCode::F(5))));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(parse_key_binding("speed"), None);
        assert_eq!(parse_key_binding("<Hyper-x>"), None);
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_rebound_pause_key() {
        let config = KeymapConfig {
            toggle_pause: "p".to_string(),
            reverse_direction: "R".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.lookup(KeyCode::Char('p'), KeyModifiers::NONE),
            Some(Action::TogglePause)
        );
        assert_eq!(keymap.lookup(KeyCode::Char(' '), KeyModifiers::NONE), None);
        assert_eq!(
            keymap.lookup(KeyCode::Char('R'), KeyModifiers::SHIFT),
            Some(Action::ReverseDirection)
        );
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char(' '))),
            Some(&Action::TogglePause)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Enter)),
            Some(&Action::OpenLink)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Left)),
            Some(&Action::SetDirection(Direction::Left))
        );
    }

    #[test]
    fn test_lookup_ignores_shift_on_symbols() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.lookup(KeyCode::Char('+'), KeyModifiers::SHIFT),
            Some(Action::SpeedUp)
        );
        // letters keep their case meaning
        assert_eq!(keymap.lookup(KeyCode::Char('Q'), KeyModifiers::SHIFT), None);
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            toggle_theme: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }
}
