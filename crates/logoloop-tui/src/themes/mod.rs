//! Theme registry and loader
//!
//! Each theme family has a light and a dark variant; the variant follows the
//! ambient theme mode unless the name pins one (`gruvbox-light`).

mod gruvbox;
mod nord;
mod solarized;

use logoloop_core::config::{MarqueeConfig, ThemeConfig, ThemeMode};
use ratatui::style::Color;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Split a theme name into its family and the variant it pins, if any
fn split_name(name: &str) -> (String, Option<ThemeMode>) {
    let name = name.to_lowercase();
    if let Some(family) = name.strip_suffix("-light") {
        (family.to_string(), Some(ThemeMode::Light))
    } else if let Some(family) = name.strip_suffix("-dark") {
        (family.to_string(), Some(ThemeMode::Dark))
    } else {
        (name, None)
    }
}

/// Variant fixed by a `-light`/`-dark` suffix
pub fn pinned_mode(config: &ThemeConfig) -> Option<ThemeMode> {
    split_name(&config.name).1
}

/// Whether the name refers to a known theme family
pub fn is_known_theme(config: &ThemeConfig) -> bool {
    let (family, _) = split_name(&config.name);
    available_themes().contains(&family.as_str())
}

/// Load a theme by name for the given mode
pub fn load_theme(config: &ThemeConfig, mode: ThemeMode) -> Theme {
    let (family, pinned) = split_name(&config.name);
    let mode = pinned.unwrap_or(mode);

    match (family.as_str(), mode) {
        ("solarized", ThemeMode::Light) => solarized::light(),
        ("solarized", ThemeMode::Dark) => solarized::dark(),

        ("nord", ThemeMode::Light) => nord::light(),
        ("nord", ThemeMode::Dark) => nord::dark(),

        // Default fallback
        (_, ThemeMode::Light) => gruvbox::light(),
        (_, ThemeMode::Dark) => gruvbox::dark(),
    }
}

/// Edge fade colour when none is configured
pub fn auto_fade_color(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Light => Color::Rgb(0xff, 0xff, 0xff),
        ThemeMode::Dark => Color::Rgb(0x0b, 0x0b, 0x0b),
    }
}

/// Configured edge fade colour, falling back to the mode's automatic one
pub fn fade_color(config: &MarqueeConfig, mode: ThemeMode) -> Color {
    config
        .fade_out_color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or_else(|| auto_fade_color(mode))
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox", "nord", "solarized"]
}
