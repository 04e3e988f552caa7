//! Gruvbox Material theme
//! https://github.com/sainnhe/gruvbox-material

use ratatui::style::Color;
use crate::theme::Theme;

/// Gruvbox Material dark (medium)
pub fn dark() -> Theme {
    Theme::default()
}

/// Gruvbox Material light (medium)
pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
        bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
        fg0: Color::Rgb(0x65, 0x47, 0x35),
        fg1: Color::Rgb(0x4f, 0x38, 0x29),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0x4c, 0x7a, 0x5d),
        info: Color::Rgb(0x45, 0x70, 0x7a),
        warning: Color::Rgb(0xc3, 0x5e, 0x0a),
        error: Color::Rgb(0xc1, 0x4a, 0x4a),
        tooltip_bg: Color::Rgb(0x0d, 0x0d, 0x0d),
        tooltip_fg: Color::Rgb(0xff, 0xff, 0xff),
    }
}
