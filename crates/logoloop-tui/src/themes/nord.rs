//! Nord theme
//! https://www.nordtheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Polar Night background with Snow Storm text
pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        bg1: Color::Rgb(0x3b, 0x42, 0x52), // nord1
        bg2: Color::Rgb(0x43, 0x4c, 0x5e), // nord2
        fg0: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0), // nord5
        grey1: Color::Rgb(0x5e, 0x68, 0x7a), // nord3 lighter
        accent: Color::Rgb(0x8f, 0xbc, 0xbb), // nord7
        info: Color::Rgb(0x88, 0xc0, 0xd0),   // nord8
        warning: Color::Rgb(0xd0, 0x87, 0x70), // nord12
        error: Color::Rgb(0xbf, 0x61, 0x6a),  // nord11
        tooltip_bg: Color::Rgb(0xf2, 0xf2, 0xf2),
        tooltip_fg: Color::Rgb(0x0b, 0x0b, 0x0b),
    }
}

/// Snow Storm background with Polar Night text
pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        bg1: Color::Rgb(0xe5, 0xe9, 0xf0), // nord5
        bg2: Color::Rgb(0xd8, 0xde, 0xe9), // nord4
        fg0: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        fg1: Color::Rgb(0x3b, 0x42, 0x52), // nord1
        grey1: Color::Rgb(0x4c, 0x56, 0x6a), // nord3
        accent: Color::Rgb(0x5e, 0x81, 0xac), // nord10
        info: Color::Rgb(0x81, 0xa1, 0xc1),   // nord9
        warning: Color::Rgb(0xd0, 0x87, 0x70),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
        tooltip_bg: Color::Rgb(0x0d, 0x0d, 0x0d),
        tooltip_fg: Color::Rgb(0xff, 0xff, 0xff),
    }
}
