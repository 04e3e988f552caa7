//! Solarized theme
//! https://ethanschoonover.com/solarized/

use ratatui::style::Color;
use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x00, 0x2b, 0x36), // base03
        bg1: Color::Rgb(0x07, 0x36, 0x42), // base02
        bg2: Color::Rgb(0x58, 0x6e, 0x75), // base01
        fg0: Color::Rgb(0x83, 0x94, 0x96), // base0
        fg1: Color::Rgb(0x93, 0xa1, 0xa1), // base1
        grey1: Color::Rgb(0x65, 0x7b, 0x83), // base00
        accent: Color::Rgb(0x2a, 0xa1, 0x98), // cyan
        info: Color::Rgb(0x26, 0x8b, 0xd2),   // blue
        warning: Color::Rgb(0xcb, 0x4b, 0x16), // orange
        error: Color::Rgb(0xdc, 0x32, 0x2f),  // red
        tooltip_bg: Color::Rgb(0xf2, 0xf2, 0xf2),
        tooltip_fg: Color::Rgb(0x0b, 0x0b, 0x0b),
    }
}

pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfd, 0xf6, 0xe3), // base3
        bg1: Color::Rgb(0xee, 0xe8, 0xd5), // base2
        bg2: Color::Rgb(0x93, 0xa1, 0xa1), // base1
        fg0: Color::Rgb(0x65, 0x7b, 0x83), // base00
        fg1: Color::Rgb(0x58, 0x6e, 0x75), // base01
        grey1: Color::Rgb(0x83, 0x94, 0x96), // base0
        accent: Color::Rgb(0x2a, 0xa1, 0x98),
        info: Color::Rgb(0x26, 0x8b, 0xd2),
        warning: Color::Rgb(0xcb, 0x4b, 0x16),
        error: Color::Rgb(0xdc, 0x32, 0x2f),
        tooltip_bg: Color::Rgb(0x0d, 0x0d, 0x0d),
        tooltip_fg: Color::Rgb(0xff, 0xff, 0xff),
    }
}
