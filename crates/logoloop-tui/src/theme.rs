use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey1: Color,

    // Semantic colors
    pub accent: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,

    // Floating label, drawn in the inverse of the page
    pub tooltip_bg: Color,
    pub tooltip_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Default to Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            error: Color::Rgb(0xea, 0x69, 0x62),
            tooltip_bg: Color::Rgb(0xf2, 0xf2, 0xf2),
            tooltip_fg: Color::Rgb(0x0b, 0x0b, 0x0b),
        }
    }
}
