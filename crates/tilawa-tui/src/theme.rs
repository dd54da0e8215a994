use ratatui::style::Color;
use tilawa_core::ThemeMode;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,

    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Palette colors
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,

    // Semantic colors
    pub selection: Color,
    /// Background of the active verse in reading mode
    pub active_verse: Color,
    pub arabic: Color,
    pub translation: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Gruvbox Material dark
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            active_verse: Color::Rgb(0x32, 0x3d, 0x34),
            arabic: Color::Rgb(0xdd, 0xc7, 0xa1),
            translation: Color::Rgb(0xa8, 0x99, 0x84),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }

    /// Gruvbox Material light
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
            bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
            bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
            fg0: Color::Rgb(0x65, 0x47, 0x35),
            fg1: Color::Rgb(0x4f, 0x38, 0x29),
            grey0: Color::Rgb(0xa8, 0x99, 0x84),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0x7c, 0x6f, 0x64),
            yellow: Color::Rgb(0xb4, 0x71, 0x09),
            green: Color::Rgb(0x6c, 0x78, 0x2e),
            aqua: Color::Rgb(0x4c, 0x7a, 0x5d),
            selection: Color::Rgb(0xeb, 0xdb, 0xb2),
            active_verse: Color::Rgb(0xe3, 0xe8, 0xc0),
            arabic: Color::Rgb(0x4f, 0x38, 0x29),
            translation: Color::Rgb(0x7c, 0x6f, 0x64),
            error: Color::Rgb(0xc1, 0x4a, 0x4a),
            success: Color::Rgb(0x6c, 0x78, 0x2e),
            warning: Color::Rgb(0xc3, 0x5e, 0x0a),
            accent: Color::Rgb(0x4c, 0x7a, 0x5d),
        }
    }
}
