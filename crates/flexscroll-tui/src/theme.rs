use ratatui::style::Color;

/// Colors used by the demo
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey2: Color,

    /// Cell fill, alternating between items
    pub cell: Color,
    pub cell_alt: Color,
    /// Status bar accents
    pub loading: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            cell: Color::Rgb(0xa9, 0xb6, 0x65),
            cell_alt: Color::Rgb(0x89, 0xb4, 0x82),
            loading: Color::Rgb(0xe7, 0x8a, 0x4e),
            accent: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }
}
