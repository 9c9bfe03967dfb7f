use ratatui::style::Color;
use sage_core::prefs::Theme;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub error: Color,
    pub chip: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::Rgb(248, 250, 252),
                fg: Color::Rgb(30, 41, 59),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(13, 148, 136),
                user: Color::Rgb(37, 99, 235),
                assistant: Color::Rgb(13, 148, 136),
                border: Color::Rgb(203, 213, 225),
                selection_bg: Color::Rgb(226, 232, 240),
                error: Color::Rgb(220, 38, 38),
                chip: Color::Rgb(147, 51, 234),
            },
            Theme::Dark => Self {
                bg: Color::Rgb(15, 23, 42),
                fg: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(148, 163, 184),
                accent: Color::Rgb(45, 212, 191),
                user: Color::Rgb(96, 165, 250),
                assistant: Color::Rgb(45, 212, 191),
                border: Color::Rgb(51, 65, 85),
                selection_bg: Color::Rgb(30, 41, 59),
                error: Color::Rgb(248, 113, 113),
                chip: Color::Rgb(192, 132, 252),
            },
        }
    }
}
