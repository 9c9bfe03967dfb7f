//! Theme and sidebar toggles.

mod palette;

pub use palette::Palette;
use sage_core::prefs::Theme;

use crate::effects::UiEffect;

/// Window chrome: visual theme and sidebar visibility.
#[derive(Debug, Default)]
pub struct ChromeState {
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl ChromeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            sidebar_open: false,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }
}

/// Flips the theme and asks the runtime to persist it.
pub fn toggle_theme(chrome: &mut ChromeState) -> Vec<UiEffect> {
    chrome.theme = chrome.theme.toggled();
    vec![UiEffect::PersistTheme {
        theme: chrome.theme,
    }]
}

/// Flips sidebar visibility. Not persisted.
pub fn toggle_sidebar(chrome: &mut ChromeState) {
    chrome.sidebar_open = !chrome.sidebar_open;
}
