//! Durable client-side preferences.
//!
//! A flat TOML file at ${SAGE_HOME}/state.toml. The only key today is the
//! theme preference, stored under `sage-theme` as `"light"` or `"dark"`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{paths, write_atomic};

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "sage-theme";

/// Visual mode of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the literal stored for this theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored literal. Unknown values yield None.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Returns the other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Loads the stored theme from the default state file.
///
/// Falls back to `Theme::Light` when nothing (or garbage) is stored.
pub fn load_theme() -> Theme {
    load_theme_from(&paths::state_path())
}

/// Loads the stored theme from a specific state file.
pub fn load_theme_from(path: &Path) -> Theme {
    let Ok(contents) = fs::read_to_string(path) else {
        return Theme::default();
    };
    let doc: toml_edit::DocumentMut = match contents.parse() {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable state file");
            return Theme::default();
        }
    };
    doc.get(THEME_KEY)
        .and_then(|item| item.as_str())
        .and_then(Theme::parse)
        .unwrap_or_default()
}

/// Persists the theme to the default state file.
///
/// # Errors
/// Returns an error if the state file cannot be parsed or written.
pub fn save_theme(theme: Theme) -> Result<()> {
    save_theme_to(&paths::state_path(), theme)
}

/// Persists the theme to a specific state file, keeping other keys intact.
///
/// # Errors
/// Returns an error if the state file cannot be parsed or written.
pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
    use toml_edit::{DocumentMut, value};

    let mut doc: DocumentMut = if path.exists() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .parse()
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        DocumentMut::new()
    };

    doc[THEME_KEY] = value(theme.as_str());
    write_atomic(path, &doc.to_string())
}
