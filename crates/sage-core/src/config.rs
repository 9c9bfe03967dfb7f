//! Configuration management for Sage.
//!
//! Loads configuration from ${SAGE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Sage configuration and data directories.
    //!
    //! SAGE_HOME resolution order:
    //! 1. SAGE_HOME environment variable (if set)
    //! 2. ~/.config/sage (default)
    //! 3. ./.sage (no home directory available)

    use std::path::PathBuf;

    /// Returns the Sage home directory.
    pub fn sage_home() -> PathBuf {
        if let Ok(home) = std::env::var("SAGE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".sage"),
            |h| h.join(".config").join("sage"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        sage_home().join("config.toml")
    }

    /// Returns the path to the durable client state (theme preference).
    pub fn state_path() -> PathBuf {
        sage_home().join("state.toml")
    }

    /// Returns the default log directory.
    pub fn logs_dir() -> PathBuf {
        sage_home().join("logs")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (EnvFilter syntax). `SAGE_LOG` overrides it.
    pub level: String,
    /// Log file path. Defaults to ${SAGE_HOME}/logs/sage.log.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Config::DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Returns the log file path, falling back to the default location.
    pub fn effective_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| paths::logs_dir().join("sage.log"))
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Sage backend.
    pub base_url: String,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Render assistant replies as server-formatted markup instead of plain text.
    pub trust_assistant_html: bool,

    /// strftime-style format for message timestamps.
    pub time_format: String,

    /// Optional Cookie header value sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// Canned prompts shown under the welcome banner.
    pub suggestions: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:5000";
    /// Default is disabled
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 0;
    const DEFAULT_TIME_FORMAT: &str = "%H:%M";
    const DEFAULT_LOG_LEVEL: &str = "info";
    const DEFAULT_SUGGESTIONS: [&str; 4] = [
        "I have a headache, what should I do?",
        "Give me tips for better sleep",
        "What is a healthy daily diet?",
        "How can I manage stress?",
    ];

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// Environment overrides (`SAGE_BASE_URL`, `SAGE_SESSION_COOKIE`) are
    /// applied after the file is read.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(url) = env_non_empty("SAGE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(cookie) = env_non_empty("SAGE_SESSION_COOKIE") {
            self.session_cookie = Some(cookie);
        }
    }

    /// Returns the request timeout, or None if disabled (0).
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Returns the base URL without a trailing slash.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the session cookie if configured and non-blank.
    pub fn effective_session_cookie(&self) -> Option<&str> {
        self.session_cookie
            .as_deref()
            .map(str::trim)
            .filter(|cookie| !cookie.is_empty())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        write_atomic(path, default_config_template())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            trust_assistant_html: true,
            time_format: Self::DEFAULT_TIME_FORMAT.to_string(),
            session_cookie: None,
            suggestions: Self::DEFAULT_SUGGESTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            logging: LoggingConfig::default(),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Writes content to a file, creating parent directories as needed.
/// Uses atomic write (temp file + rename) to prevent corruption.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
