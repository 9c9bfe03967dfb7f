//! Tracing setup.
//!
//! The TUI owns stdout/stderr while it runs, so events are written to a
//! log file through a non-blocking appender. Keep the returned guard alive
//! for the lifetime of the process or buffered events are lost.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Env var holding an EnvFilter directive that overrides `logging.level`.
pub const LOG_ENV: &str = "SAGE_LOG";

/// Installs the global subscriber writing to the configured log file.
///
/// # Errors
/// Returns an error if the log directory cannot be created or the filter
/// directive is invalid.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let path = config.effective_file();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| std::path::PathBuf::from("."), std::path::Path::to_path_buf);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "sage.log".into(), std::ffi::OsStr::to_os_string);

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = build_filter(config)?;

    // A second init (tests, repeated CLI setup) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(guard)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid logging.level directive '{}'", config.level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggingConfig {
            level: "sage_core=loud".to_string(),
            file: None,
        };
        if std::env::var(LOG_ENV).is_err() {
            assert!(build_filter(&config).is_err());
        }
    }

    #[test]
    fn test_valid_level_builds() {
        let config = LoggingConfig {
            level: "sage_core=debug,warn".to_string(),
            file: None,
        };
        assert!(build_filter(&config).is_ok());
    }
}
