//! Config loading and default paths.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::MonitorError;

/// Load configuration from the given path, or the default location.
///
/// A missing default file yields defaults; a missing explicit path is an
/// error.
pub fn load_config(path: Option<&str>) -> Result<Config, MonitorError> {
    match path {
        Some(p) => load_config_from(Path::new(p), true),
        None => load_config_from(&default_config_path(), false),
    }
}

fn load_config_from(config_path: &Path, explicit: bool) -> Result<Config, MonitorError> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| MonitorError::Config(format!("failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MonitorError::Config(format!("failed to parse config: {e}")))?;
        info!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else if explicit {
        Err(MonitorError::Config(format!(
            "config file not found: {}",
            config_path.display()
        )))
    } else {
        info!("no config file found, using defaults");
        Ok(Config::default())
    }
}

/// Get the default config directory path.
///
/// Falls back to the current directory when the platform reports no config
/// directory.
pub fn config_dir() -> PathBuf {
    config_dir_in(dirs::config_dir())
}

fn config_dir_in(base: Option<PathBuf>) -> PathBuf {
    base.or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
        .join("tieba-link")
}

/// Get the default config file path.
fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}
