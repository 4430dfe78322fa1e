//! Runtime configuration I/O operations.
//!
//! Locates the user config file and loads it, falling back to defaults when
//! no file exists.

use crate::config::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir
pub const APP_DIR: &str = "fsmap";

/// Directory holding the user config (`~/.config/fsmap` on Linux)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Default path of the user config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the user config file is read
/// when present, otherwise the defaults are used. The result is validated.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match explicit {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Config::load_from_file(path).map_err(|e| with_path(e, path))?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading user config from {}", path.display());
                Config::load_from_file(&path).map_err(|e| with_path(e, &path))?
            }
            _ => {
                tracing::debug!("No user config found, using defaults");
                Config::default()
            }
        },
    };

    config.validate()?;
    Ok(config)
}

fn with_path(error: ConfigError, path: &Path) -> ConfigError {
    match error {
        ConfigError::IoError(msg) => ConfigError::IoError(format!("{}: {}", path.display(), msg)),
        ConfigError::ParseError(msg) => {
            ConfigError::ParseError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    }
}
