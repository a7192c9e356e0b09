//! Configuration persistence utilities
//!
//! Loads and saves per-clock TOML configuration under the platform config
//! directory.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error while reading/writing config
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the base configuration directory
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "zone-slider", "zone-slider")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a specific clock
pub fn config_path(clock_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", clock_name)))
}

/// Load configuration for a specific clock
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(clock_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(clock_name).ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Load configuration from an explicit path
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save configuration for a specific clock
pub fn save_config<T: Serialize>(clock_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(clock_name).ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

/// Save configuration to an explicit path, creating parent directories
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone_list::{default_zones, TimeZoneEntry};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        dark_mode: bool,
        zones: Vec<TimeZoneEntry>,
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("zone-slider-test-{}", std::process::id()))
            .join(format!("{}.toml", name))
    }

    #[test]
    fn test_config_path() {
        if let Some(path) = config_path("test_clock") {
            assert!(path.to_string_lossy().contains("test_clock.toml"));
        }
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = scratch_path("missing");
        let loaded: Option<TestConfig> = load_config_from(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let config = TestConfig {
            dark_mode: true,
            zones: default_zones(),
        };

        save_config_to(&path, &config).unwrap();
        let loaded: Option<TestConfig> = load_config_from(&path).unwrap();
        assert_eq!(loaded, Some(config));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_parse_error() {
        let path = scratch_path("broken");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "dark_mode = [").unwrap();

        let result: Result<Option<TestConfig>, ConfigError> = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_file(&path);
    }
}
