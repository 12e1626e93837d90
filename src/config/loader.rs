//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the lounge
//! configuration from YAML files.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::DeviceType;

use super::types::{DeviceLimits, LoungeConfig, LoungeMetadata};

/// Loads and provides access to the lounge configuration.
///
/// # Directory Structure
///
/// ```text
/// config/lounge/
/// ├── lounge.yaml   # Name, currency, UTC offset, booking scheduler settings
/// └── devices.yaml  # Machine count per device type
/// ```
///
/// # Example
///
/// ```no_run
/// use lounge_engine::config::ConfigLoader;
/// use lounge_engine::models::DeviceType;
///
/// let loader = ConfigLoader::load("./config/lounge").unwrap();
/// println!("{} has {} consoles", loader.lounge().name, loader.device_limit(DeviceType::Ps));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LoungeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if a file is missing and `ConfigParseError`
    /// if a file is not valid YAML for its type.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<LoungeMetadata>(&path.join("lounge.yaml"))?;
        let devices = Self::load_yaml::<DeviceLimits>(&path.join("devices.yaml"))?;

        Ok(Self {
            config: LoungeConfig::new(metadata, devices),
        })
    }

    /// Builds a loader from already-parsed parts.
    pub fn from_config(config: LoungeConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying lounge configuration.
    pub fn config(&self) -> &LoungeConfig {
        &self.config
    }

    /// Returns the lounge metadata.
    pub fn lounge(&self) -> &LoungeMetadata {
        self.config.lounge()
    }

    /// Returns the machine inventory.
    pub fn devices(&self) -> &DeviceLimits {
        self.config.devices()
    }

    /// Returns the number of machines of `device`.
    pub fn device_limit(&self, device: DeviceType) -> u32 {
        self.config.devices().limit(device)
    }

    /// Converts an instant to local wall-clock time.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        self.config.local_time(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config/lounge"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.lounge().name, "Thunder Gaming Lounge");
        assert_eq!(loader.lounge().currency, "INR");
        assert_eq!(loader.lounge().utc_offset_minutes, 330);
    }

    #[test]
    fn test_device_limits_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.device_limit(DeviceType::Ps), 5);
        assert_eq!(loader.device_limit(DeviceType::Pc), 10);
        assert_eq!(loader.device_limit(DeviceType::Vr), 3);
        assert_eq!(loader.device_limit(DeviceType::Wheel), 2);
        assert_eq!(loader.device_limit(DeviceType::Metabat), 4);
    }

    #[test]
    fn test_booking_settings_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.lounge().default_session_hours, 1.0);
        assert_eq!(loader.lounge().booking_conversion_window_seconds, 60);
        assert_eq!(loader.lounge().booking_scan_interval_seconds, 30);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("lounge.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!("lounge-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("lounge.yaml"), "name: [unterminated").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("lounge.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
