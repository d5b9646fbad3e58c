use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::playback::ticker::MAX_TICK_INTERVAL;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading or saving playback settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tick interval must be between 1 and {max} ms, got {got}")]
    InvalidTickInterval { got: u64, max: u64 },
}

/// Persistent playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Interval between playback ticks in milliseconds
    pub tick_interval_ms: u64,

    /// How long the last frame of a recording keeps covering playback time,
    /// in milliseconds (None = until playback is stopped by the last frame)
    pub trailing_coverage_ms: Option<i64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            trailing_coverage_ms: None,
        }
    }
}

impl PlaybackConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("view-replay").join("playback.json"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = MAX_TICK_INTERVAL.as_millis() as u64;
        if self.tick_interval_ms == 0 || self.tick_interval_ms > max {
            return Err(ConfigError::InvalidTickInterval {
                got: self.tick_interval_ms,
                max,
            });
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from the user config directory, falling back to defaults
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.trailing_coverage_ms, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("playback.json");

        let config = PlaybackConfig {
            tick_interval_ms: 20,
            trailing_coverage_ms: Some(500),
        };
        config.save_to(&path).unwrap();

        assert_eq!(PlaybackConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playback.json");
        fs::write(&path, r#"{ "trailing_coverage_ms": 100 }"#).unwrap();

        let config = PlaybackConfig::load_from(&path).unwrap();
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.trailing_coverage_ms, Some(100));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playback.json");
        fs::write(&path, r#"{ "tick_interval_ms": 0 }"#).unwrap();

        assert!(matches!(
            PlaybackConfig::load_from(&path),
            Err(ConfigError::InvalidTickInterval { got: 0, .. })
        ));
    }

    #[test]
    fn test_huge_interval_rejected() {
        let config = PlaybackConfig {
            tick_interval_ms: u64::MAX,
            trailing_coverage_ms: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickInterval { got: u64::MAX, max: 3_600_000 })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playback.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(PlaybackConfig::load_from(&path), Err(ConfigError::Json(_))));
    }
}
