//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Work and break durations
//! - Floating (mirror) window geometry
//!
//! Configuration is stored at `~/.config/pomopip/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::timer::Durations;

/// Countdown duration configuration, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_duration_secs")]
    pub work_duration_secs: u64,
    #[serde(default = "default_break_duration_secs")]
    pub break_duration_secs: u64,
}

/// Floating mirror window geometry (logical pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingConfig {
    #[serde(default = "default_floating_width")]
    pub width: f64,
    #[serde(default = "default_floating_height")]
    pub height: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomopip/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub floating: FloatingConfig,
}

// Default functions
fn default_work_duration_secs() -> u64 {
    50 * 60
}
fn default_break_duration_secs() -> u64 {
    10 * 60
}
fn default_floating_width() -> f64 {
    320.0
}
fn default_floating_height() -> f64 {
    100.0
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration_secs: default_work_duration_secs(),
            break_duration_secs: default_break_duration_secs(),
        }
    }
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            width: default_floating_width(),
            height: default_floating_height(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            floating: FloatingConfig::default(),
        }
    }
}

/// Returns `~/.config/pomopip[-dev]/` based on POMOPIP_ENV.
///
/// Set POMOPIP_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOPIP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomopip-dev")
    } else {
        base_dir.join("pomopip")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults back when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Countdown ceilings derived from the timer section.
    pub fn durations(&self) -> Durations {
        Durations::new(self.timer.work_duration_secs, self.timer.break_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerPhase;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.timer.work_duration_secs, 3000);
        assert_eq!(cfg.timer.break_duration_secs, 600);
        assert_eq!(cfg.floating.width, 320.0);
        assert_eq!(cfg.floating.height, 100.0);
        assert_eq!(cfg.durations().for_phase(TimerPhase::Break), 600);
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config {
            timer: TimerConfig {
                work_duration_secs: 1500,
                break_duration_secs: 300,
            },
            floating: FloatingConfig {
                width: 400.0,
                height: 120.0,
            },
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork_duration_secs = 1200\n").unwrap();
        assert_eq!(parsed.timer.work_duration_secs, 1200);
        assert_eq!(parsed.timer.break_duration_secs, 600);
        assert_eq!(parsed.floating.width, 320.0);
    }

    #[test]
    fn load_missing_file_writes_defaults_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        // A second load reads the file just written.
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_rejects_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
