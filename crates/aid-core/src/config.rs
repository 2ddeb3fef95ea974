// Rust guideline compliant 2026-10-16

//! Configuration management for the mutual aid services.

use crate::proximity::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_RADIUS_KM};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Configuration for search, logging and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Radius used by proximity searches that do not name one.
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Largest radius a proximity search may request.
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,

    /// Candidate count at which proximity scoring runs in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Log level (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

fn default_max_radius_km() -> f64 {
    500.0
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Default for Config {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_radius_km: default_max_radius_km(),
            parallel_threshold: default_parallel_threshold(),
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<dir>/config.toml`
    /// 3. Environment variables with `AID_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `AID_DEFAULT_RADIUS_KM` - Default search radius
    /// - `AID_MAX_RADIUS_KM` - Largest accepted search radius
    /// - `AID_PARALLEL_THRESHOLD` - Parallel scoring threshold
    /// - `AID_LOG_LEVEL` - Log level
    /// - `AID_OUTPUT_FORMAT` - Output format (json/table/plain)
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("AID_DEFAULT_RADIUS_KM") {
            self.default_radius_km = val.parse().map_err(|_| {
                Error::Config("AID_DEFAULT_RADIUS_KM must be a number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("AID_MAX_RADIUS_KM") {
            self.max_radius_km = val
                .parse()
                .map_err(|_| Error::Config("AID_MAX_RADIUS_KM must be a number".to_string()))?;
        }

        if let Ok(val) = std::env::var("AID_PARALLEL_THRESHOLD") {
            self.parallel_threshold = val.parse().map_err(|_| {
                Error::Config("AID_PARALLEL_THRESHOLD must be a positive integer".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("AID_LOG_LEVEL") {
            self.log_level = val.to_lowercase();
        }

        if let Ok(val) = std::env::var("AID_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::Config(
                        "AID_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a radius is not a positive finite number
    /// - default_radius_km exceeds max_radius_km
    /// - parallel_threshold is zero
    /// - log_level is not a known level
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("default_radius_km", self.default_radius_km),
            ("max_radius_km", self.max_radius_km),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if self.default_radius_km > self.max_radius_km {
            return Err(Error::Config(format!(
                "default_radius_km ({}) exceeds max_radius_km ({})",
                self.default_radius_km, self.max_radius_km
            )));
        }

        if self.parallel_threshold == 0 {
            return Err(Error::Config(
                "parallel_threshold must be greater than 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Saves the configuration to `<dir>/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let config_path = dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        std::env::remove_var("AID_DEFAULT_RADIUS_KM");
        std::env::remove_var("AID_MAX_RADIUS_KM");
        std::env::remove_var("AID_PARALLEL_THRESHOLD");
        std::env::remove_var("AID_LOG_LEVEL");
        std::env::remove_var("AID_OUTPUT_FORMAT");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_radius_km, 10.0);
        assert_eq!(config.max_radius_km, 500.0);
        assert_eq!(config.parallel_threshold, 1_000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_missing_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
default_radius_km = 5.0
max_radius_km = 50.0
parallel_threshold = 200
log_level = "debug"
output_format = "json"
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_radius_km, 5.0);
        assert_eq!(config.max_radius_km, 50.0);
        assert_eq!(config.parallel_threshold, 200);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_config_validation_default_above_max() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "default_radius_km = 20.0\nmax_radius_km = 15.0",
        )
        .unwrap();
        assert!(matches!(
            Config::load(temp_dir.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_validation_zero_threshold() {
        let config = Config {
            parallel_threshold: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_unknown_log_level() {
        let config = Config {
            log_level: "verbose".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_invalid_toml() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "default_radius_km = [").unwrap();
        let err = Config::load(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_config_env_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "default_radius_km = 3.0").unwrap();

        std::env::set_var("AID_DEFAULT_RADIUS_KM", "7.5");
        std::env::set_var("AID_OUTPUT_FORMAT", "plain");
        std::env::set_var("AID_LOG_LEVEL", "WARN");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_radius_km, 7.5);
        assert_eq!(config.output_format, OutputFormat::Plain);
        assert_eq!(config.log_level, "warn");

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_values() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("AID_PARALLEL_THRESHOLD", "many");
        assert!(Config::load(temp_dir.path()).is_err());
        clear_all_env_vars();

        std::env::set_var("AID_OUTPUT_FORMAT", "yaml");
        assert!(Config::load(temp_dir.path()).is_err());
        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let original = Config {
            default_radius_km: 2.5,
            max_radius_km: 25.0,
            parallel_threshold: 64,
            log_level: "debug".to_string(),
            output_format: OutputFormat::Json,
        };

        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(original, loaded);
    }
}
