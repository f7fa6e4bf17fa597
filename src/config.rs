//! Configuration management for the AQI Horizon dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AqiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AqiConfig {
    /// Simulated data source settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Location directory settings
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulated latency and randomness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Delay before search results are returned, in milliseconds
    #[serde(default = "default_search_latency")]
    pub search_latency_ms: u64,
    /// Delay before generated data is returned, in milliseconds
    #[serde(default = "default_generation_latency")]
    pub generation_latency_ms: u64,
    /// Fixed RNG seed for reproducible output
    pub seed: Option<u64>,
}

/// Location directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// JSON file replacing the built-in directory
    pub path: Option<PathBuf>,
    /// Number of quick picks shown when there are no search results
    #[serde(default = "default_popular_count")]
    pub popular_count: usize,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Hours covered by the pollutant bar chart
    #[serde(default = "default_pollutant_chart_hours")]
    pub pollutant_chart_hours: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_search_latency() -> u64 {
    800
}

fn default_generation_latency() -> u64 {
    1500
}

fn default_popular_count() -> usize {
    6
}

fn default_pollutant_chart_hours() -> usize {
    12
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            search_latency_ms: default_search_latency(),
            generation_latency_ms: default_generation_latency(),
            seed: None,
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            popular_count: default_popular_count(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pollutant_chart_hours: default_pollutant_chart_hours(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    #[must_use]
    pub fn generation_latency(&self) -> Duration {
        Duration::from_millis(self.generation_latency_ms)
    }
}

impl AqiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        } else if explicit {
            return Err(AqiError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        // Environment overrides, e.g. AQIHORIZON_SIMULATION__SEED=7
        builder = builder.add_source(
            Environment::with_prefix("AQIHORIZON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AqiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aqihorizon").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.directory.popular_count == 0 {
            self.directory.popular_count = default_popular_count();
        }
        if self.display.pollutant_chart_hours == 0 {
            self.display.pollutant_chart_hours = default_pollutant_chart_hours();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.simulation.search_latency_ms > 10_000 {
            return Err(AqiError::config("Search latency cannot exceed 10000 ms").into());
        }

        if self.simulation.generation_latency_ms > 30_000 {
            return Err(AqiError::config("Generation latency cannot exceed 30000 ms").into());
        }

        if self.display.pollutant_chart_hours > 24 {
            return Err(AqiError::config("Pollutant chart cannot cover more than 24 hours").into());
        }

        if self.directory.popular_count > 50 {
            return Err(AqiError::config("Popular locations cannot exceed 50").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AqiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AqiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AqiConfig::default();
        assert_eq!(config.simulation.search_latency_ms, 800);
        assert_eq!(config.simulation.generation_latency_ms, 1500);
        assert!(config.simulation.seed.is_none());
        assert_eq!(config.directory.popular_count, 6);
        assert_eq!(config.display.pollutant_chart_hours, 12);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_latency_durations() {
        let config = AqiConfig::default();
        assert_eq!(config.simulation.search_latency(), Duration::from_millis(800));
        assert_eq!(config.simulation.generation_latency(), Duration::from_millis(1500));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AqiConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AqiConfig::default();
        config.display.pollutant_chart_hours = 30;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("24 hours"));
    }

    #[test]
    fn test_apply_defaults() {
        let mut config = AqiConfig::default();
        config.directory.popular_count = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.directory.popular_count, 6);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[simulation]
search_latency_ms = 0
generation_latency_ms = 0
seed = 7

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = AqiConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.simulation.search_latency_ms, 0);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.directory.popular_count, 6);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AqiConfig::load_from_path(Some(dir.path().join("absent.toml")));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AqiConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("aqihorizon"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
