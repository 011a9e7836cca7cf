//! Configuration management for the Happy Kitty Score app
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: HK__)

use anyhow::Result;
use happy_kitty_shared::report::DEFAULT_MAX_RECORDS;
use happy_kitty_shared::WeightUnit;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub units: UnitsConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where records are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    /// Keep everything in memory; nothing survives the process
    pub in_memory: bool,
}

impl StorageConfig {
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsConfig {
    /// Unit used until the first weight is logged
    pub default_weight_unit: WeightUnit,
}

/// Report and chart sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub max_records: usize,
    pub chart_days: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Force JSON output outside production
    pub json: bool,
    /// Overrides the default filter when `RUST_LOG` is unset
    pub filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from(".happy-kitty"),
                file_name: "records.json".to_string(),
                in_memory: false,
            },
            units: UnitsConfig {
                default_weight_unit: WeightUnit::Kg,
            },
            report: ReportConfig {
                max_records: DEFAULT_MAX_RECORDS,
                chart_days: 14,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with HK__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (HK__ prefix)
            // e.g., HK__STORAGE__DATA_DIR=/tmp/kitty sets storage.data_dir
            .add_source(
                config::Environment::with_prefix("HK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// The defaults rendered as a TOML config file
    pub fn default_toml() -> Result<String> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.path(), PathBuf::from(".happy-kitty/records.json"));
        assert!(!config.storage.in_memory);
        assert_eq!(config.units.default_weight_unit, WeightUnit::Kg);
        assert_eq!(config.report.max_records, 30);
        assert_eq!(config.report.chart_days, 14);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_default_toml_parses_back() {
        let rendered = AppConfig::default_toml().unwrap();
        assert!(rendered.contains("[storage]"));
        assert!(rendered.contains("default_weight_unit = \"kg\""));

        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.report.max_records, 30);
        assert_eq!(parsed.storage.file_name, "records.json");
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
