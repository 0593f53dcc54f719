//! Configuration management for shiptrack.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::sync::OnceLock;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::timeline::Schedule;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "shiptrack";

/// Default shipment data file name.
const DATA_FILE_NAME: &str = "shipments.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SHIPTRACK_`, sections separated by `__`)
/// 2. TOML config file at `~/.config/shiptrack/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Timeline schedule for new shipments.
    pub schedule: ScheduleConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the shipment data file.
    /// Defaults to `~/.local/share/shiptrack/shipments.json`
    pub data_path: Option<PathBuf>,
}

/// Timeline schedule configuration.
///
/// The defaults give origin at 10:00, transit two hours later, and arrival two
/// days later at 15:00, all labelled `IST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Hour of day the origin leg is stamped with.
    pub origin_hour: u32,
    /// Minute of the origin hour.
    pub origin_minute: u32,
    /// Hours between origin and transit.
    pub transit_offset_hours: u32,
    /// Calendar days between origin and destination.
    pub destination_offset_days: u32,
    /// Hour of day the destination leg is stamped with.
    pub destination_hour: u32,
    /// Zone label written after every timestamp.
    pub zone_label: String,
    /// Offset of the labelled zone from UTC, in minutes.
    pub utc_offset_minutes: i32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            origin_hour: 10,
            origin_minute: 0,
            transit_offset_hours: 2,
            destination_offset_days: 2,
            destination_hour: 15,
            zone_label: "IST".to_string(),
            utc_offset_minutes: 330,
        }
    }
}

fn zone_label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+\-]{0,15}$").expect("Invalid zone label pattern")
    })
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `SHIPTRACK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("SHIPTRACK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !zone_label_pattern().is_match(&self.schedule.zone_label) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "zone_label {:?} must be a single word of letters, digits, '+' or '-'",
                    self.schedule.zone_label
                ),
            });
        }

        if let Some(path) = &self.storage.data_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "data_path must not be empty".to_string(),
                });
            }
        }

        Schedule::from_config(&self.schedule).map(|_| ())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Build the timeline schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule section is invalid.
    pub fn schedule(&self) -> Result<Schedule> {
        Schedule::from_config(&self.schedule)
    }
}
