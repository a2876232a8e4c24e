//! EventRisk configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::budget::RemovalPriority;
use crate::domain::VendorCategory;
use crate::geo::GeoPoint;

/// Main EventRisk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub log_level: Option<String>,

    /// Risk rule thresholds
    pub thresholds: Thresholds,

    /// Budget optimizer settings
    pub budget: BudgetConfig,

    /// Weather source settings
    pub weather: WeatherConfig,

    /// Reference point for venue distances
    pub reference_point: GeoPoint,

    /// Currency code rendered in descriptions
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            thresholds: Thresholds::default(),
            budget: BudgetConfig::default(),
            weather: WeatherConfig::default(),
            reference_point: GeoPoint::default(),
            currency: crate::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        RemovalPriority::new(self.budget.removal_priority.clone())?;
        if !(0.0..=1.0).contains(&self.thresholds.utilization_warn) {
            return Err(eyre::eyre!(
                "thresholds.utilization-warn must be between 0 and 1, got {}",
                self.thresholds.utilization_warn
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config: .eventrisk.yml
        let local_config = PathBuf::from(".eventrisk.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/eventrisk/eventrisk.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("eventrisk").join("eventrisk.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Follows the same chain as [`Config::load`]: the first file that parses wins.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::candidate_paths(config_path)
            .into_iter()
            .find_map(|path| {
                let content = fs::read_to_string(path).ok()?;
                serde_yaml::from_str::<Self>(&content).ok()
            })?
            .log_level
    }

    /// Config files to try, in priority order
    fn candidate_paths(config_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = config_path {
            return vec![path.clone()];
        }
        let mut paths = vec![PathBuf::from(".eventrisk.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("eventrisk").join("eventrisk.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Numeric thresholds used by the risk rules
///
/// Defaults are product decisions and are reproduced exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Thresholds {
    /// Utilization ratio above which budget risk is medium
    pub utilization_warn: f64,

    /// Remaining tasks above which task risk is high
    pub task_backlog_high: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            utilization_warn: crate::DEFAULT_UTILIZATION_WARN,
            task_backlog_high: crate::DEFAULT_TASK_BACKLOG_HIGH,
        }
    }
}

/// Budget optimizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BudgetConfig {
    /// Order in which categories are shed when over budget (venue is never allowed)
    pub removal_priority: Vec<VendorCategory>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            removal_priority: RemovalPriority::default().categories().to_vec(),
        }
    }
}

/// Weather source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WeatherConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,

    /// API base URL
    pub base_url: String,

    /// Location query passed to the API
    pub location: String,

    /// Upper bound on a weather fetch in milliseconds
    pub timeout_ms: u64,

    /// Dates further ahead than this use the fallback signal
    pub forecast_days: i64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key_env: "WEATHER_API_KEY".to_string(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            location: "Copenhagen,dk".to_string(),
            timeout_ms: 5_000,
            forecast_days: 5,
        }
    }
}

impl WeatherConfig {
    /// Resolve the API key from the environment, if set
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}
