//! Configuration management for Kotei.
//!
//! Handles loading, saving, and validating configuration from the working
//! directory or the platform-specific config directory.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name used for config directory.
const APP_NAME: &str = "Kotei";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Placeholder value for unconfigured API keys.
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Upper bound for `retry_count` in either section.
const MAX_RETRY_COUNT: u32 = 10;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compute and report everything, but never change Sonarr.
    pub dry_run: bool,

    /// Sonarr connection settings.
    pub sonarr: SonarrConfig,

    /// Filler list scraping settings.
    pub fillerlist: FillerListConfig,

    /// Recurring schedule.
    pub schedule: ScheduleConfig,

    /// Series to keep in sync, processed in this order.
    pub animes: Vec<AnimeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            sonarr: SonarrConfig::default(),
            fillerlist: FillerListConfig::default(),
            schedule: ScheduleConfig::default(),
            animes: Vec::new(),
        }
    }
}

/// Sonarr API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SonarrConfig {
    /// Base URL of the Sonarr instance.
    pub base_url: String,

    /// API key (required).
    pub api_key: String,

    /// API path appended to the base URL.
    pub api_path: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Extra attempts after a failed request.
    pub retry_count: u32,

    /// Pause between attempts in seconds.
    pub retry_wait_seconds: u64,
}

impl Default for SonarrConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8989".to_string(),
            api_key: API_KEY_PLACEHOLDER.to_string(),
            api_path: "/api/v3".to_string(),
            timeout_seconds: 15,
            retry_count: 3,
            retry_wait_seconds: 5,
        }
    }
}

impl SonarrConfig {
    /// Checks if the API key is configured (not placeholder).
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != API_KEY_PLACEHOLDER
    }
}

/// Filler list site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FillerListConfig {
    /// Site root; show pages live under `/shows/<slug>/`.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Extra attempts after a failed request.
    pub retry_count: u32,

    /// Pause between attempts in seconds.
    pub retry_wait_seconds: u64,

    /// Delay before each page fetch in seconds.
    pub delay_between_requests_sec: f64,
}

impl Default for FillerListConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.animefillerlist.com".to_string(),
            timeout_seconds: 15,
            retry_count: 1,
            retry_wait_seconds: 2,
            delay_between_requests_sec: 1.0,
        }
    }
}

/// Schedule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Cron expression (5 or 6 fields). Empty means run once and exit.
    pub cron_spec: String,
}

impl ScheduleConfig {
    /// Returns the trimmed cron expression, if one is set.
    pub fn cron(&self) -> Option<&str> {
        let spec = self.cron_spec.trim();
        (!spec.is_empty()).then_some(spec)
    }
}

/// One series to reconcile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimeConfig {
    /// Title (or slug) of the show on the filler list site.
    pub title: String,

    /// Exact series title in Sonarr.
    pub sonarr_title: String,

    /// Canon categories to include (manga, mixed, anime). Empty means all.
    pub include_canon_types: Vec<String>,

    /// Lowest absolute episode number to act on.
    pub cutoff_episode: u32,

    /// Queue a Sonarr search for newly monitored episodes.
    pub search_enabled: bool,
}

impl AnimeConfig {
    fn example() -> Self {
        Self {
            title: "one-piece".to_string(),
            sonarr_title: "One Piece".to_string(),
            include_canon_types: vec!["manga".to_string(), "mixed".to_string()],
            cutoff_episode: 0,
            search_enabled: false,
        }
    }

    /// Name used in reports for this entry.
    pub fn display_name(&self) -> &str {
        if self.sonarr_title.trim().is_empty() {
            self.title.trim()
        } else {
            self.sonarr_title.trim()
        }
    }

    /// Checks the fields a series pass cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingValue(format!(
                "title (series '{}')",
                self.display_name()
            )));
        }
        if self.sonarr_title.trim().is_empty() {
            return Err(ConfigError::MissingValue(format!(
                "sonarr_title (series '{}')",
                self.display_name()
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Default configuration plus one example series, written when no
    /// config file exists yet.
    pub fn template() -> Self {
        Self {
            animes: vec![AnimeConfig::example()],
            ..Self::default()
        }
    }

    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the config file to use when none is given explicitly.
    ///
    /// A `config.toml` in the working directory wins over the one in the
    /// platform config directory.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let local = PathBuf::from(CONFIG_FILENAME);
        if local.exists() {
            return Ok(local);
        }
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from a specific path.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::template();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Individual series entries are checked later, one at a time, so a bad
    /// entry only fails its own series.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sonarr.base_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("sonarr.base_url".to_string()));
        }

        if !self.sonarr.is_configured() {
            return Err(ConfigError::MissingValue(
                "sonarr.api_key (set your Sonarr API key in config file)".to_string(),
            ));
        }

        if self.animes.is_empty() {
            return Err(ConfigError::MissingValue(
                "animes (no entries found in 'animes' list)".to_string(),
            ));
        }

        for (key, value) in [
            ("sonarr.timeout_seconds", self.sonarr.timeout_seconds),
            ("fillerlist.timeout_seconds", self.fillerlist.timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        for (key, value) in [
            ("sonarr.retry_count", self.sonarr.retry_count),
            ("fillerlist.retry_count", self.fillerlist.retry_count),
        ] {
            if value > MAX_RETRY_COUNT {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be at most {}", MAX_RETRY_COUNT),
                });
            }
        }

        let delay = self.fillerlist.delay_between_requests_sec;
        if !delay.is_finite() || delay < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "fillerlist.delay_between_requests_sec".to_string(),
                message: "must be a finite, non-negative number of seconds".to_string(),
            });
        }

        Ok(())
    }
}
