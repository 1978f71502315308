//! Error types for the Kotei application.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Error type for fetching canon lists from the filler list site.
#[derive(Error, Debug)]
pub enum ScraperError {
    /// HTTP request failed (transport, timeout)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP request failed with status {status} for URL {url}")]
    Status { url: String, status: u16 },

    /// URL building failed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for Sonarr API operations.
#[derive(Error, Debug)]
pub enum SonarrError {
    /// HTTP request failed (transport, timeout)
    #[error("Sonarr request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Sonarr returned an unexpected status
    #[error("Sonarr API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// No series with exactly this title exists in Sonarr
    #[error("series not found in Sonarr: exact title '{title}' ({candidates} results, none matched)")]
    SeriesNotFound { title: String, candidates: usize },

    /// URL building failed
    #[error("Invalid Sonarr URL: {0}")]
    InvalidUrl(String),
}

impl SonarrError {
    /// Returns true for the expected "series absent from Sonarr" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SonarrError::SeriesNotFound { .. })
    }
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Missing required configuration value
    #[error("Missing required config value: {0}")]
    MissingValue(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Error that ends the processing of one series.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The series entry is incomplete
    #[error("Invalid series entry: {0}")]
    Config(#[from] ConfigError),

    /// The canon list could not be fetched
    #[error("Filler list: {0}")]
    Source(#[from] ScraperError),

    /// Sonarr lookup, listing or update failed
    #[error("Sonarr: {0}")]
    Remote(#[from] SonarrError),
}

impl ProcessError {
    /// Returns true when the series simply does not exist in Sonarr.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcessError::Remote(e) if e.is_not_found())
    }
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
