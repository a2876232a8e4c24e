//! Engine error types
//!
//! The engine itself never fails; these cover the I/O edges around it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading inputs or fetching signals
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid removal priority: {0}")]
    InvalidPriority(String),

    #[error("Weather request failed: {0}")]
    Weather(#[from] reqwest::Error),

    #[error("Invalid weather payload: {0}")]
    WeatherPayload(String),
}

impl EngineError {
    /// Check if the error came from the weather source
    pub fn is_weather(&self) -> bool {
        matches!(self, EngineError::Weather(_) | EngineError::WeatherPayload(_))
    }
}
