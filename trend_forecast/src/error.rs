//! Error types for the trend_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;
use trend_math::MathError;

/// Custom error types for the trend_forecast crate
#[derive(Debug, Error)]
pub enum TrendError {
    /// A season label or identifier token is not part of the season registry
    #[error("Unknown season: {0}")]
    UnknownSeason(String),

    /// Too many source rows carried a season that could not be resolved
    #[error("Unknown season in {dropped} of {total} rows exceeds the allowed fraction {max_fraction}")]
    UnknownSeasonThreshold {
        dropped: usize,
        total: usize,
        max_fraction: f64,
    },

    /// A column required by a loader or a feature pipeline is absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Error from invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV writing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from JSON serialization
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, TrendError>;

impl From<PolarsError> for TrendError {
    fn from(err: PolarsError) -> Self {
        TrendError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for TrendError {
    fn from(err: csv::Error) -> Self {
        TrendError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for TrendError {
    fn from(err: serde_json::Error) -> Self {
        TrendError::JsonError(err.to_string())
    }
}

impl From<toml::de::Error> for TrendError {
    fn from(err: toml::de::Error) -> Self {
        TrendError::InvalidConfig(err.to_string())
    }
}
