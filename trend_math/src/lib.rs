//! # Trend Math
//!
//! Numeric primitives shared by the trend forecasting engine.
//! This crate provides the share, relative change and dispersion
//! calculations used to turn per-season counts into momentum and
//! volatility figures.
//!
//! Every function reports the cases where a figure is mathematically
//! undefined (empty input, division by zero) as an error instead of
//! returning `NaN` or infinity, so callers can decide how to represent
//! the missing value.

use thiserror::Error;

pub mod change;
pub mod statistics;

pub use change::{percent_change, share};
pub use statistics::{coefficient_of_variation, mean, sample_std_dev};

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;
