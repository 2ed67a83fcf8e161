//! Descriptive statistics over a series of shares
//!
//! Contains:
//! - Arithmetic mean
//! - Sample standard deviation (n - 1 denominator)
//! - Coefficient of variation

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot calculate the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().mean())
}

/// Sample standard deviation of the values
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Not enough data to calculate standard deviation. Need 2 values, have {}.",
            values.len()
        )));
    }

    Ok(values.iter().std_dev())
}

/// Coefficient of variation of the values, in percent
/// (`sample_std_dev / mean * 100`).
pub fn coefficient_of_variation(values: &[f64]) -> Result<f64> {
    let std_dev = sample_std_dev(values)?;
    let mean = mean(values)?;

    if mean == 0.0 {
        return Err(MathError::CalculationError(
            "Coefficient of variation is undefined for a zero mean".to_string(),
        ));
    }

    Ok(std_dev / mean * 100.0)
}
