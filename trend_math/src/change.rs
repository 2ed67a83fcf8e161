//! Share and relative change calculations
//!
//! - Share of a count within a total, in percent
//! - Period-over-period percent change

use crate::{MathError, Result};

/// Share of `count` within `total`, expressed in percent (0..=100)
pub fn share(count: usize, total: usize) -> Result<f64> {
    if total == 0 {
        return Err(MathError::CalculationError(
            "Cannot compute a share of an empty total".to_string(),
        ));
    }
    if count > total {
        return Err(MathError::InvalidInput(format!(
            "Count {} exceeds total {}",
            count, total
        )));
    }

    Ok(count as f64 / total as f64 * 100.0)
}

/// Relative change from `previous` to `current`, in percent.
///
/// A zero `previous` value has no defined relative change and is
/// reported as a `CalculationError`, never approximated.
pub fn percent_change(previous: f64, current: f64) -> Result<f64> {
    if !previous.is_finite() || !current.is_finite() {
        return Err(MathError::InvalidInput(
            "Percent change requires finite values".to_string(),
        ));
    }
    if previous == 0.0 {
        return Err(MathError::CalculationError(
            "Percent change from zero is undefined".to_string(),
        ));
    }

    Ok((current - previous) / previous * 100.0)
}
