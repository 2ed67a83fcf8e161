//! # Runway Trends
//!
//! Umbrella crate for the runway trend forecasting workspace.
//!
//! - [`forecast`]: season registry, loading, aggregation, momentum,
//!   prediction and reporting
//! - [`math`]: share, percent-change and dispersion helpers
//!
//! ## Example
//!
//! ```
//! use runway_trends_workspace::forecast::SeasonRegistry;
//!
//! let registry = SeasonRegistry::new(["Fall24", "Spring25", "Fall25"]).unwrap();
//! assert_eq!(registry.rank("Spring25").unwrap(), 2);
//! assert_eq!(registry.resolve_identifier("look_fall25_003.jpg").unwrap(), "Fall25");
//! ```

pub use trend_forecast as forecast;
pub use trend_math as math;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexported_crates_agree() {
        let registry = forecast::TrendConfig::default().registry().unwrap();
        assert_eq!(registry.len(), 3);

        let change = math::percent_change(10.0, 20.0).unwrap();
        assert!((change - 100.0).abs() < 1e-9);
    }
}
