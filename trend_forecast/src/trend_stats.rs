//! Summary trend statistics per feature value

use crate::aggregation::SeasonalFrequency;
use crate::feature::FeatureKey;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use trend_math::{coefficient_of_variation, mean};

/// Net direction of a share between its first and last observed season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Compare the last observed share against the first one.
    /// Intermediate seasons are not considered.
    pub fn from_series(percentages: &[f64]) -> Self {
        match (percentages.first(), percentages.last()) {
            (Some(first), Some(last)) if percentages.len() >= 2 => {
                if last > first {
                    TrendDirection::Increasing
                } else if last < first {
                    TrendDirection::Decreasing
                } else {
                    TrendDirection::Stable
                }
            }
            _ => TrendDirection::Stable,
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "Increasing"),
            TrendDirection::Decreasing => write!(f, "Decreasing"),
            TrendDirection::Stable => write!(f, "Stable"),
        }
    }
}

/// Share statistics of one feature value across all seasons it appears in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendStat {
    pub feature: FeatureKey,
    pub seasons_observed: usize,
    pub avg_percentage: f64,
    pub trend_direction: TrendDirection,
    /// Coefficient of variation of the share, in percent
    pub volatility: Option<f64>,
}

/// Summarize each feature value's share series.
///
/// Volatility is `None` when fewer than two seasons are observed or the mean
/// share is zero.
pub fn summarize(frequencies: &[SeasonalFrequency]) -> Vec<TrendStat> {
    let mut series: BTreeMap<&FeatureKey, Vec<(usize, f64)>> = BTreeMap::new();
    for record in frequencies {
        series
            .entry(&record.feature)
            .or_default()
            .push((record.season_rank, record.percentage));
    }

    let mut stats: Vec<TrendStat> = series
        .into_iter()
        .filter_map(|(feature, mut points)| {
            points.sort_by_key(|(rank, _)| *rank);
            let percentages: Vec<f64> = points.iter().map(|(_, p)| *p).collect();
            let avg_percentage = mean(&percentages).ok()?;

            Some(TrendStat {
                feature: feature.clone(),
                seasons_observed: percentages.len(),
                avg_percentage,
                trend_direction: TrendDirection::from_series(&percentages),
                volatility: coefficient_of_variation(&percentages).ok(),
            })
        })
        .collect();

    stats.sort_by(|a, b| {
        b.avg_percentage
            .total_cmp(&a.avg_percentage)
            .then_with(|| a.feature.cmp(&b.feature))
    });

    stats
}
