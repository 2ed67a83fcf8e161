//! Next-season share projection

use crate::aggregation::{latest_rank, SeasonalFrequency};
use crate::feature::FeatureKey;
use crate::momentum::{average_momentum_by_feature, MomentumRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Coarse confidence label derived from the sign of average momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Positive average momentum is High, negative is Low, and zero or an
    /// undefined signal is Medium.
    pub fn from_avg_momentum(avg_momentum: Option<f64>) -> Self {
        match avg_momentum {
            Some(m) if m > 0.0 => Confidence::High,
            Some(m) if m < 0.0 => Confidence::Low,
            _ => Confidence::Medium,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Projected share of a feature value in the season after the latest one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub feature: FeatureKey,
    /// Share in the latest observed season
    pub latest_percentage: f64,
    pub avg_momentum: Option<f64>,
    pub predicted_percentage: f64,
    pub confidence: Confidence,
}

/// Project next-season shares for every feature value seen in the latest season.
///
/// `predicted = latest * (1 + avg_momentum / 100)`, where an undefined
/// average momentum counts as zero. Projections are neither clamped to
/// 0..=100 nor renormalized across values.
pub fn predict_next(
    frequencies: &[SeasonalFrequency],
    momentum: &[MomentumRecord],
) -> Vec<Prediction> {
    let latest = match latest_rank(frequencies) {
        Some(rank) => rank,
        None => return Vec::new(),
    };
    let avg_by_feature = average_momentum_by_feature(momentum);

    // Keyed by feature value so the join never produces duplicates
    let mut by_feature: BTreeMap<&FeatureKey, Prediction> = BTreeMap::new();
    for record in frequencies.iter().filter(|r| r.season_rank == latest) {
        let avg_momentum = avg_by_feature.get(&record.feature).copied().flatten();
        let predicted_percentage = record.percentage * (1.0 + avg_momentum.unwrap_or(0.0) / 100.0);

        by_feature.entry(&record.feature).or_insert(Prediction {
            feature: record.feature.clone(),
            latest_percentage: record.percentage,
            avg_momentum,
            predicted_percentage,
            confidence: Confidence::from_avg_momentum(avg_momentum),
        });
    }

    let mut predictions: Vec<Prediction> = by_feature.into_values().collect();
    predictions.sort_by(|a, b| {
        b.predicted_percentage
            .total_cmp(&a.predicted_percentage)
            .then_with(|| a.feature.cmp(&b.feature))
    });

    predictions
}
