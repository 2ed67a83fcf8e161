//! Period-over-period momentum of feature shares

use crate::aggregation::SeasonalFrequency;
use crate::feature::FeatureKey;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use trend_math::{mean, percent_change};

/// A seasonal frequency extended with its momentum signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumRecord {
    #[serde(flatten)]
    pub frequency: SeasonalFrequency,
    /// Share in the previous season where this value was observed
    pub prev_percentage: Option<f64>,
    /// Relative change from `prev_percentage`, in percent
    pub momentum: Option<f64>,
    /// Mean of all defined momentum values of this feature value
    pub avg_momentum: Option<f64>,
}

impl MomentumRecord {
    pub fn feature(&self) -> &FeatureKey {
        &self.frequency.feature
    }

    pub fn season_rank(&self) -> usize {
        self.frequency.season_rank
    }
}

/// Compute momentum for every record of one feature type.
///
/// Records are grouped by feature value and ordered by season rank, so the
/// input order never matters. Momentum is `None` for the first season of a
/// value and wherever the previous share is zero; a missing signal is never
/// reported as a 0% change.
pub fn compute_momentum(frequencies: &[SeasonalFrequency]) -> Vec<MomentumRecord> {
    let mut groups: BTreeMap<&FeatureKey, Vec<&SeasonalFrequency>> = BTreeMap::new();
    for record in frequencies {
        groups.entry(&record.feature).or_default().push(record);
    }

    let groups: Vec<Vec<&SeasonalFrequency>> = groups.into_values().collect();

    groups
        .into_par_iter()
        .flat_map_iter(|mut group| {
            group.sort_by_key(|record| record.season_rank);
            momentum_for_group(&group)
        })
        .collect()
}

fn momentum_for_group(group: &[&SeasonalFrequency]) -> Vec<MomentumRecord> {
    let mut prev_percentage: Option<f64> = None;
    let mut partial = Vec::with_capacity(group.len());

    for record in group {
        let momentum = prev_percentage.and_then(|prev| percent_change(prev, record.percentage).ok());
        partial.push((*record, prev_percentage, momentum));
        prev_percentage = Some(record.percentage);
    }

    let defined: Vec<f64> = partial.iter().filter_map(|(_, _, m)| *m).collect();
    let avg_momentum = mean(&defined).ok();

    partial
        .into_iter()
        .map(|(record, prev_percentage, momentum)| MomentumRecord {
            frequency: record.clone(),
            prev_percentage,
            momentum,
            avg_momentum,
        })
        .collect()
}

/// Average momentum per feature value, one entry per value
pub fn average_momentum_by_feature(records: &[MomentumRecord]) -> BTreeMap<&FeatureKey, Option<f64>> {
    records
        .iter()
        .map(|record| (record.feature(), record.avg_momentum))
        .collect()
}

/// Latest defined momentum per feature value, by season rank.
/// Values that never had a defined momentum are absent.
pub fn latest_momentum_by_feature(records: &[MomentumRecord]) -> BTreeMap<&FeatureKey, f64> {
    let mut latest: BTreeMap<&FeatureKey, (usize, f64)> = BTreeMap::new();
    for record in records {
        if let Some(momentum) = record.momentum {
            let entry = latest
                .entry(record.feature())
                .or_insert((record.season_rank(), momentum));
            if record.season_rank() >= entry.0 {
                *entry = (record.season_rank(), momentum);
            }
        }
    }

    latest
        .into_iter()
        .map(|(feature, (_, momentum))| (feature, momentum))
        .collect()
}
