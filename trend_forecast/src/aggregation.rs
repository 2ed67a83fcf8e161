//! Per-season frequency tables
//!
//! One generic aggregation parameterized by a [`FeatureSelector`]; the six
//! feature types all go through [`aggregate`].

use crate::data::Observation;
use crate::error::{Result, TrendError};
use crate::feature::{FeatureKey, FeatureSelector};
use crate::season::SeasonRegistry;
use serde::Serialize;
use std::collections::BTreeMap;
use trend_math::{mean, share};

/// Count and share of one feature value in one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalFrequency {
    /// Canonical season label
    pub season: String,
    /// 1-based chronological rank of the season
    pub season_rank: usize,
    /// Feature value (or color pair)
    pub feature: FeatureKey,
    /// Observations carrying this value in the season
    pub frequency: usize,
    /// Share of the season's observations for this feature type, in percent
    pub percentage: f64,
    /// Mean primary-color area, color feature only
    pub avg_color_area_percentage: Option<f64>,
}

#[derive(Debug, Default)]
struct GroupTally {
    count: usize,
    color_areas: Vec<f64>,
}

/// Group observations by (season, feature value) and compute counts and
/// within-season shares.
///
/// Observations where the selected feature is not applicable are skipped
/// for this feature type only. An observation whose season is missing from
/// the registry fails the whole aggregation.
pub fn aggregate(
    observations: &[Observation],
    selector: FeatureSelector,
    registry: &SeasonRegistry,
) -> Result<Vec<SeasonalFrequency>> {
    let mut groups: BTreeMap<(usize, FeatureKey), GroupTally> = BTreeMap::new();
    let mut season_totals: BTreeMap<usize, usize> = BTreeMap::new();

    for observation in observations {
        let rank = registry.rank(&observation.season)?;
        let feature = match selector.extract(observation) {
            Some(feature) => feature,
            None => continue,
        };

        let tally = groups.entry((rank, feature)).or_default();
        tally.count += 1;
        if selector.tracks_color_area() {
            if let Some(area) = observation.color_1_percentage {
                tally.color_areas.push(area);
            }
        }
        *season_totals.entry(rank).or_insert(0) += 1;
    }

    let mut records = Vec::with_capacity(groups.len());
    for ((rank, feature), mut tally) in groups {
        let season = registry
            .label(rank)
            .ok_or_else(|| TrendError::UnknownSeason(format!("rank {}", rank)))?;
        let percentage = share(tally.count, season_totals[&rank])?;
        let avg_color_area_percentage = if selector.tracks_color_area() {
            // Summation order must not follow row order
            tally.color_areas.sort_by(f64::total_cmp);
            mean(&tally.color_areas).ok()
        } else {
            None
        };

        records.push(SeasonalFrequency {
            season: season.to_string(),
            season_rank: rank,
            feature,
            frequency: tally.count,
            percentage,
            avg_color_area_percentage,
        });
    }

    records.sort_by(|a, b| {
        a.season_rank
            .cmp(&b.season_rank)
            .then_with(|| b.frequency.cmp(&a.frequency))
            .then_with(|| a.feature.cmp(&b.feature))
    });

    Ok(records)
}

/// Number of observations skipped by `selector` because the value is absent
pub fn count_excluded(observations: &[Observation], selector: FeatureSelector) -> usize {
    observations
        .iter()
        .filter(|observation| selector.extract(observation).is_none())
        .count()
}

/// Rank of the latest season present in a frequency table
pub fn latest_rank(records: &[SeasonalFrequency]) -> Option<usize> {
    records.iter().map(|r| r.season_rank).max()
}
