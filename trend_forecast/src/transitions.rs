//! Share changes between consecutive seasons
//!
//! For each pair of adjacent registry seasons, lists the feature values whose
//! share moved by more than a significance threshold and flags the values
//! that are emerging or declining.

use crate::aggregation::SeasonalFrequency;
use crate::feature::FeatureKey;
use crate::season::SeasonRegistry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Thresholds on share changes, in percentage points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionThresholds {
    /// Changes with an absolute value at or below this are not listed
    pub significance: f64,
    /// Changes above this are emerging, below its negation declining
    pub emerging: f64,
}

impl Default for TransitionThresholds {
    fn default() -> Self {
        Self {
            significance: 1.0,
            emerging: 5.0,
        }
    }
}

/// Classification of a listed share change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Movement {
    Emerging,
    Declining,
    Shifting,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Emerging => write!(f, "Emerging"),
            Movement::Declining => write!(f, "Declining"),
            Movement::Shifting => write!(f, "Shifting"),
        }
    }
}

/// Change of one feature value's share between two seasons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareChange {
    pub feature: FeatureKey,
    pub from_percentage: f64,
    pub to_percentage: f64,
    /// `to_percentage - from_percentage`
    pub change: f64,
    pub movement: Movement,
}

/// Significant share changes between two adjacent seasons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTransition {
    pub from_season: String,
    pub to_season: String,
    pub changes: Vec<ShareChange>,
}

impl SeasonTransition {
    pub fn emerging(&self) -> impl Iterator<Item = &FeatureKey> + '_ {
        self.with_movement(Movement::Emerging)
    }

    pub fn declining(&self) -> impl Iterator<Item = &FeatureKey> + '_ {
        self.with_movement(Movement::Declining)
    }

    fn with_movement(&self, movement: Movement) -> impl Iterator<Item = &FeatureKey> + '_ {
        self.changes
            .iter()
            .filter(move |c| c.movement == movement)
            .map(|c| &c.feature)
    }
}

/// Compute transitions for every pair of adjacent registry seasons that
/// both have records for this feature type. A value missing from one side
/// of the pair counts as a 0% share there.
pub fn season_transitions(
    frequencies: &[SeasonalFrequency],
    registry: &SeasonRegistry,
    thresholds: TransitionThresholds,
) -> Vec<SeasonTransition> {
    let mut shares: BTreeMap<usize, BTreeMap<&FeatureKey, f64>> = BTreeMap::new();
    for record in frequencies {
        shares
            .entry(record.season_rank)
            .or_default()
            .insert(&record.feature, record.percentage);
    }

    let mut transitions = Vec::new();
    for (idx, (from_season, to_season)) in registry.consecutive_pairs().enumerate() {
        let (from_rank, to_rank) = (idx + 1, idx + 2);
        let (from, to) = match (shares.get(&from_rank), shares.get(&to_rank)) {
            (Some(from), Some(to)) => (from, to),
            _ => continue,
        };

        let features: BTreeSet<&FeatureKey> = from.keys().chain(to.keys()).copied().collect();
        let mut changes: Vec<ShareChange> = features
            .into_iter()
            .filter_map(|feature| {
                let from_percentage = from.get(feature).copied().unwrap_or(0.0);
                let to_percentage = to.get(feature).copied().unwrap_or(0.0);
                let change = to_percentage - from_percentage;
                if change.abs() <= thresholds.significance {
                    return None;
                }

                let movement = if change > thresholds.emerging {
                    Movement::Emerging
                } else if change < -thresholds.emerging {
                    Movement::Declining
                } else {
                    Movement::Shifting
                };

                Some(ShareChange {
                    feature: feature.clone(),
                    from_percentage,
                    to_percentage,
                    change,
                    movement,
                })
            })
            .collect();

        changes.sort_by(|a, b| {
            b.change
                .total_cmp(&a.change)
                .then_with(|| a.feature.cmp(&b.feature))
        });

        transitions.push(SeasonTransition {
            from_season: from_season.to_string(),
            to_season: to_season.to_string(),
            changes,
        });
    }

    transitions
}
