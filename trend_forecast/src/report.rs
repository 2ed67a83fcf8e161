//! Report assembly: top-N selection, momentum tallies and the text summary
//!
//! No numbers are computed here beyond counting; the assembler only selects
//! and formats what the feature pipelines produced.

use crate::feature::{FeatureKey, FeatureSelector};
use crate::momentum::latest_momentum_by_feature;
use crate::pipeline::{FeatureAnalysis, FeatureOutcome};
use crate::predictor::Prediction;
use crate::transitions::SeasonTransition;
use crate::trend_stats::{TrendDirection, TrendStat};
use serde::Serialize;
use std::fmt;

/// Count of feature values by the sign of their latest defined momentum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MomentumTally {
    pub rising: usize,
    pub falling: usize,
    pub flat: usize,
}

/// Count of feature values by trend direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectionTally {
    pub increasing: usize,
    pub decreasing: usize,
    pub stable: usize,
}

/// Why source rows did not contribute to a feature type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Exclusions {
    /// Rows read from the source table
    pub total_rows: usize,
    /// Rows dropped at load time because the season was unknown
    pub unknown_season: usize,
    /// Rows without a value for this feature type
    pub missing_value: usize,
    /// Rows excluded because the feature pipeline was skipped
    pub pipeline_skipped: usize,
}

impl Exclusions {
    /// Rows that contributed to the frequency table
    pub fn used(&self) -> usize {
        self.total_rows
            .saturating_sub(self.unknown_season)
            .saturating_sub(self.missing_value)
            .saturating_sub(self.pipeline_skipped)
    }
}

/// Outcome of one feature type's pipeline as shown in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SectionStatus {
    Completed,
    NoObservations,
    Aborted(String),
}

/// Report section for one feature type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSection {
    pub selector: FeatureSelector,
    pub status: SectionStatus,
    pub exclusions: Exclusions,
    /// Latest observed season of this feature type
    pub latest_season: Option<String>,
    pub top_predictions: Vec<Prediction>,
    pub top_trends: Vec<TrendStat>,
    pub momentum_tally: MomentumTally,
    pub direction_tally: DirectionTally,
    /// Most recent season-to-season transition
    pub latest_transition: Option<SeasonTransition>,
}

/// Aggregate report over all feature types, in fixed section order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub seasons: Vec<String>,
    pub total_rows: usize,
    pub unknown_season_rows: usize,
    pub sections: Vec<FeatureSection>,
}

/// Selects the report content from the pipeline outcomes
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    top_n: usize,
}

impl ReportAssembler {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Build the report; sections follow [`FeatureSelector::ALL`] order
    /// whatever order the outcomes arrive in.
    pub fn assemble(
        &self,
        seasons: &[String],
        total_rows: usize,
        unknown_season_rows: usize,
        outcomes: &[FeatureOutcome],
    ) -> TrendReport {
        let sections = FeatureSelector::ALL
            .iter()
            .filter_map(|selector| {
                outcomes
                    .iter()
                    .find(|outcome| outcome.selector() == *selector)
                    .map(|outcome| self.section(outcome, total_rows, unknown_season_rows))
            })
            .collect();

        TrendReport {
            seasons: seasons.to_vec(),
            total_rows,
            unknown_season_rows,
            sections,
        }
    }

    fn section(
        &self,
        outcome: &FeatureOutcome,
        total_rows: usize,
        unknown_season_rows: usize,
    ) -> FeatureSection {
        match outcome {
            FeatureOutcome::Completed(analysis) => {
                self.completed_section(analysis, total_rows, unknown_season_rows)
            }
            FeatureOutcome::Aborted { selector, reason } => FeatureSection {
                selector: *selector,
                status: SectionStatus::Aborted(reason.clone()),
                exclusions: Exclusions {
                    total_rows,
                    unknown_season: unknown_season_rows,
                    missing_value: 0,
                    pipeline_skipped: total_rows.saturating_sub(unknown_season_rows),
                },
                latest_season: None,
                top_predictions: Vec::new(),
                top_trends: Vec::new(),
                momentum_tally: MomentumTally::default(),
                direction_tally: DirectionTally::default(),
                latest_transition: None,
            },
        }
    }

    fn completed_section(
        &self,
        analysis: &FeatureAnalysis,
        total_rows: usize,
        unknown_season_rows: usize,
    ) -> FeatureSection {
        let status = if analysis.frequencies.is_empty() {
            SectionStatus::NoObservations
        } else {
            SectionStatus::Completed
        };

        FeatureSection {
            selector: analysis.selector,
            status,
            exclusions: Exclusions {
                total_rows,
                unknown_season: unknown_season_rows,
                missing_value: analysis.rows_without_value,
                pipeline_skipped: 0,
            },
            latest_season: analysis.latest_season().map(str::to_string),
            top_predictions: top_predictions(&analysis.predictions, self.top_n),
            top_trends: top_trends(&analysis.trend_stats, self.top_n),
            momentum_tally: momentum_tally(analysis),
            direction_tally: direction_tally(&analysis.trend_stats),
            latest_transition: analysis.transitions.last().cloned(),
        }
    }
}

/// Highest `n` predictions by predicted share
pub fn top_predictions(predictions: &[Prediction], n: usize) -> Vec<Prediction> {
    let mut sorted = predictions.to_vec();
    sorted.sort_by(|a, b| {
        b.predicted_percentage
            .total_cmp(&a.predicted_percentage)
            .then_with(|| a.feature.cmp(&b.feature))
    });
    sorted.truncate(n);
    sorted
}

/// Highest `n` trend statistics by average share
pub fn top_trends(stats: &[TrendStat], n: usize) -> Vec<TrendStat> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| {
        b.avg_percentage
            .total_cmp(&a.avg_percentage)
            .then_with(|| a.feature.cmp(&b.feature))
    });
    sorted.truncate(n);
    sorted
}

/// Tally feature values by the sign of their latest defined momentum
pub fn momentum_tally(analysis: &FeatureAnalysis) -> MomentumTally {
    latest_momentum_by_feature(&analysis.momentum)
        .values()
        .fold(MomentumTally::default(), |mut tally, &momentum| {
            if momentum > 0.0 {
                tally.rising += 1;
            } else if momentum < 0.0 {
                tally.falling += 1;
            } else {
                tally.flat += 1;
            }
            tally
        })
}

fn direction_tally(stats: &[TrendStat]) -> DirectionTally {
    stats
        .iter()
        .fold(DirectionTally::default(), |mut tally, stat| {
            match stat.trend_direction {
                TrendDirection::Increasing => tally.increasing += 1,
                TrendDirection::Decreasing => tally.decreasing += 1,
                TrendDirection::Stable => tally.stable += 1,
            }
            tally
        })
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn join_features<'a, I: Iterator<Item = &'a FeatureKey>>(features: I) -> String {
    let names: Vec<String> = features.map(|f| f.to_string()).collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

impl fmt::Display for FeatureSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.selector)?;
        let ex = &self.exclusions;
        writeln!(
            f,
            "Rows: {} total, {} unknown season, {} without a {} value, {} skipped, {} used",
            ex.total_rows,
            ex.unknown_season,
            ex.missing_value,
            self.selector.name(),
            ex.pipeline_skipped,
            ex.used()
        )?;

        match &self.status {
            SectionStatus::Aborted(reason) => {
                return writeln!(f, "Skipped: {}", reason);
            }
            SectionStatus::NoObservations => {
                return writeln!(f, "No observations with a {} value", self.selector.name());
            }
            SectionStatus::Completed => {}
        }

        let latest = self.latest_season.as_deref().unwrap_or("latest season");
        writeln!(f, "Top predictions (season after {}):", latest)?;
        for (i, prediction) in self.top_predictions.iter().enumerate() {
            writeln!(
                f,
                "  {}. {:<28} {:>8.2}%  ({})",
                i + 1,
                prediction.feature.to_string(),
                prediction.predicted_percentage,
                prediction.confidence
            )?;
        }

        writeln!(f, "Top trends by average share:")?;
        for (i, stat) in self.top_trends.iter().enumerate() {
            writeln!(
                f,
                "  {}. {:<28} avg {:>6.2}%  {:<10}  volatility {}",
                i + 1,
                stat.feature.to_string(),
                stat.avg_percentage,
                stat.trend_direction,
                format_optional(stat.volatility)
            )?;
        }

        let m = &self.momentum_tally;
        writeln!(
            f,
            "Momentum (latest): {} rising, {} falling, {} flat",
            m.rising, m.falling, m.flat
        )?;
        let d = &self.direction_tally;
        writeln!(
            f,
            "Trend direction: {} increasing, {} decreasing, {} stable",
            d.increasing, d.decreasing, d.stable
        )?;

        if let Some(transition) = &self.latest_transition {
            writeln!(
                f,
                "{} -> {}: emerging {}; declining {}",
                transition.from_season,
                transition.to_season,
                join_features(transition.emerging()),
                join_features(transition.declining())
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for TrendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fashion Trend Summary")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Seasons: {}", self.seasons.join(" -> "))?;
        writeln!(
            f,
            "Source rows: {} ({} dropped: unknown season)",
            self.total_rows, self.unknown_season_rows
        )?;

        for section in &self.sections {
            writeln!(f)?;
            write!(f, "{}", section)?;
        }

        Ok(())
    }
}
