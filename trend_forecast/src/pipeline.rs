//! End-to-end run over the six feature types
//!
//! Each feature type is an independent, side-effect-free computation over the
//! same observation table. They run on the rayon pool and are merged only at
//! the report.

use crate::aggregation::{aggregate, count_excluded, SeasonalFrequency};
use crate::config::TrendConfig;
use crate::data::{DataLoader, ObservationTable};
use crate::error::{Result, TrendError};
use crate::feature::FeatureSelector;
use crate::momentum::{compute_momentum, MomentumRecord};
use crate::predictor::{predict_next, Prediction};
use crate::report::{ReportAssembler, TrendReport};
use crate::season::SeasonRegistry;
use crate::transitions::{season_transitions, SeasonTransition};
use crate::trend_stats::{summarize, TrendStat};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Everything computed for one feature type
#[derive(Debug, Clone, Serialize)]
pub struct FeatureAnalysis {
    pub selector: FeatureSelector,
    /// Observations without a value for this feature type
    pub rows_without_value: usize,
    pub frequencies: Vec<SeasonalFrequency>,
    pub momentum: Vec<MomentumRecord>,
    pub predictions: Vec<Prediction>,
    pub trend_stats: Vec<TrendStat>,
    pub transitions: Vec<SeasonTransition>,
}

impl FeatureAnalysis {
    /// Latest season with at least one record
    pub fn latest_season(&self) -> Option<&str> {
        self.frequencies
            .iter()
            .max_by_key(|record| record.season_rank)
            .map(|record| record.season.as_str())
    }
}

/// Result of one feature type's pipeline
#[derive(Debug, Clone, Serialize)]
pub enum FeatureOutcome {
    Completed(FeatureAnalysis),
    /// The pipeline could not run; other feature types are unaffected
    Aborted {
        selector: FeatureSelector,
        reason: String,
    },
}

impl FeatureOutcome {
    pub fn selector(&self) -> FeatureSelector {
        match self {
            FeatureOutcome::Completed(analysis) => analysis.selector,
            FeatureOutcome::Aborted { selector, .. } => *selector,
        }
    }

    pub fn analysis(&self) -> Option<&FeatureAnalysis> {
        match self {
            FeatureOutcome::Completed(analysis) => Some(analysis),
            FeatureOutcome::Aborted { .. } => None,
        }
    }
}

/// Outcomes of all feature types plus the assembled report
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub outcomes: Vec<FeatureOutcome>,
    pub report: TrendReport,
}

impl PipelineOutput {
    pub fn outcome(&self, selector: FeatureSelector) -> Option<&FeatureOutcome> {
        self.outcomes.iter().find(|o| o.selector() == selector)
    }
}

/// Trend forecasting pipeline bound to a configuration and season registry
#[derive(Debug, Clone)]
pub struct TrendPipeline {
    config: TrendConfig,
    registry: SeasonRegistry,
}

impl TrendPipeline {
    /// Validate the configuration and build the season registry
    pub fn new(config: TrendConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.registry()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    pub fn registry(&self) -> &SeasonRegistry {
        &self.registry
    }

    /// Load the labeled observation table from a CSV file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ObservationTable> {
        DataLoader::new(&self.registry)
            .with_max_unknown_season_fraction(self.config.max_unknown_season_fraction)
            .from_csv(path)
    }

    /// Run every feature type and assemble the report
    pub fn run(&self, table: &ObservationTable) -> PipelineOutput {
        info!(
            observations = table.len(),
            seasons = self.registry.len(),
            latest_season = self.registry.latest().unwrap_or_default(),
            "Running trend pipeline"
        );

        let outcomes: Vec<FeatureOutcome> = FeatureSelector::ALL
            .to_vec()
            .into_par_iter()
            .map(|selector| match self.analyze_feature(table, selector) {
                Ok(analysis) => FeatureOutcome::Completed(analysis),
                Err(err) => {
                    warn!(feature = selector.name(), error = %err, "Feature pipeline skipped");
                    FeatureOutcome::Aborted {
                        selector,
                        reason: err.to_string(),
                    }
                }
            })
            .collect();

        let report = ReportAssembler::new(self.config.top_n).assemble(
            self.registry.labels(),
            table.total_rows(),
            table.unknown_season_rows(),
            &outcomes,
        );

        PipelineOutput { outcomes, report }
    }

    /// Run the pipeline for a single feature type
    pub fn analyze_feature(
        &self,
        table: &ObservationTable,
        selector: FeatureSelector,
    ) -> Result<FeatureAnalysis> {
        if let Some(missing) = selector
            .required_columns()
            .iter()
            .find(|column| !table.has_column(column))
        {
            return Err(TrendError::MissingColumn(missing.to_string()));
        }

        let observations = table.observations();
        let frequencies = aggregate(observations, selector, &self.registry)?;
        let rows_without_value = count_excluded(observations, selector);

        if frequencies.is_empty() {
            warn!(feature = selector.name(), "No observations for feature type");
        } else if rows_without_value > 0 {
            info!(
                feature = selector.name(),
                excluded = rows_without_value,
                "Rows without a value excluded"
            );
        }

        let momentum = compute_momentum(&frequencies);
        let predictions = predict_next(&frequencies, &momentum);
        let trend_stats = summarize(&frequencies);
        let transitions =
            season_transitions(&frequencies, &self.registry, self.config.transitions);

        info!(
            feature = selector.name(),
            values = trend_stats.len(),
            predictions = predictions.len(),
            "Feature analysis complete"
        );

        Ok(FeatureAnalysis {
            selector,
            rows_without_value,
            frequencies,
            momentum,
            predictions,
            trend_stats,
            transitions,
        })
    }
}
