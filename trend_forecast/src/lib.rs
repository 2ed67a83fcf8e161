//! # Trend Forecast
//!
//! Season-over-season trend statistics and one-season-ahead forecasts for
//! labeled runway observations.
//!
//! ## Features
//!
//! - Season ordering by registry rank, never by label string
//! - Per-season frequency and share tables for style, category,
//!   super category, pattern, primary color and color pair
//! - Momentum (period-over-period relative share change) with explicit
//!   undefined values
//! - Next-season share projection with a High/Medium/Low confidence label
//! - Trend direction and volatility per feature value
//! - Season-to-season emerging/declining values
//! - CSV tables, a text summary and a JSON report for the dashboard
//!
//! ## Quick Start
//!
//! ```no_run
//! use trend_forecast::{OutputWriter, TrendConfig, TrendPipeline};
//!
//! let pipeline = TrendPipeline::new(TrendConfig::default())?;
//! let table = pipeline.load("data/processed/fashion_labels.csv")?;
//!
//! let output = pipeline.run(&table);
//! println!("{}", output.report);
//!
//! OutputWriter::new("data/processed")?.write(&output)?;
//! # Ok::<(), trend_forecast::TrendError>(())
//! ```

pub mod aggregation;
pub mod config;
pub mod data;
pub mod error;
pub mod feature;
pub mod logging;
pub mod momentum;
pub mod output;
pub mod pipeline;
pub mod predictor;
pub mod report;
pub mod season;
pub mod transitions;
pub mod trend_stats;

// Re-export commonly used types
pub use crate::aggregation::{aggregate, SeasonalFrequency};
pub use crate::config::TrendConfig;
pub use crate::data::{DataLoader, Observation, ObservationTable};
pub use crate::error::{Result, TrendError};
pub use crate::feature::{FeatureKey, FeatureSelector};
pub use crate::momentum::{compute_momentum, MomentumRecord};
pub use crate::output::OutputWriter;
pub use crate::pipeline::{FeatureAnalysis, FeatureOutcome, PipelineOutput, TrendPipeline};
pub use crate::predictor::{predict_next, Confidence, Prediction};
pub use crate::report::{ReportAssembler, TrendReport};
pub use crate::season::SeasonRegistry;
pub use crate::transitions::{season_transitions, SeasonTransition, TransitionThresholds};
pub use crate::trend_stats::{summarize, TrendDirection, TrendStat};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
