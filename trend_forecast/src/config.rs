//! Run configuration, loaded from TOML and overridable from the command line

use crate::data::DEFAULT_MAX_UNKNOWN_SEASON_FRACTION;
use crate::error::{Result, TrendError};
use crate::season::SeasonRegistry;
use crate::transitions::TransitionThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seasons covered by the default analysis window, oldest first
pub const DEFAULT_SEASONS: [&str; 3] = ["Fall24", "Spring25", "Fall25"];

/// Number of entries listed per feature type in the report
pub const DEFAULT_TOP_N: usize = 5;

/// Engine configuration
///
/// ```toml
/// seasons = ["Fall24", "Spring25", "Fall25"]
/// top_n = 5
/// max_unknown_season_fraction = 0.2
///
/// [transitions]
/// significance = 1.0
/// emerging = 5.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Season labels in chronological order
    pub seasons: Vec<String>,
    /// Entries listed per feature type in the report
    pub top_n: usize,
    /// Share of rows allowed to carry an unknown season before the run fails
    pub max_unknown_season_fraction: f64,
    /// Thresholds for season-to-season share changes
    pub transitions: TransitionThresholds,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            seasons: DEFAULT_SEASONS.iter().map(|s| s.to_string()).collect(),
            top_n: DEFAULT_TOP_N,
            max_unknown_season_fraction: DEFAULT_MAX_UNKNOWN_SEASON_FRACTION,
            transitions: TransitionThresholds::default(),
        }
    }
}

impl TrendConfig {
    /// Load a configuration file; keys left out keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrendConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.seasons.is_empty() {
            return Err(TrendError::InvalidConfig(
                "At least one season is required".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(TrendError::InvalidConfig(
                "top_n must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.max_unknown_season_fraction) {
            return Err(TrendError::InvalidConfig(format!(
                "max_unknown_season_fraction must be between 0 and 1, got {}",
                self.max_unknown_season_fraction
            )));
        }
        let TransitionThresholds {
            significance,
            emerging,
        } = self.transitions;
        if !(significance >= 0.0 && emerging >= 0.0) {
            return Err(TrendError::InvalidConfig(
                "Transition thresholds must be non-negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the season registry described by this configuration
    pub fn registry(&self) -> Result<SeasonRegistry> {
        SeasonRegistry::new(&self.seasons)
    }
}
