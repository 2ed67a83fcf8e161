//! Labeled observation table and its loader

use crate::error::{Result, TrendError};
use crate::season::SeasonRegistry;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns produced by the upstream labeling step
pub const SOURCE_COLUMNS: [&str; 8] = [
    "image_path",
    "style",
    "category",
    "super_category",
    "pattern",
    "color_1",
    "color_2",
    "color_1_percentage",
];

/// Default share of rows allowed to carry an unresolvable season
pub const DEFAULT_MAX_UNKNOWN_SEASON_FRACTION: f64 = 0.2;

/// One labeled garment detection
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Stable reference to the source image
    pub image_id: String,
    /// Canonical season label from the registry
    pub season: String,
    pub style: Option<String>,
    pub category: Option<String>,
    pub super_category: Option<String>,
    pub pattern: Option<String>,
    /// Primary color
    pub color_1: Option<String>,
    /// Secondary color
    pub color_2: Option<String>,
    /// Area share of the primary color, 0..=100
    pub color_1_percentage: Option<f64>,
}

/// Trimmed value, or `None` when empty
fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Observation {
    /// Create an observation with no feature values
    pub fn new(image_id: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            season: season.into(),
            style: None,
            category: None,
            super_category: None,
            pattern: None,
            color_1: None,
            color_2: None,
            color_1_percentage: None,
        }
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = normalize(style);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = normalize(category);
        self
    }

    pub fn with_super_category(mut self, super_category: &str) -> Self {
        self.super_category = normalize(super_category);
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = normalize(pattern);
        self
    }

    pub fn with_color_1(mut self, color: &str) -> Self {
        self.color_1 = normalize(color);
        self
    }

    pub fn with_color_2(mut self, color: &str) -> Self {
        self.color_2 = normalize(color);
        self
    }

    pub fn with_color_1_percentage(mut self, percentage: f64) -> Self {
        self.color_1_percentage = Some(percentage);
        self
    }
}

/// Observations resolved against the season registry, plus load accounting
#[derive(Debug, Clone)]
pub struct ObservationTable {
    observations: Vec<Observation>,
    /// Column names present in the source table
    columns: BTreeSet<String>,
    /// Rows read from the source, including dropped ones
    total_rows: usize,
    /// Rows dropped because their season could not be resolved
    unknown_season_rows: usize,
}

impl ObservationTable {
    /// Table built in memory; every source column counts as present
    pub fn new(observations: Vec<Observation>) -> Self {
        let total_rows = observations.len();
        Self {
            observations,
            columns: SOURCE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            total_rows,
            unknown_season_rows: 0,
        }
    }

    /// Restrict the set of source columns considered present
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Record rows that were dropped before reaching the table
    pub fn with_unknown_season_rows(mut self, dropped: usize) -> Self {
        self.unknown_season_rows = dropped;
        self.total_rows = self.observations.len() + dropped;
        self
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    pub fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn unknown_season_rows(&self) -> usize {
        self.unknown_season_rows
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Loader for labeled observation tables
#[derive(Debug)]
pub struct DataLoader<'a> {
    registry: &'a SeasonRegistry,
    max_unknown_season_fraction: f64,
}

impl<'a> DataLoader<'a> {
    /// Create a loader resolving seasons against `registry`
    pub fn new(registry: &'a SeasonRegistry) -> Self {
        Self {
            registry,
            max_unknown_season_fraction: DEFAULT_MAX_UNKNOWN_SEASON_FRACTION,
        }
    }

    /// Set the share of rows allowed to carry an unknown season before loading fails
    pub fn with_max_unknown_season_fraction(mut self, fraction: f64) -> Self {
        self.max_unknown_season_fraction = fraction;
        self
    }

    /// Load observations from a CSV file
    pub fn from_csv<P: AsRef<Path>>(&self, path: P) -> Result<ObservationTable> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "Loaded labeled observations");
        self.from_dataframe(&df)
    }

    /// Load observations from an existing DataFrame
    pub fn from_dataframe(&self, df: &DataFrame) -> Result<ObservationTable> {
        let columns: BTreeSet<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let total_rows = df.height();

        let seasons = Self::text_column(df, &columns, "season")?;
        let identifiers = match Self::text_column(df, &columns, "image_path")? {
            Some(values) => Some(values),
            None => Self::text_column(df, &columns, "image_id")?,
        };
        if seasons.is_none() && identifiers.is_none() {
            return Err(TrendError::MissingColumn(
                "image_path (or image_id / season)".to_string(),
            ));
        }

        let style = Self::text_column(df, &columns, "style")?;
        let category = Self::text_column(df, &columns, "category")?;
        let super_category = Self::text_column(df, &columns, "super_category")?;
        let pattern = Self::text_column(df, &columns, "pattern")?;
        let color_1 = Self::text_column(df, &columns, "color_1")?;
        let color_2 = Self::text_column(df, &columns, "color_2")?;
        let color_1_percentage = Self::float_column(df, &columns, "color_1_percentage")?;

        let cell = |column: &Option<Vec<Option<String>>>, row: usize| -> Option<String> {
            column.as_ref().and_then(|values| values[row].clone())
        };

        let mut observations = Vec::with_capacity(total_rows);
        let mut unknown_season_rows = 0;

        for row in 0..total_rows {
            let identifier = identifiers.as_ref().and_then(|ids| ids[row].as_deref());
            let resolved = seasons
                .as_ref()
                .and_then(|values| values[row].as_deref())
                .map(|label| self.registry.canonicalize(label))
                .or_else(|| identifier.map(|id| self.registry.resolve_identifier(id)));

            let season = match resolved {
                Some(Ok(season)) => season.to_string(),
                Some(Err(err)) => {
                    debug!(row, error = %err, "Dropping row with unresolvable season");
                    unknown_season_rows += 1;
                    continue;
                }
                None => {
                    debug!(row, "Dropping row without season or identifier");
                    unknown_season_rows += 1;
                    continue;
                }
            };

            observations.push(Observation {
                image_id: identifier
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("row-{}", row)),
                season,
                style: cell(&style, row),
                category: cell(&category, row),
                super_category: cell(&super_category, row),
                pattern: cell(&pattern, row),
                color_1: cell(&color_1, row),
                color_2: cell(&color_2, row),
                color_1_percentage: color_1_percentage.as_ref().and_then(|values| values[row]),
            });
        }

        if unknown_season_rows > 0 {
            warn!(
                dropped = unknown_season_rows,
                total = total_rows,
                "Rows dropped because their season is not in the registry"
            );
            let fraction = unknown_season_rows as f64 / total_rows as f64;
            if fraction > self.max_unknown_season_fraction {
                return Err(TrendError::UnknownSeasonThreshold {
                    dropped: unknown_season_rows,
                    total: total_rows,
                    max_fraction: self.max_unknown_season_fraction,
                });
            }
        }

        Ok(ObservationTable {
            observations,
            columns,
            total_rows,
            unknown_season_rows,
        })
    }

    /// Helper method to get a column as trimmed, non-empty strings
    fn text_column(
        df: &DataFrame,
        columns: &BTreeSet<String>,
        name: &str,
    ) -> Result<Option<Vec<Option<String>>>> {
        if !columns.contains(name) {
            return Ok(None);
        }

        let series = df.column(name)?.cast(&DataType::Utf8)?;
        let values = series
            .utf8()?
            .into_iter()
            .map(|value| value.and_then(normalize))
            .collect();

        Ok(Some(values))
    }

    /// Helper method to get a column as f64 values
    fn float_column(
        df: &DataFrame,
        columns: &BTreeSet<String>,
        name: &str,
    ) -> Result<Option<Vec<Option<f64>>>> {
        if !columns.contains(name) {
            return Ok(None);
        }

        let series = df.column(name)?.cast(&DataType::Float64)?;
        let values = series
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect();

        Ok(Some(values))
    }
}
