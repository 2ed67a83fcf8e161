//! Result tables and the text summary written for the dashboard

use crate::error::Result;
use crate::feature::{FeatureKey, FeatureSelector};
use crate::pipeline::{FeatureAnalysis, PipelineOutput};
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File holding the text report
pub const SUMMARY_FILE: &str = "trend_summary.txt";
/// File holding the report as JSON
pub const REPORT_JSON_FILE: &str = "trend_report.json";

/// Writes pipeline results into an output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

fn format_value(value: f64) -> String {
    format!("{}", value)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

fn header(selector: FeatureSelector, leading: &[&str], trailing: &[&str]) -> Vec<String> {
    let mut columns: Vec<String> = leading.iter().map(|c| c.to_string()).collect();
    columns.extend(selector.value_columns().iter().map(|c| c.to_string()));
    columns.extend(trailing.iter().map(|c| c.to_string()));
    columns
}

fn feature_cells(feature: &FeatureKey) -> impl Iterator<Item = String> + '_ {
    feature.fields().into_iter().map(str::to_string)
}

impl OutputWriter {
    /// Create the writer, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write every table, the text summary and the JSON report.
    /// Returns the written paths in write order.
    pub fn write(&self, output: &PipelineOutput) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for analysis in output.outcomes.iter().filter_map(|o| o.analysis()) {
            written.push(self.write_frequencies(analysis)?);
            written.push(self.write_momentum(analysis)?);
            written.push(self.write_predictions(analysis)?);
            written.push(self.write_trend_stats(analysis)?);
            written.push(self.write_transitions(analysis)?);
        }

        let summary_path = self.dir.join(SUMMARY_FILE);
        fs::write(&summary_path, output.report.to_string())?;
        written.push(summary_path);

        let json_path = self.dir.join(REPORT_JSON_FILE);
        fs::write(&json_path, serde_json::to_string_pretty(&output.report)?)?;
        written.push(json_path);

        info!(dir = %self.dir.display(), files = written.len(), "Wrote trend outputs");
        Ok(written)
    }

    fn table_path(&self, selector: FeatureSelector, kind: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", selector.name(), kind))
    }

    fn write_rows(path: &Path, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(&header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// `season, season_order, <value columns>, frequency, percentage[, avg_percentage]`
    pub fn write_frequencies(&self, analysis: &FeatureAnalysis) -> Result<PathBuf> {
        let selector = analysis.selector;
        let path = self.table_path(selector, "frequencies");
        let trailing: &[&str] = if selector.tracks_color_area() {
            &["frequency", "percentage", "avg_percentage"]
        } else {
            &["frequency", "percentage"]
        };

        let rows = analysis
            .frequencies
            .iter()
            .map(|record| {
                let mut row = vec![record.season.clone(), record.season_rank.to_string()];
                row.extend(feature_cells(&record.feature));
                row.push(record.frequency.to_string());
                row.push(format_value(record.percentage));
                if selector.tracks_color_area() {
                    row.push(format_optional(record.avg_color_area_percentage));
                }
                row
            })
            .collect();

        Self::write_rows(&path, header(selector, &["season", "season_order"], trailing), rows)?;
        Ok(path)
    }

    /// `season, season_order, <value columns>, percentage, prev_percentage, momentum, avg_momentum`
    pub fn write_momentum(&self, analysis: &FeatureAnalysis) -> Result<PathBuf> {
        let selector = analysis.selector;
        let path = self.table_path(selector, "momentum");

        let rows = analysis
            .momentum
            .iter()
            .map(|record| {
                let freq = &record.frequency;
                let mut row = vec![freq.season.clone(), freq.season_rank.to_string()];
                row.extend(feature_cells(&freq.feature));
                row.push(format_value(freq.percentage));
                row.push(format_optional(record.prev_percentage));
                row.push(format_optional(record.momentum));
                row.push(format_optional(record.avg_momentum));
                row
            })
            .collect();

        Self::write_rows(
            &path,
            header(
                selector,
                &["season", "season_order"],
                &["percentage", "prev_percentage", "momentum", "avg_momentum"],
            ),
            rows,
        )?;
        Ok(path)
    }

    /// `<value columns>, predicted, confidence`
    pub fn write_predictions(&self, analysis: &FeatureAnalysis) -> Result<PathBuf> {
        let selector = analysis.selector;
        let path = self.table_path(selector, "predictions");

        let rows = analysis
            .predictions
            .iter()
            .map(|prediction| {
                let mut row: Vec<String> = feature_cells(&prediction.feature).collect();
                row.push(format_value(prediction.predicted_percentage));
                row.push(prediction.confidence.to_string());
                row
            })
            .collect();

        Self::write_rows(&path, header(selector, &[], &["predicted", "confidence"]), rows)?;
        Ok(path)
    }

    /// `<value columns>, avg_percentage, trend_direction, volatility`
    pub fn write_trend_stats(&self, analysis: &FeatureAnalysis) -> Result<PathBuf> {
        let selector = analysis.selector;
        let path = self.table_path(selector, "trend_stats");

        let rows = analysis
            .trend_stats
            .iter()
            .map(|stat| {
                let mut row: Vec<String> = feature_cells(&stat.feature).collect();
                row.push(format_value(stat.avg_percentage));
                row.push(stat.trend_direction.to_string());
                row.push(format_optional(stat.volatility));
                row
            })
            .collect();

        Self::write_rows(
            &path,
            header(
                selector,
                &[],
                &["avg_percentage", "trend_direction", "volatility"],
            ),
            rows,
        )?;
        Ok(path)
    }

    /// `from_season, to_season, <value columns>, from_percentage, to_percentage, change, movement`
    pub fn write_transitions(&self, analysis: &FeatureAnalysis) -> Result<PathBuf> {
        let selector = analysis.selector;
        let path = self.table_path(selector, "transitions");

        let rows = analysis
            .transitions
            .iter()
            .flat_map(|transition| {
                transition.changes.iter().map(move |change| {
                    let mut row = vec![
                        transition.from_season.clone(),
                        transition.to_season.clone(),
                    ];
                    row.extend(feature_cells(&change.feature));
                    row.push(format_value(change.from_percentage));
                    row.push(format_value(change.to_percentage));
                    row.push(format_value(change.change));
                    row.push(change.movement.to_string());
                    row
                })
            })
            .collect();

        Self::write_rows(
            &path,
            header(
                selector,
                &["from_season", "to_season"],
                &["from_percentage", "to_percentage", "change", "movement"],
            ),
            rows,
        )?;
        Ok(path)
    }
}
