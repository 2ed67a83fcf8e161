use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use trend_forecast::logging::init_logging;
use trend_forecast::{OutputWriter, Result, TrendConfig, TrendPipeline};

/// Compute season-over-season trend statistics and next-season forecasts
/// from a labeled runway observation table.
#[derive(Parser, Debug)]
#[command(name = "trend_report", version)]
struct CliArgs {
    /// CSV file with image_path, style, category, super_category, pattern,
    /// color_1, color_2 and color_1_percentage columns.
    pub input: PathBuf,

    /// Directory receiving the result tables and the summary.
    #[arg(short, long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Season labels in chronological order; replaces the configured list.
    #[arg(long = "season")]
    pub seasons: Vec<String>,

    /// Entries listed per feature type in the summary.
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Share of rows allowed to carry an unknown season before the run fails.
    #[arg(long)]
    pub max_unknown_fraction: Option<f64>,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,

    /// Do not print the summary to stdout.
    #[arg(short, long)]
    pub quiet: bool,
}

fn build_config(args: &CliArgs) -> Result<TrendConfig> {
    let mut config = match &args.config {
        Some(path) => TrendConfig::load(path)?,
        None => TrendConfig::default(),
    };

    if !args.seasons.is_empty() {
        config.seasons = args.seasons.clone();
    }
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if let Some(fraction) = args.max_unknown_fraction {
        config.max_unknown_season_fraction = fraction;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &CliArgs) -> Result<()> {
    let config = build_config(args)?;
    let pipeline = TrendPipeline::new(config)?;

    let table = pipeline.load(&args.input)?;
    let output = pipeline.run(&table);

    let written = OutputWriter::new(&args.output_dir)?.write(&output)?;
    info!(files = written.len(), dir = %args.output_dir.display(), "Trend report complete");

    if !args.quiet {
        println!("{}", output.report);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Trend report failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use trend_forecast::TrendError;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("trend_report").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = parse(&["labels.csv"]);
        assert_eq!(args.output_dir, PathBuf::from("data/processed"));
        assert_eq!(build_config(&args).unwrap(), TrendConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "seasons = [\"Spring24\", \"Fall24\"]\ntop_n = 7\nmax_unknown_season_fraction = 0.1"
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap();

        let args = parse(&["labels.csv", "--config", config_path, "--top-n", "2"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.top_n, 2);
        assert_eq!(config.seasons, vec!["Spring24", "Fall24"]);
        assert_eq!(config.max_unknown_season_fraction, 0.1);

        let args = parse(&[
            "labels.csv",
            "-c",
            config_path,
            "--season",
            "Spring25",
            "--season",
            "Fall25",
            "--max-unknown-fraction",
            "0.5",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.seasons, vec!["Spring25", "Fall25"]);
        assert_eq!(config.top_n, 7);
        assert_eq!(config.max_unknown_season_fraction, 0.5);
    }

    #[test]
    fn test_overrides_are_validated() {
        let args = parse(&["labels.csv", "--max-unknown-fraction", "1.5"]);
        assert!(matches!(build_config(&args), Err(TrendError::InvalidConfig(_))));

        let args = parse(&["labels.csv", "--top-n", "0"]);
        assert!(matches!(build_config(&args), Err(TrendError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["labels.csv", "--config", "/nonexistent/trends.toml"]);
        assert!(matches!(build_config(&args), Err(TrendError::IoError(_))));
    }
}
