use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use rstest::rstest;
use trend_forecast::{summarize, FeatureKey, SeasonalFrequency, TrendDirection};

fn freq(rank: usize, value: &str, percentage: f64) -> SeasonalFrequency {
    SeasonalFrequency {
        season: format!("S{}", rank),
        season_rank: rank,
        feature: FeatureKey::value(value),
        frequency: 1,
        percentage,
        avg_color_area_percentage: None,
    }
}

#[test]
fn test_denim_statistics() {
    let stats = summarize(&[freq(1, "denim", 10.0), freq(2, "denim", 20.0), freq(3, "denim", 15.0)]);

    assert_eq!(stats.len(), 1);
    let denim = &stats[0];
    assert_eq!(denim.seasons_observed, 3);
    assert_relative_eq!(denim.avg_percentage, 15.0);
    assert_eq!(denim.trend_direction, TrendDirection::Increasing);
    // Sample standard deviation 5.0 over mean 15.0
    assert_relative_eq!(denim.volatility.unwrap(), 100.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_single_season_value() {
    let stats = summarize(&[freq(2, "cape", 4.0)]);

    assert_eq!(stats[0].seasons_observed, 1);
    assert_eq!(stats[0].trend_direction, TrendDirection::Stable);
    assert_eq!(stats[0].volatility, None);
}

#[test]
fn test_zero_mean_has_undefined_volatility() {
    let stats = summarize(&[freq(1, "ghost", 0.0), freq(2, "ghost", 0.0)]);
    assert_eq!(stats[0].volatility, None);
    assert_eq!(stats[0].trend_direction, TrendDirection::Stable);
}

#[rstest]
#[case(&[10.0, 30.0, 5.0], TrendDirection::Decreasing)]
#[case(&[10.0, 30.0, 10.0], TrendDirection::Stable)]
#[case(&[10.0, 5.0, 12.0], TrendDirection::Increasing)]
fn test_direction_compares_first_and_last(
    #[case] series: &[f64],
    #[case] expected: TrendDirection,
) {
    let records: Vec<SeasonalFrequency> = series
        .iter()
        .enumerate()
        .map(|(i, p)| freq(i + 1, "pleats", *p))
        .collect();

    assert_eq!(summarize(&records)[0].trend_direction, expected);
}

#[test]
fn test_series_is_ordered_by_rank() {
    let stats = summarize(&[freq(3, "denim", 15.0), freq(1, "denim", 10.0), freq(2, "denim", 20.0)]);
    assert_eq!(stats[0].trend_direction, TrendDirection::Increasing);
}

#[test]
fn test_sorted_by_average_share() {
    let stats = summarize(&[
        freq(1, "denim", 10.0),
        freq(2, "denim", 20.0),
        freq(1, "floral", 40.0),
        freq(1, "tweed", 15.0),
        freq(2, "tweed", 15.0),
    ]);

    let order: Vec<String> = stats.iter().map(|s| s.feature.to_string()).collect();
    // denim and tweed tie on 15.0
    assert_eq!(order, vec!["floral", "denim", "tweed"]);
}
