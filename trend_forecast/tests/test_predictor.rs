use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use trend_forecast::{compute_momentum, predict_next, Confidence, FeatureKey, SeasonalFrequency};

fn freq(rank: usize, value: &str, percentage: f64) -> SeasonalFrequency {
    let season = ["Fall24", "Spring25", "Fall25"][rank - 1];
    SeasonalFrequency {
        season: season.to_string(),
        season_rank: rank,
        feature: FeatureKey::value(value),
        frequency: 1,
        percentage,
        avg_color_area_percentage: None,
    }
}

fn predictions_for(frequencies: &[SeasonalFrequency]) -> Vec<trend_forecast::Prediction> {
    let momentum = compute_momentum(frequencies);
    predict_next(frequencies, &momentum)
}

#[test]
fn test_positive_momentum_projects_up() {
    let predictions = predictions_for(&[
        freq(1, "denim", 10.0),
        freq(2, "denim", 20.0),
        freq(3, "denim", 15.0),
    ]);

    assert_eq!(predictions.len(), 1);
    let denim = &predictions[0];
    assert_relative_eq!(denim.latest_percentage, 15.0);
    assert_relative_eq!(denim.avg_momentum.unwrap(), 37.5);
    assert_relative_eq!(denim.predicted_percentage, 20.625);
    assert_eq!(denim.confidence, Confidence::High);
}

#[test]
fn test_negative_momentum_is_low_confidence() {
    let predictions = predictions_for(&[freq(2, "leather", 20.0), freq(3, "leather", 10.0)]);

    assert_relative_eq!(predictions[0].predicted_percentage, 5.0);
    assert_eq!(predictions[0].confidence, Confidence::Low);
}

#[test]
fn test_undefined_momentum_keeps_latest_share() {
    let predictions = predictions_for(&[freq(3, "cape", 4.0)]);

    assert_eq!(predictions[0].avg_momentum, None);
    assert_relative_eq!(predictions[0].predicted_percentage, 4.0);
    assert_eq!(predictions[0].confidence, Confidence::Medium);
}

#[test]
fn test_only_latest_season_values_are_predicted() {
    let predictions = predictions_for(&[
        freq(1, "denim", 50.0),
        freq(1, "tweed", 50.0),
        freq(2, "denim", 60.0),
        freq(2, "tweed", 40.0),
        freq(3, "denim", 100.0),
    ]);

    let features: Vec<String> = predictions.iter().map(|p| p.feature.to_string()).collect();
    assert_eq!(features, vec!["denim"]);
}

#[test]
fn test_one_prediction_per_value_sorted_desc() {
    let predictions = predictions_for(&[
        freq(2, "denim", 30.0),
        freq(2, "floral", 40.0),
        freq(2, "plaid", 30.0),
        freq(3, "denim", 40.0),
        freq(3, "floral", 20.0),
        freq(3, "plaid", 40.0),
    ]);

    let unique: BTreeSet<&FeatureKey> = predictions.iter().map(|p| &p.feature).collect();
    assert_eq!(unique.len(), predictions.len());
    assert_eq!(predictions.len(), 3);

    assert!(predictions
        .windows(2)
        .all(|w| w[0].predicted_percentage >= w[1].predicted_percentage));
    // denim and plaid tie on 53.33; the tie breaks by value
    assert_eq!(predictions[0].feature, FeatureKey::value("denim"));
    assert_eq!(predictions[1].feature, FeatureKey::value("plaid"));
    assert_eq!(predictions[2].confidence, Confidence::Low);
}

#[test]
fn test_predictions_are_not_clamped() {
    let predictions = predictions_for(&[freq(1, "denim", 10.0), freq(2, "denim", 90.0)]);
    assert!(predictions[0].predicted_percentage > 100.0);
}

#[test]
fn test_growth_from_zero_share() {
    let predictions = predictions_for(&[freq(1, "sequin", 0.0), freq(2, "sequin", 5.0)]);

    assert_eq!(predictions[0].avg_momentum, None);
    assert_relative_eq!(predictions[0].predicted_percentage, 5.0);
    assert_eq!(predictions[0].confidence, Confidence::Medium);
}
