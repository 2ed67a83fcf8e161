use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rstest::rstest;
use std::collections::BTreeMap;
use trend_forecast::aggregation::{count_excluded, latest_rank};
use trend_forecast::{aggregate, FeatureKey, FeatureSelector, Observation, SeasonRegistry, TrendError};

fn registry() -> SeasonRegistry {
    SeasonRegistry::new(["Fall24", "Spring25", "Fall25"]).unwrap()
}

fn look(id: usize, season: &str, style: &str, color_1: &str, color_2: &str) -> Observation {
    Observation::new(format!("{}/look_{:03}.jpg", season, id), season)
        .with_style(style)
        .with_category("top")
        .with_super_category("upperbody")
        .with_pattern("solid")
        .with_color_1(color_1)
        .with_color_2(color_2)
        .with_color_1_percentage(40.0 + id as f64)
}

fn sample() -> Vec<Observation> {
    vec![
        look(1, "Fall24", "denim", "blue", "white"),
        look(2, "Fall24", "denim", "blue", ""),
        look(3, "Fall24", "tailored", "black", "white"),
        look(4, "Fall24", "", "black", "grey"),
        look(5, "Spring25", "denim", "white", "blue"),
        look(6, "Spring25", "floral", "pink", "green"),
        look(7, "Spring25", "floral", "pink", ""),
        look(8, "Fall25", "tailored", "black", "white"),
        look(9, "Fall25", "denim", "blue", "white"),
        look(10, "Fall25", "denim", "blue", "black"),
    ]
}

#[rstest]
#[case(FeatureSelector::Style)]
#[case(FeatureSelector::Category)]
#[case(FeatureSelector::SuperCategory)]
#[case(FeatureSelector::Pattern)]
#[case(FeatureSelector::Color)]
#[case(FeatureSelector::ColorPair)]
fn test_percentages_sum_to_100_per_season(#[case] selector: FeatureSelector) {
    let records = aggregate(&sample(), selector, &registry()).unwrap();
    assert!(!records.is_empty());

    let mut totals: BTreeMap<usize, f64> = BTreeMap::new();
    for record in &records {
        *totals.entry(record.season_rank).or_insert(0.0) += record.percentage;
    }
    for (_, total) in totals {
        assert_relative_eq!(total, 100.0, epsilon = 1e-6);
    }
}

#[test]
fn test_style_frequencies() {
    let records = aggregate(&sample(), FeatureSelector::Style, &registry()).unwrap();

    let fall24: Vec<(&FeatureKey, usize)> = records
        .iter()
        .filter(|r| r.season == "Fall24")
        .map(|r| (&r.feature, r.frequency))
        .collect();
    // The look without a style is excluded from the Fall24 denominator
    assert_eq!(
        fall24,
        vec![
            (&FeatureKey::value("denim"), 2),
            (&FeatureKey::value("tailored"), 1)
        ]
    );

    let denim = &records[0];
    assert_eq!(denim.season_rank, 1);
    assert_relative_eq!(denim.percentage, 200.0 / 3.0, epsilon = 1e-9);
    assert_eq!(denim.avg_color_area_percentage, None);
}

#[test]
fn test_records_ordered_by_rank_then_frequency() {
    let records = aggregate(&sample(), FeatureSelector::Style, &registry()).unwrap();
    let order: Vec<(usize, String)> = records
        .iter()
        .map(|r| (r.season_rank, r.feature.to_string()))
        .collect();

    assert_eq!(
        order,
        vec![
            (1, "denim".to_string()),
            (1, "tailored".to_string()),
            (2, "floral".to_string()),
            (2, "denim".to_string()),
            (3, "denim".to_string()),
            (3, "tailored".to_string()),
        ]
    );
}

#[test]
fn test_color_tracks_average_area() {
    let records = aggregate(&sample(), FeatureSelector::Color, &registry()).unwrap();
    let blue_fall24 = records
        .iter()
        .find(|r| r.season == "Fall24" && r.feature == FeatureKey::value("blue"))
        .unwrap();

    assert_eq!(blue_fall24.frequency, 2);
    assert_relative_eq!(blue_fall24.avg_color_area_percentage.unwrap(), 41.5);
}

#[test]
fn test_color_pair_needs_both_colors() {
    let observations = sample();
    let records = aggregate(&observations, FeatureSelector::ColorPair, &registry()).unwrap();

    let counted: usize = records.iter().map(|r| r.frequency).sum();
    assert_eq!(counted, 8);
    assert_eq!(count_excluded(&observations, FeatureSelector::ColorPair), 2);
    assert!(records
        .iter()
        .all(|r| matches!(r.feature, FeatureKey::Pair(_, _))));

    let fall25_blue_white = records
        .iter()
        .find(|r| r.season == "Fall25" && r.feature == FeatureKey::pair("blue", "white"))
        .unwrap();
    assert_relative_eq!(fall25_blue_white.percentage, 100.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_missing_value_only_excludes_that_feature() {
    let observations = sample();
    assert_eq!(count_excluded(&observations, FeatureSelector::Style), 1);
    assert_eq!(count_excluded(&observations, FeatureSelector::Color), 0);

    let colors = aggregate(&observations, FeatureSelector::Color, &registry()).unwrap();
    let counted: usize = colors.iter().map(|r| r.frequency).sum();
    assert_eq!(counted, observations.len());
}

#[rstest]
#[case(FeatureSelector::Style)]
#[case(FeatureSelector::Category)]
#[case(FeatureSelector::SuperCategory)]
#[case(FeatureSelector::Pattern)]
#[case(FeatureSelector::Color)]
#[case(FeatureSelector::ColorPair)]
fn test_input_order_does_not_matter(#[case] selector: FeatureSelector) {
    let expected = aggregate(&sample(), selector, &registry()).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5 {
        let mut shuffled = sample();
        shuffled.shuffle(&mut rng);
        let records = aggregate(&shuffled, selector, &registry()).unwrap();
        assert_eq!(records, expected);
    }
}

#[test]
fn test_color_area_average_ignores_row_order() {
    let areas = [
        12.7, 33.1, 8.45, 19.999, 41.2, 3.3, 27.77, 15.05, 22.1, 9.81, 30.03, 32.9,
    ];
    let looks: Vec<Observation> = areas
        .iter()
        .enumerate()
        .map(|(i, area)| {
            Observation::new(format!("Fall24/look_{:02}.jpg", i), "Fall24")
                .with_color_1("red")
                .with_color_1_percentage(*area)
        })
        .collect();

    let expected = aggregate(&looks, FeatureSelector::Color, &registry()).unwrap();
    let expected_area = expected[0].avg_color_area_percentage.unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut shuffled = looks.clone();
        shuffled.shuffle(&mut rng);
        let records = aggregate(&shuffled, FeatureSelector::Color, &registry()).unwrap();
        // Bit-for-bit equal so the written tables match
        assert_eq!(
            records[0].avg_color_area_percentage.unwrap().to_bits(),
            expected_area.to_bits()
        );
    }
}

#[test]
fn test_blank_values_set_directly_are_excluded() {
    let mut blank = Observation::new("Fall24/look_02.jpg", "Fall24");
    blank.style = Some(String::new());
    let mut spaces = Observation::new("Fall24/look_03.jpg", "Fall24");
    spaces.style = Some("  ".to_string());
    let observations = vec![
        Observation::new("Fall24/look_01.jpg", "Fall24").with_style("denim"),
        blank,
        spaces,
    ];

    let records = aggregate(&observations, FeatureSelector::Style, &registry()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].feature, FeatureKey::value("denim"));
    assert_relative_eq!(records[0].percentage, 100.0);
    assert_eq!(count_excluded(&observations, FeatureSelector::Style), 2);
}

#[test]
fn test_unknown_season_fails_aggregation() {
    let mut observations = sample();
    observations.push(look(11, "Winter23", "denim", "blue", "white"));

    let result = aggregate(&observations, FeatureSelector::Style, &registry());
    assert!(matches!(result, Err(TrendError::UnknownSeason(s)) if s == "Winter23"));
}

#[test]
fn test_empty_input() {
    let records = aggregate(&[], FeatureSelector::Style, &registry()).unwrap();
    assert!(records.is_empty());
    assert_eq!(latest_rank(&records), None);
}

#[test]
fn test_latest_rank_skips_missing_seasons() {
    let observations: Vec<Observation> = sample()
        .into_iter()
        .filter(|o| o.season != "Fall25")
        .collect();
    let records = aggregate(&observations, FeatureSelector::Style, &registry()).unwrap();
    assert_eq!(latest_rank(&records), Some(2));
}
