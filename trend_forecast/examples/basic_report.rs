use trend_forecast::{FeatureSelector, Observation, ObservationTable, TrendConfig, TrendPipeline};

fn look(id: usize, season: &str, style: &str, color_1: &str, color_2: &str) -> Observation {
    Observation::new(format!("runway/{}/look_{:03}.jpg", season, id), season)
        .with_style(style)
        .with_category("top")
        .with_super_category("upperbody")
        .with_pattern("solid")
        .with_color_1(color_1)
        .with_color_2(color_2)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a small in-memory table instead of loading a CSV
    let looks = [
        ("Fall24", "denim", "blue", "white", 2),
        ("Fall24", "tailored", "black", "grey", 6),
        ("Spring25", "denim", "blue", "white", 4),
        ("Spring25", "floral", "pink", "green", 4),
        ("Fall25", "denim", "blue", "black", 6),
        ("Fall25", "tailored", "black", "white", 4),
    ];

    let mut observations = Vec::new();
    for (season, style, color_1, color_2, count) in looks {
        for _ in 0..count {
            observations.push(look(observations.len() + 1, season, style, color_1, color_2));
        }
    }
    let table = ObservationTable::new(observations);

    let pipeline = TrendPipeline::new(TrendConfig::default())?;
    let output = pipeline.run(&table);

    if let Some(style) = output
        .outcome(FeatureSelector::Style)
        .and_then(|o| o.analysis())
    {
        println!("Style momentum:");
        for record in &style.momentum {
            let momentum = record
                .momentum
                .map(|m| format!("{:+.1}%", m))
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "  {:<10} {:<9} {:>6.2}%  {}",
                record.feature().to_string(),
                record.frequency.season,
                record.frequency.percentage,
                momentum
            );
        }
    }

    println!();
    println!("{}", output.report);

    Ok(())
}
