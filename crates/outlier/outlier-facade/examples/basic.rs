//! Basic example demonstrating windowed outlier detection
//!
//! Run with: RUST_LOG=debug cargo run --example basic -p outlier-facade

use outlier_facade::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Outlier Detection Basic Examples ===\n");

    // Gentle seasonal series with a few injected shocks
    let mut series: Vec<f64> = (0..120)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 2.0)
        .collect();
    series[40] += 25.0;
    series[75] -= 30.0;
    series[110] += 18.0;

    // 1. Rolling window
    println!("1. Rolling window (threshold=3.0, window=20)");
    let mut rolling = OutlierDetector::new(3.0, "mean", "rolling", 20)?;
    let (_, mask) = rolling.fit(&series)?.transform()?;
    println!("   Flagged: {:?}", flagged(mask));
    println!("{}\n", indent(&rolling.report()?.to_string()));

    // 2. Expanding window
    println!("2. Expanding window (threshold=3.0)");
    let config = DetectorConfig::builder()
        .mode(WindowMode::Expanding)
        .threshold(3.0)
        .build()?;
    let mut expanding = OutlierDetector::from_config(config)?;
    let (_, mask) = expanding.fit_transform(&series)?;
    println!("   Flagged: {:?}\n", flagged(&mask));

    // 3. Lifecycle guard
    println!("3. Transform before fit");
    let unfitted = OutlierDetector::default();
    match unfitted.transform() {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   error: {}", e),
    }

    println!("\n=== Examples Complete ===");
    Ok(())
}

fn flagged(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &b)| if b { Some(i) } else { None })
        .collect()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("   {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
