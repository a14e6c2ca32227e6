use anyhow::{Context, Result};
use battery_buyback::{
    models::{Battery, PricingConfig},
    pricing::{BatteryQuote, QuoteCalculator},
};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;

/// Only the batteries of a pickup file matter for pricing
#[derive(Debug, Deserialize)]
struct PickupFile {
    batteries: Vec<Battery>,
}

#[derive(Debug, Serialize)]
struct QuoteReport {
    total: f64,
    batteries: Vec<BatteryQuote>,
}

/// Execute the quote command
///
/// Prices the batteries in `pickup_path` with the configuration in
/// `pricing_path`, as the server would when the pickup is created.
pub fn execute(pricing_path: &Path, pickup_path: &Path, json: bool) -> Result<()> {
    let pricing: PricingConfig = read_json(pricing_path)?;
    let pickup: PickupFile = read_json(pickup_path)?;

    let report = build_report(&pricing, &pickup.batteries)?;
    info!(
        batteries = report.batteries.len(),
        total = report.total,
        "Priced pickup"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Quote Breakdown:".bold());
    for (idx, (battery, quote)) in pickup.batteries.iter().zip(&report.batteries).enumerate() {
        println!(
            "  {}. {} {} ({:?}): base {:.2} × score {:.4} = {}",
            idx + 1,
            battery.effective_brand().unwrap_or("unbranded"),
            battery.effective_model().unwrap_or(""),
            quote.source,
            quote.base_price,
            quote.score,
            format!("{:.2}", quote.price).cyan()
        );
    }
    println!();
    println!("  {}: {}", "Total".bold(), format!("{:.2}", report.total).green().bold());

    Ok(())
}

fn build_report(pricing: &PricingConfig, batteries: &[Battery]) -> Result<QuoteReport> {
    let calculator = QuoteCalculator::new(pricing)?;
    let quotes = batteries
        .iter()
        .map(|battery| calculator.quote_battery(battery))
        .collect::<Result<Vec<_>, _>>()?;
    let total: f64 = quotes.iter().map(|quote| quote.price).sum();

    Ok(QuoteReport {
        total,
        batteries: quotes,
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
