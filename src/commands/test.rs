use anyhow::Result;
use battery_buyback::config::Config;
use colored::Colorize;
use tracing::info;

/// Execute the test command
///
/// This validates the configuration file without starting the server
pub fn execute(cfg: Result<Config>) -> Result<()> {
    println!("{}", "Testing configuration...".yellow());
    info!("Loading and validating configuration");

    let cfg = cfg?;

    println!("{}", "✓ Configuration test successful".green());
    println!();

    println!("{}", "Configuration Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Log Level".cyan(), cfg.server.log_level);
    println!();

    println!(
        "  {}: {} days",
        "Quote Validity".cyan(),
        cfg.quotes.validity_days
    );
    println!(
        "  {}: {}",
        "Sample Data".cyan(),
        if cfg.storage.seed_sample_data {
            "seeded".green()
        } else {
            "empty store".yellow()
        }
    );
    println!();

    println!("  {}: {}", "Metrics".cyan(), if cfg.metrics.enabled {
        "enabled".green()
    } else {
        "disabled".red()
    });
    if cfg.metrics.enabled {
        println!("    Endpoint: {}", cfg.metrics.endpoint);
    }

    info!("Configuration validation completed successfully");
    Ok(())
}
