use anyhow::Result;
use battery_buyback::config::Config;
use colored::Colorize;
use tracing::info;

/// Execute the config show command
pub fn show(cfg: Result<Config>) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = cfg?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(cfg: Result<Config>) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = cfg?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen Address: {}", listen_address(&cfg));
    println!("  Quote Validity: {} days", cfg.quotes.validity_days);

    info!("Configuration validation successful");
    Ok(())
}

fn listen_address(cfg: &Config) -> String {
    format!("{}:{}", cfg.server.host, cfg.server.port)
}
