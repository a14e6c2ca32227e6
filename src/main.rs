use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use battery_buyback::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // A broken config file is reported by the command itself; log at info until then
    let cfg = config::load_config(&args.config);
    let log_level = cfg
        .as_ref()
        .map(|c| c.server.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level);

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(cfg?).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(cfg)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(cfg)?,
        },
        cli::Commands::Quote {
            pricing,
            pickup,
            json,
        } => {
            commands::quote::execute(&pricing, &pickup, json)?;
        }
        cli::Commands::Version => {
            println!("Battery Buy-back v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
