use anyhow::Result;
use battery_buyback::{config::Config, server};
use colored::Colorize;
use tracing::info;

/// Execute the start command
pub async fn execute(cfg: Config) -> Result<()> {
    println!("{}", "Starting battery buy-back API...".green());
    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        "Starting battery buy-back API"
    );

    // Blocks until shutdown
    server::start_server(cfg).await?;

    Ok(())
}
