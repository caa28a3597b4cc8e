mod cli;
mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use todo_client::TodoClient;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_filter())?;

    let config = Config::load().context("Failed to load apps/cli/config.toml")?;

    // --url / TODO_URL beats the config file
    let url = cli.url.clone().unwrap_or_else(|| config.server.url.clone());
    debug!("Todo server: {}", url);

    let client = TodoClient::new(url);
    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &client, &config.watch, &mut stdout).await
}
