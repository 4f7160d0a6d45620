//! Tic-tac-toe rollup handler binary.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::time::Duration;
use tictactoe_core::MatchStateMachine;
use tictactoe_rollup::{Dapp, DappConfig, Driver, HttpRollupClient};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config(&cli)?;
    let rollup_url = config.resolved_rollup_url()?;
    info!(url = %rollup_url, "HTTP rollup server url");

    let machine = match config.seed() {
        Some(seed) => MatchStateMachine::seeded(*config.board_size(), *seed)?,
        None => MatchStateMachine::new(*config.board_size())?,
    };
    info!(board_size = machine.board_size(), "State machine ready");

    let driver = Driver::new(
        HttpRollupClient::new(&rollup_url),
        Dapp::new(machine),
        Duration::from_millis(*config.poll_interval_ms()),
    );
    driver.run().await?;

    Ok(())
}

/// Merges the config file (if any) with command-line overrides.
#[instrument(skip_all)]
fn load_config(cli: &Cli) -> Result<DappConfig> {
    let config = match &cli.config {
        Some(path) => DappConfig::from_file(path)?,
        None => DappConfig::default(),
    };
    let config = config.with_overrides(cli.rollup_url.clone(), cli.board_size, cli.seed);
    config.validate()?;
    Ok(config)
}
