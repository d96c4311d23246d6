//! Twinverse command-line entry point.

mod cli;

use clap::Parser;
use cli::Cli;
use twinverse::AppConfig;
use twinverse_core::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(config.logging().filter(), *config.logging().json())?;

    cli::run(cli, config).await
}
