//! `deskboard` binary: todo API server, todo CLI and terminal dashboard.

use anyhow::Result;
use clap::Parser;

use deskboard_core::Config;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    deskboard_core::init()?;

    let cli = cli::Cli::parse();
    let (config, _validation) = Config::load_validated()?;
    tracing::debug!("Config directory: {}", config.config_dir.display());

    cli.run(config).await
}
