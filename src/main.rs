use clap::Parser;

use agrisync::cli::Cli;
use agrisync::config::{Config, API_URL_ENV};
use agrisync::store::Store;
use agrisync::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // Precedence: --api-url, then AGRISYNC_API_URL, then the config file.
    let config = match &cli.config {
        Some(path) => {
            Config::load_from(path)?.with_base_url_override(std::env::var(API_URL_ENV).ok())
        }
        None => Config::load()?,
    }
    .with_base_url_override(cli.api_url.clone());
    config.validate()?;

    let store = Store::bootstrap(&config)?;
    cli.command.run(&store).await
}
