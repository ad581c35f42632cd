// src/main.rs
use futures_bot::cli;
use futures_bot::config::Config;
use futures_bot::domain::errors::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting futures_bot v{}", env!("CARGO_PKG_VERSION"));

    cli::run(&config).await
}
