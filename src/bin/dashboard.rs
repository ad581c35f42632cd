// src/bin/dashboard.rs
// Browser dashboard over the same session facade as the CLI menu.

use futures_bot::api;
use futures_bot::config::Config;
use futures_bot::domain::errors::{AppError, AppResult};
use futures_bot::exchange::binance::BinanceFutures;
use futures_bot::exchange::client::FuturesApi;
use futures_bot::trading::session::Session;
use std::sync::Arc;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = Config::from_env()?;
    config.init_logging()?;

    if !config.exchange.has_credentials() {
        return Err(AppError::Config(
            "Set BINANCE_TESTNET_API_KEY and BINANCE_TESTNET_API_SECRET".to_string(),
        ));
    }

    log::info!("Connecting to {}", config.exchange.base_url);
    let api: Arc<dyn FuturesApi> = Arc::new(BinanceFutures::with_base_url(
        &config.exchange.api_key,
        &config.exchange.base_url,
    ));
    let session = Session::connect(api).await?;

    let router = api::create_router(Arc::new(session));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Dashboard listening on http://{}", addr);
    println!("Dashboard running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
