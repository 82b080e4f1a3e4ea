// src/main.rs
use crate::api::AppState;
use crate::config::AppConfig;
use crate::connectors::binance::BinanceClient;
use crate::connectors::ccdata::CcDataClient;
use crate::core::cache::MemoryCache;
use crate::core::engine::PortfolioEngine;
use anyhow::Context;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod connectors;
mod core;
mod error;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

/// Console logging always; a daily rolling file as well when `log_dir` is set.
/// The returned guard flushes the file writer on drop.
fn init_logging(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,coinfolio=debug"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "coinfolio.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Load Configuration (credentials are mandatory)
    let config = AppConfig::load().context("invalid configuration")?;
    let _log_guard = init_logging(config.log_dir.as_deref());

    info!("========================================");
    info!("       COINFOLIO - v{}", env!("CARGO_PKG_VERSION"));
    info!("========================================");
    info!("Quote currency: {}", config.quote_currency);
    if config.cc_api_key.is_empty() {
        warn!("CC_API_KEY is not set; market data requests will likely be rejected");
    }

    // 2. Initialize Components
    let exchange = Arc::new(BinanceClient::from_config(&config)?);
    let market_data = Arc::new(CcDataClient::from_config(&config)?);
    let engine = PortfolioEngine::new(
        exchange,
        market_data,
        Arc::new(MemoryCache::new()),
        config.trade_history_limit,
    );

    let state = AppState {
        engine: Arc::new(engine),
        default_currency: config.quote_currency.clone(),
    };

    // 3. Serve
    let app = api::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
