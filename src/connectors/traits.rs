// src/connectors/traits.rs
use crate::error::{FolioError, FolioResult};
use crate::types::{Balance, Order, PriceQuote, Trade};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Read-only access to one exchange account and its public tickers.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Orders for `symbol` with status FILLED.
    async fn list_filled_orders(&self, symbol: &str, limit: u32) -> FolioResult<Vec<Order>>;

    /// Raw fill list for `symbol`, oldest first.
    async fn list_trades(&self, symbol: &str, limit: u32) -> FolioResult<Vec<Trade>>;

    async fn get_account_balances(&self) -> FolioResult<Vec<Balance>>;

    async fn get_current_price(&self, symbol: &str) -> FolioResult<Decimal>;

    /// Returns `(price_change, last_price)` over the trailing 24h.
    async fn get_24h_change(&self, symbol: &str) -> FolioResult<(Decimal, Decimal)>;

    /// Free balance of a single asset.
    async fn get_balance(&self, asset: &str) -> FolioResult<Decimal> {
        self.get_account_balances()
            .await?
            .into_iter()
            .find(|b| b.asset == asset)
            .map(|b| b.free)
            .ok_or_else(|| FolioError::not_found(format!("asset {} not found in account", asset)))
    }
}

/// Batched spot quotes keyed by `BASE-QUOTE` instrument.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    async fn latest_quotes(
        &self,
        instruments: &[String],
    ) -> FolioResult<HashMap<String, PriceQuote>>;
}
