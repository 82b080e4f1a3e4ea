// src/test_support.rs
//! In-memory exchange and market-data fakes for unit tests.
use crate::connectors::traits::{ExchangeClient, MarketDataClient};
use crate::error::{FolioError, FolioResult};
use crate::types::{Balance, Order, PriceQuote, Trade};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn balance(asset: &str, free: Decimal) -> Balance {
    Balance {
        asset: asset.to_string(),
        free,
        locked: Decimal::ZERO,
    }
}

pub fn trade(price: Decimal, qty: Decimal, is_buyer: bool, is_maker: bool, time: i64) -> Trade {
    Trade {
        symbol: "BTCUSDT".to_string(),
        id: time,
        order_id: time,
        order_list_id: -1,
        price,
        qty,
        quote_qty: price * qty,
        commission: Decimal::ZERO,
        commission_asset: "BNB".to_string(),
        time,
        is_buyer,
        is_maker,
        is_best_match: true,
    }
}

pub fn quote(instrument: &str, price: Decimal) -> PriceQuote {
    PriceQuote {
        instrument: instrument.to_string(),
        price,
        change_value: Decimal::ONE,
        change_percent: Decimal::ONE,
        flag: "UP".to_string(),
    }
}

/// Base URL of a local port with nothing listening on it.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[derive(Default)]
pub struct FakeExchange {
    balances: Mutex<Vec<Balance>>,
    trades: HashMap<String, Vec<Trade>>,
    orders: Vec<Order>,
    failing_symbols: HashSet<String>,
    prices: HashMap<String, Decimal>,
    changes: HashMap<String, (Decimal, Decimal)>,
    pub balance_calls: AtomicUsize,
    pub trade_calls: AtomicUsize,
}

impl FakeExchange {
    pub fn with_balances(self, balances: Vec<Balance>) -> Self {
        *self.balances.lock() = balances;
        self
    }

    pub fn with_trades(mut self, symbol: &str, trades: Vec<Trade>) -> Self {
        self.trades.insert(symbol.to_string(), trades);
        self
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    /// Every call for `symbol` fails with an upstream 400.
    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing_symbols.insert(symbol.to_string());
        self
    }

    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_24h(mut self, symbol: &str, change: Decimal, last: Decimal) -> Self {
        self.changes.insert(symbol.to_string(), (change, last));
        self
    }

    pub fn set_balances(&self, balances: Vec<Balance>) {
        *self.balances.lock() = balances;
    }

    fn check(&self, symbol: &str) -> FolioResult<()> {
        if self.failing_symbols.contains(symbol) {
            return Err(FolioError::UpstreamStatus {
                service: "fake",
                status: 400,
                body: format!("{{\"code\":-1121,\"msg\":\"Invalid symbol {}\"}}", symbol),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ExchangeClient for FakeExchange {
    async fn list_filled_orders(&self, symbol: &str, limit: u32) -> FolioResult<Vec<Order>> {
        self.check(symbol)?;
        Ok(self
            .orders
            .iter()
            .filter(|o| o.symbol == symbol && o.is_filled())
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_trades(&self, symbol: &str, limit: u32) -> FolioResult<Vec<Trade>> {
        self.trade_calls.fetch_add(1, Ordering::SeqCst);
        self.check(symbol)?;
        let trades = self.trades.get(symbol).cloned().unwrap_or_default();
        Ok(trades.into_iter().take(limit as usize).collect())
    }

    async fn get_account_balances(&self) -> FolioResult<Vec<Balance>> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balances.lock().clone())
    }

    async fn get_current_price(&self, symbol: &str) -> FolioResult<Decimal> {
        self.check(symbol)?;
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| FolioError::not_found(symbol))
    }

    async fn get_24h_change(&self, symbol: &str) -> FolioResult<(Decimal, Decimal)> {
        self.check(symbol)?;
        self.changes
            .get(symbol)
            .copied()
            .ok_or_else(|| FolioError::not_found(symbol))
    }
}

#[derive(Default)]
pub struct FakeMarketData {
    quotes: HashMap<String, PriceQuote>,
    requests: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl FakeMarketData {
    pub fn with_quote(mut self, quote: PriceQuote) -> Self {
        self.quotes.insert(quote.instrument.clone(), quote);
        self
    }

    pub fn unavailable() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl MarketDataClient for FakeMarketData {
    async fn latest_quotes(
        &self,
        instruments: &[String],
    ) -> FolioResult<HashMap<String, PriceQuote>> {
        self.requests.lock().push(instruments.to_vec());
        if self.fail {
            return Err(FolioError::transport("fake", "connection refused"));
        }
        Ok(instruments
            .iter()
            .filter_map(|i| self.quotes.get(i).map(|q| (i.clone(), q.clone())))
            .collect())
    }
}
