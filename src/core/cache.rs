// src/core/cache.rs
use crate::types::{PortfolioRecord, Trade};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Valuation only.
    Wallet,
    /// Valuation plus per-asset trade statistics.
    Portfolio,
}

/// Computed views keyed by `(kind, quote currency)` and raw trade history
/// keyed by exchange symbol.
///
/// Entries are written once: a `put` for an existing key keeps the stored
/// value and returns it.
pub trait ResultCache: Send + Sync {
    fn get_view(&self, kind: ViewKind, currency: &str) -> Option<Arc<Vec<PortfolioRecord>>>;

    fn put_view(
        &self,
        kind: ViewKind,
        currency: &str,
        records: Vec<PortfolioRecord>,
    ) -> Arc<Vec<PortfolioRecord>>;

    fn get_trades(&self, symbol: &str) -> Option<Arc<Vec<Trade>>>;

    fn put_trades(&self, symbol: &str, trades: Vec<Trade>) -> Arc<Vec<Trade>>;
}

/// Process-lifetime cache with no expiry.
#[derive(Default)]
pub struct MemoryCache {
    views: RwLock<HashMap<(ViewKind, String), Arc<Vec<PortfolioRecord>>>>,
    trades: RwLock<HashMap<String, Arc<Vec<Trade>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultCache for MemoryCache {
    fn get_view(&self, kind: ViewKind, currency: &str) -> Option<Arc<Vec<PortfolioRecord>>> {
        self.views
            .read()
            .get(&(kind, currency.to_string()))
            .cloned()
    }

    fn put_view(
        &self,
        kind: ViewKind,
        currency: &str,
        records: Vec<PortfolioRecord>,
    ) -> Arc<Vec<PortfolioRecord>> {
        self.views
            .write()
            .entry((kind, currency.to_string()))
            .or_insert_with(|| Arc::new(records))
            .clone()
    }

    fn get_trades(&self, symbol: &str) -> Option<Arc<Vec<Trade>>> {
        self.trades.read().get(symbol).cloned()
    }

    fn put_trades(&self, symbol: &str, trades: Vec<Trade>) -> Arc<Vec<Trade>> {
        self.trades
            .write()
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(trades))
            .clone()
    }
}
