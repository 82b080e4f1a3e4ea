// src/types.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Assets valued at face value and never priced through market data.
pub const FIAT_ASSETS: [&str; 3] = ["USDT", "GBP", "USD"];

/// True for assets that skip price lookups and trade statistics when
/// valuing a portfolio in `quote_currency`.
pub fn is_fiat_like(asset: &str, quote_currency: &str) -> bool {
    FIAT_ASSETS.contains(&asset) || asset == quote_currency
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

/// Order as returned by `GET /allOrders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    #[serde(default)]
    pub client_order_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub cummulative_quote_qty: Decimal,
    pub status: String,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(rename = "type", default)]
    pub order_type: String,
    pub side: String,
    pub time: i64,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub is_working: bool,
}

impl Order {
    pub fn is_filled(&self) -> bool {
        self.status == "FILLED"
    }
}

/// Account fill as returned by `GET /myTrades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub symbol: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub order_list_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub quote_qty: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    #[serde(default)]
    pub commission_asset: String,
    /// Epoch millis.
    pub time: i64,
    pub is_buyer: bool,
    pub is_maker: bool,
    #[serde(default)]
    pub is_best_match: bool,
}

impl Trade {
    pub fn side(&self) -> Side {
        if self.is_buyer {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

/// Spot quote for one `BASE-QUOTE` instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub instrument: String,
    pub price: Decimal,
    pub change_value: Decimal,
    pub change_percent: Decimal,
    pub flag: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePoint {
    pub price: Decimal,
    /// Epoch millis, 0 when the side has no trades.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeSideStats {
    pub last: TradePoint,
    pub highest: TradePoint,
    pub lowest: TradePoint,
    /// Number of trades on this side, not traded volume.
    pub quantity: u64,
    /// Sum of per-trade prices on this side.
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub buy: TradeSideStats,
    pub sell: TradeSideStats,
    pub maker_count: u64,
    pub taker_count: u64,
}

/// One row of the wallet or portfolio view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    pub asset: String,
    pub quote_asset: String,
    pub free: Decimal,
    pub locked: Decimal,
    pub price: Decimal,
    pub price_flag: String,
    pub change_value: Decimal,
    pub change_percent: Decimal,
    pub quote_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_stats: Option<TradeStats>,
}

impl PortfolioRecord {
    /// Fiat rows carry asset and free quantity only.
    pub fn fiat(balance: &Balance) -> Self {
        Self {
            asset: balance.asset.clone(),
            free: balance.free,
            ..Default::default()
        }
    }

    pub fn priced(balance: &Balance, quote_currency: &str, quote: &PriceQuote) -> Self {
        Self {
            asset: balance.asset.clone(),
            quote_asset: quote_currency.to_string(),
            free: balance.free,
            locked: balance.locked,
            price: quote.price,
            price_flag: quote.flag.clone(),
            change_value: quote.change_value,
            change_percent: quote.change_percent,
            quote_value: balance.free * quote.price,
            trade_stats: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub asset: String,
    pub quote_value: Decimal,
    pub percent: Decimal,
}

/// Whole-portfolio value in one quote currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub quote_currency: String,
    /// Sum of quote values of priced assets. Allocation percentages are
    /// relative to this figure.
    pub priced_value: Decimal,
    /// Sum of free balances of fiat-like assets.
    pub fiat_value: Decimal,
    pub total_value: Decimal,
    pub allocations: Vec<Allocation>,
}

/// Valuation and PNL figures for a single `BASE-QUOTE` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub symbol: String,
    pub asset: String,
    pub quote_currency: String,
    pub current_price: Decimal,
    pub last_price: Decimal,
    pub free_balance: Decimal,
    pub total_value: Decimal,
    pub trade_stats: TradeStats,
    pub average_buy_price: Decimal,
    pub daily_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub total_portfolio_value: Decimal,
    pub allocation_percent: Decimal,
}
