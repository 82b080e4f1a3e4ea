// src/core/stats.rs
//! Trade statistics and PNL arithmetic.
//!
//! Cost basis is the plain sum of per-trade buy prices divided by the number
//! of buys, not a quantity-weighted average.
use crate::types::{Side, Trade, TradePoint, TradeSideStats, TradeStats};
use crate::utils::precision::ratio;
use rust_decimal::Decimal;

/// Reduces a fill list (oldest first) into buy and sell aggregates.
/// Never fails: an empty side yields zeroed stats.
pub fn compute_trade_stats(trades: &[Trade]) -> TradeStats {
    let (buys, sells): (Vec<&Trade>, Vec<&Trade>) =
        trades.iter().partition(|t| t.side() == Side::Buy);
    let maker_count = trades.iter().filter(|t| t.is_maker).count() as u64;

    TradeStats {
        buy: side_stats(&buys),
        sell: side_stats(&sells),
        maker_count,
        taker_count: trades.len() as u64 - maker_count,
    }
}

fn side_stats(trades: &[&Trade]) -> TradeSideStats {
    let Some(first) = trades.first() else {
        return TradeSideStats::default();
    };

    let seed = point(first);
    let mut stats = TradeSideStats {
        highest: seed,
        lowest: seed,
        quantity: trades.len() as u64,
        ..Default::default()
    };

    for trade in trades {
        let current = point(trade);
        if current.price > stats.highest.price {
            stats.highest = current;
        }
        if current.price < stats.lowest.price {
            stats.lowest = current;
        }
        stats.last = current;
        stats.total_price += trade.price;
    }

    stats
}

fn point(trade: &Trade) -> TradePoint {
    TradePoint {
        price: trade.price,
        timestamp: trade.time,
    }
}

/// Sum of buy prices over buy count; zero without buys.
pub fn average_buy_price(stats: &TradeStats) -> Decimal {
    ratio(stats.buy.total_price, Decimal::from(stats.buy.quantity))
}

/// Σ over sells of `(price - avg_buy_price) * qty`.
pub fn realized_pnl(trades: &[Trade], avg_buy_price: Decimal) -> Decimal {
    trades
        .iter()
        .filter(|t| t.side() == Side::Sell)
        .map(|t| (t.price - avg_buy_price) * t.qty)
        .sum()
}

pub fn unrealized_pnl(current_price: Decimal, avg_buy_price: Decimal, free: Decimal) -> Decimal {
    (current_price - avg_buy_price) * free
}

pub fn daily_pnl(free: Decimal, price_change: Decimal) -> Decimal {
    free * price_change
}
