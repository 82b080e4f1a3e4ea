// src/core/engine.rs
use crate::connectors::traits::{ExchangeClient, MarketDataClient};
use crate::core::cache::{ResultCache, ViewKind};
use crate::core::stats::{
    average_buy_price, compute_trade_stats, daily_pnl, realized_pnl, unrealized_pnl,
};
use crate::error::{FolioError, FolioResult};
use crate::types::{
    is_fiat_like, Allocation, PairSummary, PortfolioRecord, PortfolioTotals, PriceQuote, Trade,
};
use crate::utils::precision::percent_of;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Market-data instrument name, e.g. `BTC-USDT`.
pub fn data_instrument(asset: &str, quote_currency: &str) -> String {
    format!("{}-{}", asset, quote_currency)
}

/// Exchange symbol name, e.g. `BTCUSDT`.
pub fn exchange_symbol(asset: &str, quote_currency: &str) -> String {
    format!("{}{}", asset, quote_currency)
}

/// Splits `BASE-QUOTE` into its two legs.
pub fn split_pair(pair: &str) -> FolioResult<(String, String)> {
    match pair.trim().split('-').collect::<Vec<_>>().as_slice() {
        [base, quote] if !base.is_empty() && !quote.is_empty() => {
            Ok((base.to_string(), quote.to_string()))
        }
        _ => Err(FolioError::InvalidInput(format!(
            "pair must look like BASE-QUOTE, got {:?}",
            pair
        ))),
    }
}

/// Totals over a wallet view. Allocation is relative to the priced value.
pub fn summarize_totals(quote_currency: &str, records: &[PortfolioRecord]) -> PortfolioTotals {
    let (fiat, priced): (Vec<&PortfolioRecord>, Vec<&PortfolioRecord>) = records
        .iter()
        .partition(|r| is_fiat_like(&r.asset, quote_currency));

    let priced_value: Decimal = priced.iter().map(|r| r.quote_value).sum();
    let fiat_value: Decimal = fiat.iter().map(|r| r.free).sum();

    let allocations = priced
        .iter()
        .map(|r| Allocation {
            asset: r.asset.clone(),
            quote_value: r.quote_value,
            percent: percent_of(r.quote_value, priced_value),
        })
        .collect();

    PortfolioTotals {
        quote_currency: quote_currency.to_string(),
        priced_value,
        fiat_value,
        total_value: priced_value + fiat_value,
        allocations,
    }
}

/// Merges balances, spot quotes and trade history into per-asset records.
pub struct PortfolioEngine {
    exchange: Arc<dyn ExchangeClient>,
    market_data: Arc<dyn MarketDataClient>,
    cache: Arc<dyn ResultCache>,
    trade_history_limit: u32,
}

impl PortfolioEngine {
    pub fn new(
        exchange: Arc<dyn ExchangeClient>,
        market_data: Arc<dyn MarketDataClient>,
        cache: Arc<dyn ResultCache>,
        trade_history_limit: u32,
    ) -> Self {
        Self {
            exchange,
            market_data,
            cache,
            trade_history_limit,
        }
    }

    pub fn exchange(&self) -> &dyn ExchangeClient {
        self.exchange.as_ref()
    }

    /// Holdings valued in `currency`, largest free quantity first.
    pub async fn wallet_view(&self, currency: &str) -> FolioResult<Arc<Vec<PortfolioRecord>>> {
        self.view(ViewKind::Wallet, currency).await
    }

    /// Like [`wallet_view`](Self::wallet_view), with trade statistics on
    /// every priced asset. Assets whose trade history cannot be fetched are
    /// left out.
    pub async fn portfolio_view(&self, currency: &str) -> FolioResult<Arc<Vec<PortfolioRecord>>> {
        self.view(ViewKind::Portfolio, currency).await
    }

    pub async fn totals(&self, currency: &str) -> FolioResult<PortfolioTotals> {
        let records = self.wallet_view(currency).await?;
        Ok(summarize_totals(currency, &records))
    }

    async fn view(&self, kind: ViewKind, currency: &str) -> FolioResult<Arc<Vec<PortfolioRecord>>> {
        if let Some(cached) = self.cache.get_view(kind, currency) {
            info!("{:?} view for {}: serving from memory", kind, currency);
            return Ok(cached);
        }

        let balances = self.exchange.get_account_balances().await?;

        let instruments: Vec<String> = balances
            .iter()
            .filter(|b| !is_fiat_like(&b.asset, currency))
            .map(|b| data_instrument(&b.asset, currency))
            .collect();
        let quotes = self.market_data.latest_quotes(&instruments).await?;

        let mut records = Vec::with_capacity(balances.len());
        for balance in &balances {
            if is_fiat_like(&balance.asset, currency) {
                records.push(PortfolioRecord::fiat(balance));
                continue;
            }

            let instrument = data_instrument(&balance.asset, currency);
            let quote = quotes.get(&instrument).cloned().unwrap_or_else(|| {
                warn!("{}: no market data, valuing at zero", instrument);
                PriceQuote {
                    instrument: instrument.clone(),
                    ..Default::default()
                }
            });
            let mut record = PortfolioRecord::priced(balance, currency, &quote);

            if kind == ViewKind::Portfolio {
                let symbol = exchange_symbol(&balance.asset, currency);
                match self.trade_history(&symbol).await {
                    Ok(trades) => record.trade_stats = Some(compute_trade_stats(&trades)),
                    Err(e) => {
                        error!("{}: error fetching trades: {}", symbol, e);
                        continue;
                    }
                }
            }

            records.push(record);
        }

        // stable: equal holdings keep snapshot order
        records.sort_by(|a, b| b.free.cmp(&a.free));

        Ok(self.cache.put_view(kind, currency, records))
    }

    async fn trade_history(&self, symbol: &str) -> FolioResult<Arc<Vec<Trade>>> {
        if let Some(trades) = self.cache.get_trades(symbol) {
            info!("{}: fetching trades from memory", symbol);
            return Ok(trades);
        }

        warn!("{}: trades not in memory, fetching from exchange", symbol);
        let trades = self
            .exchange
            .list_trades(symbol, self.trade_history_limit)
            .await?;
        Ok(self.cache.put_trades(symbol, trades))
    }

    /// Valuation and PNL for one `BASE-QUOTE` pair, with its share of the
    /// whole portfolio valued in `currency`.
    pub async fn pair_summary(
        &self,
        pair: &str,
        limit: u32,
        currency: &str,
    ) -> FolioResult<PairSummary> {
        let (asset, quote_currency) = split_pair(pair)?;
        let symbol = exchange_symbol(&asset, &quote_currency);

        let (current_price, free_balance, trades, (price_change, last_price)) = tokio::try_join!(
            self.exchange.get_current_price(&symbol),
            self.exchange.get_balance(&asset),
            self.exchange.list_trades(&symbol, limit),
            self.exchange.get_24h_change(&symbol),
        )?;

        let trade_stats = compute_trade_stats(&trades);
        let avg_buy_price = average_buy_price(&trade_stats);
        let total_value = free_balance * current_price;
        let totals = self.totals(currency).await?;

        Ok(PairSummary {
            symbol,
            asset,
            quote_currency,
            current_price,
            last_price,
            free_balance,
            total_value,
            average_buy_price: avg_buy_price,
            daily_pnl: daily_pnl(free_balance, price_change),
            unrealized_pnl: unrealized_pnl(current_price, avg_buy_price, free_balance),
            realized_pnl: realized_pnl(&trades, avg_buy_price),
            total_portfolio_value: totals.priced_value,
            allocation_percent: percent_of(total_value, totals.priced_value),
            trade_stats,
        })
    }
}
