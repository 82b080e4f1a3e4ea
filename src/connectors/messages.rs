// src/connectors/messages.rs
use crate::types::{Balance, PriceQuote};
use crate::utils::precision::parse_decimal;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

// --- Binance REST payloads ---

/// Balance entry of `GET /account`. Quantities arrive as strings.
#[derive(Debug, Deserialize)]
pub struct RawBalance {
    pub asset: String,
    pub free: String,
    pub locked: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub update_time: i64,
    pub balances: Vec<RawBalance>,
}

impl AccountInfo {
    /// Entries whose free quantity does not parse are dropped; an
    /// unparsable locked quantity counts as zero.
    pub fn into_balances(self) -> Vec<Balance> {
        self.balances
            .into_iter()
            .filter_map(|raw| {
                let Some(free) = parse_decimal(&raw.free) else {
                    debug!("Skipping {}: unparsable free balance {:?}", raw.asset, raw.free);
                    return None;
                };
                let locked = parse_decimal(&raw.locked).unwrap_or(Decimal::ZERO);
                Some(Balance {
                    asset: raw.asset,
                    free,
                    locked,
                })
            })
            .collect()
    }
}

/// `GET /ticker/price`
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// `GET /ticker/24hr`, only the fields we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub price_change: String,
    pub last_price: String,
}

// --- CCData REST payloads ---

/// `GET /spot/v1/latest/tick`
#[derive(Debug, Deserialize)]
pub struct CcDataTickResponse {
    #[serde(rename = "Data", default)]
    pub data: HashMap<String, CcDataTick>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CcDataTick {
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub price_flag: String,
    #[serde(default)]
    pub current_day_change: Decimal,
    #[serde(default)]
    pub current_day_change_percentage: Decimal,
}

impl CcDataTick {
    pub fn into_quote(self, instrument: String) -> PriceQuote {
        PriceQuote {
            instrument,
            price: self.price,
            change_value: self.current_day_change,
            change_percent: self.current_day_change_percentage,
            flag: self.price_flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn account_snapshot_skips_unparsable_free_and_zeroes_bad_locked() {
        let payload = r#"{
            "accountType": "SPOT",
            "canTrade": true,
            "updateTime": 1700000000000,
            "balances": [
                {"asset": "BTC", "free": "0.50000000", "locked": "0.10000000"},
                {"asset": "ETH", "free": "not-a-number", "locked": "1.0"},
                {"asset": "BNB", "free": "3.2", "locked": ""}
            ]
        }"#;

        let info: AccountInfo = serde_json::from_str(payload).unwrap();
        let balances = info.into_balances();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].asset, "BTC");
        assert_eq!(balances[0].free, dec!(0.5));
        assert_eq!(balances[0].locked, dec!(0.1));
        assert_eq!(balances[1].asset, "BNB");
        assert_eq!(balances[1].free, dec!(3.2));
        assert_eq!(balances[1].locked, Decimal::ZERO);
    }

    #[test]
    fn ccdata_tick_decodes_numeric_fields() {
        let payload = r#"{
            "Data": {
                "BTC-USDT": {
                    "TYPE": "952",
                    "MARKET": "binance",
                    "INSTRUMENT": "BTC-USDT",
                    "CCSEQ": 123,
                    "PRICE": 50000.5,
                    "PRICE_FLAG": "UP",
                    "PRICE_LAST_UPDATE_TS": 1700000000,
                    "CURRENT_DAY_CHANGE": -120.25,
                    "CURRENT_DAY_CHANGE_PERCENTAGE": -0.24
                }
            },
            "Err": {}
        }"#;

        let resp: CcDataTickResponse = serde_json::from_str(payload).unwrap();
        let tick = resp.data.into_iter().next().unwrap().1;
        let quote = tick.into_quote("BTC-USDT".to_string());

        assert_eq!(quote.price, dec!(50000.5));
        assert_eq!(quote.flag, "UP");
        assert_eq!(quote.change_value, dec!(-120.25));
        assert_eq!(quote.change_percent, dec!(-0.24));
    }
}
