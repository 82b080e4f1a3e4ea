// src/connectors/binance.rs
use crate::config::AppConfig;
use crate::connectors::messages::{AccountInfo, Ticker24h, TickerPrice};
use crate::connectors::traits::ExchangeClient;
use crate::error::{FolioError, FolioResult};
use crate::types::{Balance, Order, Trade};
use crate::utils::precision::parse_decimal;
use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

type HmacSha256 = Hmac<Sha256>;

const SERVICE: &str = "binance";

/// HMAC-SHA256 of `query` keyed by `secret`, hex encoded.
pub fn sign_query(secret: &str, query: &str) -> FolioResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| FolioError::Signing(e.to_string()))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn parse_price(raw: &str, field: &str, symbol: &str) -> FolioResult<Decimal> {
    parse_decimal(raw).ok_or_else(|| {
        FolioError::decode(SERVICE, format!("invalid {} {:?} for {}", field, raw, symbol))
    })
}

pub struct BinanceClient {
    api_key: String,
    secret_key: String,
    http_client: Client,
    base_rest_url: String,
}

impl BinanceClient {
    pub fn new(
        api_key: String,
        secret_key: String,
        base_rest_url: impl Into<String>,
        timeout: Duration,
    ) -> FolioResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FolioError::transport(SERVICE, e))?;

        Ok(Self {
            api_key,
            secret_key,
            http_client,
            base_rest_url: base_rest_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> FolioResult<Self> {
        Self::new(
            config.binance_api_key.clone(),
            config.binance_secret_key.clone(),
            config.binance_base_url.clone(),
            config.http_timeout(),
        )
    }

    fn sign_and_build_query(&self, params: Vec<(&str, String)>) -> FolioResult<String> {
        let mut params = params;
        let timestamp = Utc::now().timestamp_millis().to_string();
        params.push(("timestamp", timestamp));

        let query_string =
            serde_urlencoded::to_string(&params).map_err(|e| FolioError::Signing(e.to_string()))?;
        let signature = sign_query(&self.secret_key, &query_string)?;

        Ok(format!("{}&signature={}", query_string, signature))
    }

    async fn send_signed_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> FolioResult<T> {
        let full_query = self.sign_and_build_query(params)?;
        let url = format!("{}{}?{}", self.base_rest_url, endpoint, full_query);

        let started = Instant::now();
        let response = self
            .http_client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| FolioError::transport(SERVICE, e))?;
        debug!(
            "{} answered in {:.3}s",
            endpoint,
            started.elapsed().as_secs_f64()
        );

        Self::read_json(endpoint, response).await
    }

    async fn send_public_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> FolioResult<T> {
        let url = format!("{}{}", self.base_rest_url, endpoint);

        let started = Instant::now();
        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| FolioError::transport(SERVICE, e))?;
        debug!(
            "{} answered in {:.3}s",
            endpoint,
            started.elapsed().as_secs_f64()
        );

        Self::read_json(endpoint, response).await
    }

    async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> FolioResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FolioError::transport(SERVICE, e))?;

        if !status.is_success() {
            return Err(FolioError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Error decoding {} response: {}", endpoint, e);
            FolioError::decode(SERVICE, e)
        })
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    #[instrument(skip(self))]
    async fn list_filled_orders(&self, symbol: &str, limit: u32) -> FolioResult<Vec<Order>> {
        let params = vec![("symbol", symbol.to_string()), ("limit", limit.to_string())];
        let orders: Vec<Order> = self.send_signed_request("/allOrders", params).await?;

        Ok(orders.into_iter().filter(Order::is_filled).collect())
    }

    #[instrument(skip(self))]
    async fn list_trades(&self, symbol: &str, limit: u32) -> FolioResult<Vec<Trade>> {
        let params = vec![("symbol", symbol.to_string()), ("limit", limit.to_string())];
        self.send_signed_request("/myTrades", params).await
    }

    #[instrument(skip(self))]
    async fn get_account_balances(&self) -> FolioResult<Vec<Balance>> {
        let params = vec![("omitZeroBalances", "true".to_string())];
        let info: AccountInfo = self.send_signed_request("/account", params).await?;
        debug!(
            "{} account (canTrade={}) updated at {} with {} balances",
            info.account_type,
            info.can_trade,
            info.update_time,
            info.balances.len()
        );

        Ok(info.into_balances())
    }

    #[instrument(skip(self))]
    async fn get_current_price(&self, symbol: &str) -> FolioResult<Decimal> {
        let ticker: TickerPrice = self
            .send_public_request("/ticker/price", vec![("symbol", symbol.to_string())])
            .await?;

        parse_price(&ticker.price, "price", &ticker.symbol)
    }

    #[instrument(skip(self))]
    async fn get_24h_change(&self, symbol: &str) -> FolioResult<(Decimal, Decimal)> {
        let stats: Ticker24h = self
            .send_public_request("/ticker/24hr", vec![("symbol", symbol.to_string())])
            .await?;

        let price_change = parse_price(&stats.price_change, "priceChange", &stats.symbol)?;
        let last_price = parse_price(&stats.last_price, "lastPrice", &stats.symbol)?;
        Ok((price_change, last_price))
    }
}
