// src/connectors/ccdata.rs
use crate::config::AppConfig;
use crate::connectors::messages::CcDataTickResponse;
use crate::connectors::traits::MarketDataClient;
use crate::error::{FolioError, FolioResult};
use crate::types::PriceQuote;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

const SERVICE: &str = "ccdata";
const TICK_ENDPOINT: &str = "/spot/v1/latest/tick";
const TICK_GROUPS: &str = "ID,VALUE,CURRENT_DAY";

/// Unsigned client for the CCData spot tick endpoint. The API key travels
/// as a query parameter.
pub struct CcDataClient {
    http_client: Client,
    base_url: String,
    market: String,
    api_key: String,
}

impl CcDataClient {
    pub fn new(
        base_url: impl Into<String>,
        market: impl Into<String>,
        api_key: String,
        timeout: Duration,
    ) -> FolioResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FolioError::transport(SERVICE, e))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            market: market.into(),
            api_key,
        })
    }

    pub fn from_config(config: &AppConfig) -> FolioResult<Self> {
        Self::new(
            config.ccdata_base_url.clone(),
            config.ccdata_market.clone(),
            config.cc_api_key.clone(),
            config.http_timeout(),
        )
    }

    fn tick_url(&self, instruments: &[String]) -> FolioResult<Url> {
        let joined = instruments.join(",");
        Url::parse_with_params(
            &format!("{}{}", self.base_url, TICK_ENDPOINT),
            &[
                ("market", self.market.as_str()),
                ("instruments", joined.as_str()),
                ("apply_mapping", "false"),
                ("groups", TICK_GROUPS),
                ("api_key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| FolioError::InvalidInput(format!("bad market data url: {}", e)))
    }
}

#[async_trait]
impl MarketDataClient for CcDataClient {
    #[instrument(skip(self), fields(count = instruments.len()))]
    async fn latest_quotes(
        &self,
        instruments: &[String],
    ) -> FolioResult<HashMap<String, PriceQuote>> {
        if instruments.is_empty() {
            return Ok(HashMap::new());
        }

        let url = self.tick_url(instruments)?;
        let started = Instant::now();
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FolioError::transport(SERVICE, e))?;
        debug!(
            "{} answered in {:.3}s",
            TICK_ENDPOINT,
            started.elapsed().as_secs_f64()
        );

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FolioError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FolioError::transport(SERVICE, e))?;
        let payload: CcDataTickResponse =
            serde_json::from_str(&body).map_err(|e| FolioError::decode(SERVICE, e))?;

        Ok(payload
            .data
            .into_iter()
            .map(|(instrument, tick)| (instrument.clone(), tick.into_quote(instrument)))
            .collect())
    }
}
