// src/config.rs

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub binance_api_key: String,
    pub binance_secret_key: String,
    pub cc_api_key: String,
    pub binance_base_url: String,
    pub ccdata_base_url: String,
    pub ccdata_market: String,
    pub quote_currency: String,
    pub trade_history_limit: u32,
    pub http_timeout_secs: u64,
    pub server_port: u16,
    // Rolling log files are written here when set
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Defaults, then an optional `Settings` file, then the process
    /// environment (`BINANCE_API_KEY`, `SERVER_PORT`, ...).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::default())
    }

    // Env values stay strings: credentials such as `00123` or `1e5` must
    // reach the signer untouched. Numeric fields are converted on
    // deserialization.
    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("Settings").required(false))
            .add_source(env);

        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("binance_api_key", "")?
            .set_default("binance_secret_key", "")?
            .set_default("cc_api_key", "")?
            .set_default("binance_base_url", "https://api.binance.com/api/v3")?
            .set_default("ccdata_base_url", "https://data-api.ccdata.io")?
            .set_default("ccdata_market", "binance")?
            .set_default("quote_currency", "USDT")?
            .set_default("trade_history_limit", 1000)?
            .set_default("http_timeout_secs", 30)?
            .set_default("server_port", 42000)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.quote_currency = config.quote_currency.trim().to_uppercase();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binance_api_key.trim().is_empty() || self.binance_secret_key.trim().is_empty() {
            return Err(ConfigError::NotFound(
                "BINANCE_API_KEY and BINANCE_SECRET_KEY are required".to_string(),
            ));
        }
        if self.quote_currency.trim().is_empty() {
            return Err(ConfigError::Message("QUOTE_CURRENCY must not be empty".to_string()));
        }
        if !(1..=1000).contains(&self.trade_history_limit) {
            return Err(ConfigError::Message(format!(
                "TRADE_HISTORY_LIMIT must be between 1 and 1000, got {}",
                self.trade_history_limit
            )));
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
