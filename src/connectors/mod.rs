// src/connectors/mod.rs
pub mod binance;
pub mod ccdata;
pub mod messages;
pub mod traits;
