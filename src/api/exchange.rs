// src/api/exchange.rs
//! Pass-through endpoints for raw exchange data

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use super::{bad_request, non_empty, parse_limit, AppState, GENERIC_ERROR, INVALID_INPUT};

/// Query parameters for `/orders` and `/trades`
#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    pub symbol: Option<String>,
    /// [`super::DEFAULT_LIMIT`] when blank
    pub limit: Option<String>,
}

impl SymbolQuery {
    fn validate(&self) -> Option<(String, u32)> {
        let symbol = non_empty(self.symbol.as_deref())?;
        let limit = parse_limit(self.limit.as_deref())?;
        Some((symbol, limit))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/trades", get(list_trades))
        .route("/account", get(account))
}

/// Filled orders for a symbol
async fn list_orders(State(state): State<AppState>, Query(params): Query<SymbolQuery>) -> Response {
    let Some((symbol, limit)) = params.validate() else {
        return bad_request(INVALID_INPUT);
    };

    match state.engine.exchange().list_filled_orders(&symbol, limit).await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => {
            error!("Error fetching orders for {}: {}", symbol, e);
            bad_request(GENERIC_ERROR)
        }
    }
}

/// Account fills for a symbol
async fn list_trades(State(state): State<AppState>, Query(params): Query<SymbolQuery>) -> Response {
    let Some((symbol, limit)) = params.validate() else {
        return bad_request(INVALID_INPUT);
    };

    match state.engine.exchange().list_trades(&symbol, limit).await {
        Ok(trades) => Json(trades).into_response(),
        Err(e) => {
            error!("Error fetching trades for {}: {}", symbol, e);
            bad_request(GENERIC_ERROR)
        }
    }
}

/// Raw balances from the account snapshot
async fn account(State(state): State<AppState>) -> Response {
    match state.engine.exchange().get_account_balances().await {
        Ok(balances) => Json(balances).into_response(),
        Err(e) => {
            error!("Error fetching account balances: {}", e);
            bad_request(GENERIC_ERROR)
        }
    }
}
