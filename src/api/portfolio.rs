// src/api/portfolio.rs
//! Wallet and portfolio valuation endpoints

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::core::engine::split_pair;

use super::{
    bad_request, non_empty, parse_limit, ApiResponse, AppState, GENERIC_ERROR, INVALID_INPUT,
};

#[derive(Debug, Deserialize)]
pub struct CurrencyQuery {
    pub currency: Option<String>,
}

/// Query parameters for `/portfolio`. With `pair` set the response is the
/// single-pair summary instead of the per-asset list.
#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub pair: Option<String>,
    pub limit: Option<String>,
    pub currency: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet", get(wallet))
        .route("/portfolio", get(portfolio))
        .route("/portfolio/totals", get(totals))
}

fn currency_or_default(state: &AppState, raw: Option<&str>) -> String {
    non_empty(raw)
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| state.default_currency.clone())
}

async fn wallet(State(state): State<AppState>, Query(params): Query<CurrencyQuery>) -> Response {
    let currency = currency_or_default(&state, params.currency.as_deref());

    match state.engine.wallet_view(&currency).await {
        Ok(records) => Json(ApiResponse::ok(records.as_ref().clone())).into_response(),
        Err(e) => {
            error!("Error building wallet view for {}: {}", currency, e);
            bad_request(GENERIC_ERROR)
        }
    }
}

async fn portfolio(
    State(state): State<AppState>,
    Query(params): Query<PortfolioQuery>,
) -> Response {
    let currency = currency_or_default(&state, params.currency.as_deref());

    let Some(pair) = non_empty(params.pair.as_deref()) else {
        return match state.engine.portfolio_view(&currency).await {
            Ok(records) => Json(ApiResponse::ok(records.as_ref().clone())).into_response(),
            Err(e) => {
                error!("Error building portfolio view for {}: {}", currency, e);
                bad_request(GENERIC_ERROR)
            }
        };
    };

    let Some(limit) = parse_limit(params.limit.as_deref()) else {
        return bad_request(INVALID_INPUT);
    };
    if split_pair(&pair).is_err() {
        return bad_request(INVALID_INPUT);
    }

    info!("Summarizing {} (limit {}, currency {})", pair, limit, currency);
    match state.engine.pair_summary(&pair, limit, &currency).await {
        Ok(summary) => Json(ApiResponse::ok(summary)).into_response(),
        Err(e) => {
            error!("Error summarizing {}: {}", pair, e);
            bad_request(GENERIC_ERROR)
        }
    }
}

async fn totals(State(state): State<AppState>, Query(params): Query<CurrencyQuery>) -> Response {
    let currency = currency_or_default(&state, params.currency.as_deref());

    match state.engine.totals(&currency).await {
        Ok(totals) => Json(ApiResponse::ok(totals)).into_response(),
        Err(e) => {
            error!("Error computing totals for {}: {}", currency, e);
            bad_request(GENERIC_ERROR)
        }
    }
}
