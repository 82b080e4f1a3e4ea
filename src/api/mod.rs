// src/api/mod.rs
//! HTTP surface: JSON endpoints over the exchange client and the
//! portfolio engine, plus the dashboard page.

mod dashboard;
mod exchange;
mod portfolio;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::engine::PortfolioEngine;

/// Shown to clients for any upstream failure; details stay in the logs.
pub const GENERIC_ERROR: &str = "error fetching data or pair doesn't exist for this user";
pub const INVALID_INPUT: &str = "strange input";
/// Row limit for `/orders`, `/trades` and `/portfolio?pair=` when the
/// caller leaves `limit` blank.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PortfolioEngine>,
    pub default_currency: String,
}

/// `{Data, Err}` envelope used by the portfolio endpoints and all 400s.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "Data")]
    pub data: Option<T>,
    #[serde(rename = "Err")]
    pub err: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            err: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            data: None,
            err: Some(message.into()),
        }
    }
}

pub(crate) fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::fail(message))).into_response()
}

/// Empty or missing means [`DEFAULT_LIMIT`]; anything else must parse.
pub(crate) fn parse_limit(raw: Option<&str>) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(DEFAULT_LIMIT),
        Some(value) => value.parse().ok(),
    }
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build the full router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(exchange::routes())
        .merge(portfolio::routes())
        .merge(dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
