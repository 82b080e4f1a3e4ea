// src/api/dashboard.rs
//! Dashboard page. The table is filled client-side from `/portfolio`.

use axum::{response::Html, routing::get, Router};

use super::AppState;

const COLUMNS: [&str; 5] = ["Asset", "Price", "Total Value(TV)", "PnL", "Change"];

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    let header: String = COLUMNS
        .iter()
        .map(|name| format!("<th>{} <i class=\"fa fa-caret-up\"></i></th>", name))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>coinfolio</title></head>\n\
         <body>\n<table id=\"portfolio\">\n<thead><tr>{}</tr></thead>\n<tbody></tbody>\n</table>\n\
         </body>\n</html>\n",
        header
    )
}
