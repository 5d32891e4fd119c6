use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/home", get(index))
        .route("/home/", get(index))
}

#[derive(Serialize)]
struct Index {
    service: String,
    version: &'static str,
    areas: [&'static str; 3],
}

async fn index(State(state): State<AppState>) -> Json<Index> {
    Json(Index {
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        areas: ["accounts", "matters", "negotiations"],
    })
}
