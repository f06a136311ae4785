//! HTTP API.

mod orders;
mod products;
mod users;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use surrealdb::Connection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(users::router())
        .merge(orders::router())
        .merge(products::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
