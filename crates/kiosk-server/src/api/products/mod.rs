//! Catalog API.

mod handler;

use axum::{Router, routing::get};
use surrealdb::Connection;

use crate::state::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new().route(
        "/api/products",
        get(handler::list::<C>).post(handler::create::<C>),
    )
}
