//! Standalone order API.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};
use surrealdb::Connection;

use crate::state::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new().nest("/api/orders", routes())
}

fn routes<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(handler::list::<C>).post(handler::create::<C>))
        .route(
            "/{id}",
            get(handler::get_by_id::<C>).delete(handler::cancel::<C>),
        )
        .route("/{id}/status", patch(handler::update_status::<C>))
        .route("/{id}/completed", patch(handler::toggle_completed::<C>))
}
