//! Account API: registration, login, favorites, cart and embedded orders.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};
use surrealdb::Connection;

use crate::state::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/api/login", post(handler::login::<C>))
        .nest("/api/users", routes())
}

fn routes<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(handler::list::<C>).post(handler::register::<C>))
        .route("/{id}", get(handler::get_by_id::<C>))
        .route(
            "/{id}/favorites",
            get(handler::favorites::<C>).post(handler::add_favorite::<C>),
        )
        .route(
            "/{id}/favorites/{product_id}",
            delete(handler::remove_favorite::<C>),
        )
        .route(
            "/{id}/cart",
            get(handler::cart::<C>)
                .post(handler::add_to_cart::<C>)
                .put(handler::replace_cart::<C>),
        )
        .route("/{id}/cart/{product_id}", delete(handler::remove_from_cart::<C>))
        .route(
            "/{id}/orders",
            get(handler::orders::<C>).post(handler::place_order::<C>),
        )
}
