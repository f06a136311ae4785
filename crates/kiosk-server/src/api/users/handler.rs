//! Account API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use kiosk_core::models::user::{CreateUser, EmbeddedOrder, User};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CartUpdate {
    #[serde(default)]
    pub cart: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrder {
    pub products: Vec<String>,
    pub total: i64,
}

/// POST /api/users
pub async fn register<C: Connection>(
    State(state): State<AppState<C>>,
    Json(payload): Json<CreateUser>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = state.accounts().register(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// GET /api/users
pub async fn list<C: Connection>(State(state): State<AppState<C>>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.accounts().list().await?))
}

/// GET /api/users/{id}
pub async fn get_by_id<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.accounts().get(&id).await?))
}

/// POST /api/login
pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .accounts()
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(LoginResponse { user }))
}

/// GET /api/users/{id}/favorites
pub async fn favorites<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.accounts().favorites(&id).await?))
}

/// POST /api/users/{id}/favorites
pub async fn add_favorite<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductRef>,
) -> ApiResult<Json<Vec<String>>> {
    let accounts = state.accounts();
    accounts.add_favorite(&id, &payload.product_id).await?;
    Ok(Json(accounts.favorites(&id).await?))
}

/// DELETE /api/users/{id}/favorites/{product_id}
pub async fn remove_favorite<C: Connection>(
    State(state): State<AppState<C>>,
    Path((id, product_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.accounts().remove_favorite(&id, &product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{id}/cart
pub async fn cart<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.accounts().cart(&id).await?))
}

/// POST /api/users/{id}/cart
pub async fn add_to_cart<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductRef>,
) -> ApiResult<Json<Vec<String>>> {
    let accounts = state.accounts();
    accounts.add_to_cart(&id, &payload.product_id).await?;
    Ok(Json(accounts.cart(&id).await?))
}

/// PUT /api/users/{id}/cart
pub async fn replace_cart<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Json(payload): Json<CartUpdate>,
) -> ApiResult<Json<Vec<String>>> {
    let accounts = state.accounts();
    accounts.replace_cart(&id, payload.cart).await?;
    Ok(Json(accounts.cart(&id).await?))
}

/// DELETE /api/users/{id}/cart/{product_id}
pub async fn remove_from_cart<C: Connection>(
    State(state): State<AppState<C>>,
    Path((id, product_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.accounts().remove_from_cart(&id, &product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{id}/orders
pub async fn orders<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<EmbeddedOrder>>> {
    Ok(Json(state.accounts().orders(&id).await?))
}

/// POST /api/users/{id}/orders
pub async fn place_order<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Json(payload): Json<PlaceOrder>,
) -> ApiResult<(StatusCode, Json<EmbeddedOrder>)> {
    let order = state
        .accounts()
        .place_order(&id, payload.products, payload.total)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}
