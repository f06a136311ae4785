//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use kiosk_core::models::order::{Order, OrderLine};
use kiosk_service::CreateOrderInput;
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub products: Vec<OrderLine>,
    pub total_price: Option<i64>,
    pub status: Option<String>,
}

impl From<CreateOrderRequest> for CreateOrderInput {
    fn from(req: CreateOrderRequest) -> Self {
        CreateOrderInput {
            user_id: req.user_id,
            products: req.products,
            total_price: req.total_price,
            status: req.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /api/orders
pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    Json(payload): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = state.orders().create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// GET /api/orders?userId=
pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = match query.user_id.as_deref() {
        Some(user_id) => state.orders().get_user_orders(user_id).await?,
        None => state.orders().list().await?,
    };
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders().get(&id).await?))
}

/// DELETE /api/orders/{id}
pub async fn cancel<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.orders().cancel(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/orders/{id}/status
pub async fn update_status<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> ApiResult<Json<Order>> {
    let orders = state.orders();
    orders.update_status(&id, &payload.status).await?;
    Ok(Json(orders.get(&id).await?))
}

/// PATCH /api/orders/{id}/completed
pub async fn toggle_completed<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders().toggle_completed(&id).await?))
}
