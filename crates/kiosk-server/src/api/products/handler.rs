//! Catalog API handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use kiosk_core::models::product::{CreateProduct, Product};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

/// POST /api/products
pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    Json(payload): Json<CreateProduct>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    let id = state.catalog().create(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// GET /api/products?category=
pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog().list(query.category.as_deref()).await?))
}
