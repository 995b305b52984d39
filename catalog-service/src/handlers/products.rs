//! Product handlers. Each request maps to exactly one store call.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{CreateProductRequest, ProductResponse, StatusResponse},
    models::Product,
    startup::AppState,
};

/// Upper bound on products returned by a listing.
pub const LIST_LIMIT: i64 = 50;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .store
        .list_products(LIST_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {}", e);
            e
        })?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    let payload = CreateProductRequest::from_body(&headers, &body)
        .map_err(|rejection| AppError::BadRequest(anyhow::anyhow!(rejection.body_text())))?;
    let product = Product::new(state.ids.next_id(), payload.name, payload.category);
    let product_id = product.id.clone();

    state.store.create_product(product).await.map_err(|e| {
        tracing::error!(product_id = %product_id, "Failed to create product: {}", e);
        e
    })?;

    tracing::debug!(product_id = %product_id, "Product created");

    Ok((StatusCode::CREATED, Json(StatusResponse::CREATED)))
}
