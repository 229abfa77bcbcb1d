//! HTTP handlers for fresh-product endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{AppJson, MessageResponse};
use crate::services::fresh_product::{
    FreshProductReceipt, FreshProductService, RegisterFreshProductInput, UpdateFreshProductInput,
};
use crate::AppState;

/// Register a fresh-stock receipt
pub async fn register_fresh_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterFreshProductInput>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let service = FreshProductService::new(state.db);
    service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Product quantity increased, updated products",
        )),
    ))
}

/// List all fresh-product receipts
pub async fn list_fresh_products(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FreshProductReceipt>>> {
    let service = FreshProductService::new(state.db);
    let receipts = service.list().await?;
    Ok(Json(receipts))
}

/// Get a single fresh-product receipt
pub async fn get_fresh_product(
    State(state): State<AppState>,
    Path(receipt_id): Path<Uuid>,
) -> AppResult<Json<FreshProductReceipt>> {
    let service = FreshProductService::new(state.db);
    let receipt = service.get(receipt_id).await?;
    Ok(Json(receipt))
}

/// Update a fresh-product receipt (does not re-adjust stock)
pub async fn update_fresh_product(
    State(state): State<AppState>,
    Path(receipt_id): Path<Uuid>,
    AppJson(input): AppJson<UpdateFreshProductInput>,
) -> AppResult<Json<MessageResponse>> {
    let service = FreshProductService::new(state.db);
    service.update(receipt_id, input).await?;
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// Delete a fresh-product receipt (does not revert stock)
pub async fn delete_fresh_product(
    State(state): State<AppState>,
    Path(receipt_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let service = FreshProductService::new(state.db);
    service.delete(receipt_id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
