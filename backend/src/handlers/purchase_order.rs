//! HTTP handlers for purchase-order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{AppJson, MessageResponse};
use crate::services::purchase_order::{
    AddStockInput, PurchaseOrder, PurchaseOrderService, RegisterProductPurchaseInput,
};
use crate::AppState;

/// Add stock to an existing product
pub async fn add_stock(
    State(state): State<AppState>,
    AppJson(input): AppJson<AddStockInput>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let service = PurchaseOrderService::new(state.db);
    service.add_stock(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Purchase registered successfully, updated products",
        )),
    ))
}

/// Register a new product via a supplier purchase
pub async fn register_product_purchase(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterProductPurchaseInput>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let service = PurchaseOrderService::new(state.db);
    service.register_product(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Purchase registered successfully, products updated",
        )),
    ))
}

/// List all purchase orders
pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let service = PurchaseOrderService::new(state.db);
    let purchase_orders = service.list().await?;
    Ok(Json(purchase_orders))
}

/// Get a single purchase order
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(purchase_order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let purchase_order = service.get(purchase_order_id).await?;
    Ok(Json(purchase_order))
}

/// Delete a purchase order
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(purchase_order_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let service = PurchaseOrderService::new(state.db);
    service.delete(purchase_order_id).await?;
    Ok(Json(MessageResponse::new("Purchase deleted successfully")))
}
