//! HTTP handlers for order endpoints

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{AppJson, MessageResponse};
use crate::services::order::{Order, OrderService, OrderWithItems, RegisterOrderInput};
use crate::services::storage::UploadedFile;
use crate::AppState;

/// Response for a successful order registration
#[derive(Debug, serde::Serialize)]
pub struct RegisterOrderResponse {
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: Uuid,
}

/// Register an order
pub async fn register_order(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterOrderInput>,
) -> AppResult<(StatusCode, Json<RegisterOrderResponse>)> {
    let service = OrderService::new(state.db, state.storage);
    let order_id = service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterOrderResponse {
            message: "Order registered successfully".to_string(),
            order_id,
        }),
    ))
}

/// List all orders
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db, state.storage);
    let orders = service.list().await?;
    Ok(Json(orders))
}

/// Get a single order with its line items
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderWithItems>> {
    let service = OrderService::new(state.db, state.storage);
    let order = service.get(order_id).await?;
    Ok(Json(order))
}

/// Attach a receipt file to an order (multipart field `orderReceipt`)
pub async fn attach_receipt(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("orderReceipt") {
            let filename = field.file_name().unwrap_or("receipt").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {}", e)))?
                .to_vec();
            file = Some(UploadedFile { filename, bytes });
        }
    }

    let file = file
        .ok_or_else(|| AppError::ValidationError("No receipt file uploaded".to_string()))?;

    let service = OrderService::new(state.db, state.storage);
    service.attach_receipt(order_id, file).await?;

    Ok(Json(MessageResponse::new("Receipt upload success")))
}

/// Delete an order
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let service = OrderService::new(state.db, state.storage);
    service.delete(order_id).await?;
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
