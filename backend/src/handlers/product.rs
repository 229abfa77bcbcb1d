//! HTTP handlers for product endpoints
//!
//! Registration and update accept multipart bodies so an optional product
//! image can ride along with the form fields.

use std::str::FromStr;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::types::ProductCategory;

use crate::error::{AppError, AppResult};
use crate::handlers::MessageResponse;
use crate::services::product::{
    Product, ProductService, ProductWithHistory, RegisterProductInput, UpdateProductInput,
};
use crate::services::storage::UploadedFile;
use crate::AppState;

/// Query parameters for product listing
#[derive(Debug, serde::Deserialize)]
pub struct ProductListQuery {
    pub category: Option<ProductCategory>,
}

/// Register a product (multipart; optional `productImage` file field)
pub async fn register_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let form = ProductForm::read(multipart).await?;

    let input = RegisterProductInput {
        product_type: form.require_text("productType")?,
        name: form.require_text("productName")?,
        variant: form.require_text("productVariant")?,
        quantity: form.require_i32("productQuantity")?,
        price: form.require_decimal("productPrice")?,
    };

    let service = ProductService::new(state.db, state.storage);
    service.register(input, form.image).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Product registered successfully")),
    ))
}

/// List products, optionally filtered by category (`?category=product|other`)
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db, state.storage);
    let products = service.list(query.category).await?;
    Ok(Json(products))
}

/// Get a product with its price history
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductWithHistory>> {
    let service = ProductService::new(state.db, state.storage);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// Update a product's quantity and price (multipart; optional image)
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let form = ProductForm::read(multipart).await?;

    let input = UpdateProductInput {
        quantity: form.require_i32("productQuantity")?,
        price: form.require_decimal("productPrice")?,
    };

    let service = ProductService::new(state.db, state.storage);
    service.update(product_id, input, form.image).await?;

    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let service = ProductService::new(state.db, state.storage);
    service.delete(product_id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Text fields and optional image collected from a product multipart body
struct ProductForm {
    fields: Vec<(String, String)>,
    image: Option<UploadedFile>,
}

impl ProductForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut fields = Vec::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {}", e)))?
        {
            let name = match field.name() {
                Some(name) => name.to_string(),
                None => continue,
            };

            if name == "productImage" {
                let filename = field.file_name().unwrap_or("image").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::ValidationError(format!("Invalid multipart payload: {}", e))
                    })?
                    .to_vec();
                image = Some(UploadedFile { filename, bytes });
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::ValidationError(format!("Invalid multipart payload: {}", e))
                })?;
                fields.push((name, value));
            }
        }

        Ok(Self { fields, image })
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    fn require_text(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation(name, "This field is required"))
    }

    fn require_i32(&self, name: &str) -> AppResult<i32> {
        let value = self.require_text(name)?;
        value
            .trim()
            .parse()
            .map_err(|_| AppError::validation(name, "Must be a valid number"))
    }

    fn require_decimal(&self, name: &str) -> AppResult<Decimal> {
        let value = self.require_text(name)?;
        Decimal::from_str(value.trim())
            .map_err(|_| AppError::validation(name, "Must be a valid number"))
    }
}
