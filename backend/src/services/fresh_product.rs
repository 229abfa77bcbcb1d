//! Fresh-product workflow
//!
//! Records fresh-stock receipts outside the supplier-purchase flow and
//! increments stock the same way purchasing does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::validation::validate_non_negative_quantity;

use crate::error::{AppError, AppResult};
use crate::services::stock;

/// Fresh-product service
#[derive(Clone)]
pub struct FreshProductService {
    db: PgPool,
}

/// Fresh-stock receipt with denormalized product and user snapshots
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FreshProductReceipt {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_variant: String,
    pub product_code: String,
    pub quantity: i32,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a fresh-stock receipt
#[derive(Debug, Deserialize)]
pub struct RegisterFreshProductInput {
    pub product_id: Uuid,
    #[serde(rename = "freshproductQuantity")]
    pub quantity: i32,
    pub user_id: Uuid,
}

/// Input for updating an existing receipt
#[derive(Debug, Deserialize)]
pub struct UpdateFreshProductInput {
    pub product_id: Uuid,
    #[serde(rename = "freshproductQuantity")]
    pub quantity: i32,
    pub user_id: Uuid,
}

impl FreshProductService {
    /// Create a new FreshProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a fresh-stock receipt and increment the product's quantity
    pub async fn register(&self, input: RegisterFreshProductInput) -> AppResult<Uuid> {
        validate_non_negative_quantity(input.quantity)
            .map_err(|msg| AppError::validation("freshproductQuantity", msg))?;

        let mut tx = self.db.begin().await?;

        let product = sqlx::query_as::<_, (String, String)>(
            "SELECT variant, code FROM products WHERE id = $1",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let user_name = sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
            .bind(input.user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let (product_variant, product_code) = product;

        let receipt_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO fresh_product_receipts (
                product_id, product_variant, product_code, quantity, user_id, user_name
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.product_id)
        .bind(&product_variant)
        .bind(&product_code)
        .bind(input.quantity)
        .bind(input.user_id)
        .bind(&user_name)
        .fetch_one(&mut *tx)
        .await?;

        stock::adjust_quantity(&mut tx, input.product_id, input.quantity).await?;

        tx.commit().await?;

        Ok(receipt_id)
    }

    /// List all receipts, most recently touched first
    pub async fn list(&self) -> AppResult<Vec<FreshProductReceipt>> {
        let rows = sqlx::query_as::<_, FreshProductReceipt>(
            r#"
            SELECT id, product_id, product_variant, product_code, quantity,
                   user_id, user_name, created_at, updated_at
            FROM fresh_product_receipts
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Get a single receipt
    pub async fn get(&self, receipt_id: Uuid) -> AppResult<FreshProductReceipt> {
        sqlx::query_as::<_, FreshProductReceipt>(
            r#"
            SELECT id, product_id, product_variant, product_code, quantity,
                   user_id, user_name, created_at, updated_at
            FROM fresh_product_receipts
            WHERE id = $1
            "#,
        )
        .bind(receipt_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fresh product receipt".to_string()))
    }

    /// Update a receipt row. Deliberately does not re-run the stock
    /// adjustment: editing a receipt's quantity does not retroactively
    /// correct the product's on-hand total.
    pub async fn update(&self, receipt_id: Uuid, input: UpdateFreshProductInput) -> AppResult<()> {
        validate_non_negative_quantity(input.quantity)
            .map_err(|msg| AppError::validation("freshproductQuantity", msg))?;

        let result = sqlx::query(
            r#"
            UPDATE fresh_product_receipts
            SET product_id = $1, quantity = $2, user_id = $3, updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.user_id)
        .bind(receipt_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fresh product receipt".to_string()));
        }

        Ok(())
    }

    /// Delete a receipt. The stock contribution it recorded is not reversed.
    pub async fn delete(&self, receipt_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM fresh_product_receipts WHERE id = $1")
            .bind(receipt_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fresh product receipt".to_string()));
        }

        Ok(())
    }
}
