//! Stock adjustment engine
//!
//! The single primitive shared by every stock-moving workflow. Sales call it
//! with a negative delta, restocks and fresh receipts with a positive one.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Atomically apply a quantity delta to a product row.
///
/// Runs on the caller's transaction so the adjustment commits or rolls back
/// together with the workflow records around it. The increment is a single
/// statement (`quantity = quantity + delta`); concurrent adjustments to the
/// same row cannot lose updates. No floor check is applied here: callers
/// decide whether an oversell is acceptable.
pub async fn adjust_quantity(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    delta: i32,
) -> AppResult<()> {
    let result = sqlx::query(
        "UPDATE products SET quantity = quantity + $1, updated_at = NOW() WHERE id = $2",
    )
    .bind(delta)
    .bind(product_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Product".to_string()));
    }

    Ok(())
}
