//! Order workflow: validates a cart, prices it, persists the order with its
//! line items, and decrements stock per line — all in one transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::validation::{line_subtotal, order_change, validate_order_quantity};

use crate::error::{AppError, AppResult};
use crate::services::storage::{receipt_filename, FileStorage, UploadedFile};
use crate::services::{random_digits, stock};

/// Order service for sales registration and receipt handling
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
    storage: FileStorage,
}

/// Order header
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_name: Option<String>,
    pub total_quantity: i32,
    pub total_price: Decimal,
    pub payment: Decimal,
    pub change: Decimal,
    pub receipt: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order, with the product name, variant and pricing frozen
/// at order time
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLineItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_variant: String,
    pub quantity: i32,
    pub discount: Decimal,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Order header with its line items
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLineItem>,
}

/// Input for registering an order
#[derive(Debug, Deserialize)]
pub struct RegisterOrderInput {
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    pub user_id: Uuid,
    pub products: Vec<OrderLineInput>,
    #[serde(rename = "orderPayment")]
    pub payment: Decimal,
}

/// One cart line in the registration payload
#[derive(Debug, Deserialize)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    #[serde(rename = "orderQuantity")]
    pub quantity: i32,
    #[serde(rename = "orderDiscount")]
    pub discount: Option<Decimal>,
}

/// Product fields snapshotted into a line item
#[derive(Debug, sqlx::FromRow)]
struct ProductSnapshot {
    name: String,
    variant: String,
    price: Decimal,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool, storage: FileStorage) -> Self {
        Self { db, storage }
    }

    /// Register an order: price the cart, persist header and lines, and
    /// decrement stock per line. All-or-nothing; any failure rolls the
    /// whole transaction back.
    pub async fn register(&self, input: RegisterOrderInput) -> AppResult<Uuid> {
        if input.products.is_empty() {
            return Err(AppError::ValidationError(
                "Products array is required and cannot be empty".to_string(),
            ));
        }

        for line in &input.products {
            validate_order_quantity(line.quantity)
                .map_err(|msg| AppError::validation("orderQuantity", msg))?;
        }

        let mut tx = self.db.begin().await?;

        // Human-readable tag only; the primary key is the id column, so
        // reference collisions are tolerated.
        let reference_number = random_digits(13);

        let mut snapshots = Vec::with_capacity(input.products.len());
        let mut total_quantity: i32 = 0;
        let mut total_price = Decimal::ZERO;

        for line in &input.products {
            let snapshot = sqlx::query_as::<_, ProductSnapshot>(
                "SELECT name, variant, price FROM products WHERE id = $1",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Product with ID {}", line.product_id))
            })?;

            total_quantity += line.quantity;
            total_price += line_subtotal(line.quantity, snapshot.price, line.discount);
            snapshots.push(snapshot);
        }

        // May be negative; an underpaying caller is the UI's problem
        let change = order_change(input.payment, total_price);

        let order_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO orders (
                reference_number, customer_name, total_quantity, total_price,
                payment, change, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&reference_number)
        .bind(&input.customer_name)
        .bind(total_quantity)
        .bind(total_price)
        .bind(input.payment)
        .bind(change)
        .bind(input.user_id)
        .fetch_one(&mut *tx)
        .await?;

        for (line, snapshot) in input.products.iter().zip(&snapshots) {
            let discount = line.discount.unwrap_or(Decimal::ZERO);
            let subtotal = line_subtotal(line.quantity, snapshot.price, line.discount);

            sqlx::query(
                r#"
                INSERT INTO order_line_items (
                    order_id, product_id, product_name, product_variant,
                    quantity, discount, subtotal
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(&snapshot.name)
            .bind(&snapshot.variant)
            .bind(line.quantity)
            .bind(discount)
            .bind(subtotal)
            .execute(&mut *tx)
            .await?;

            stock::adjust_quantity(&mut tx, line.product_id, -line.quantity).await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Attach (or replace) a receipt file on an order.
    ///
    /// The blob is written before the metadata update so a committed row
    /// never names a file that failed to write; the replaced blob is
    /// removed best-effort afterwards.
    pub async fn attach_receipt(&self, order_id: Uuid, file: UploadedFile) -> AppResult<()> {
        let current = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT reference_number, receipt FROM orders WHERE id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let (reference_number, previous_receipt) = current;
        let filename = receipt_filename(reference_number.trim(), &file.filename);

        self.storage.save_receipt(&filename, &file.bytes).await?;

        sqlx::query("UPDATE orders SET receipt = $1, updated_at = NOW() WHERE id = $2")
            .bind(&filename)
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if let Some(previous) = previous_receipt {
            self.storage.delete_receipt(&previous).await;
        }

        Ok(())
    }

    /// List all orders, newest first
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, reference_number, customer_name, total_quantity, total_price,
                   payment, change, receipt, user_id, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Get a single order with its line items
    pub async fn get(&self, order_id: Uuid) -> AppResult<OrderWithItems> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, reference_number, customer_name, total_quantity, total_price,
                   payment, change, receipt, user_id, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let items = sqlx::query_as::<_, OrderLineItem>(
            r#"
            SELECT id, order_id, product_id, product_name, product_variant,
                   quantity, discount, subtotal, created_at
            FROM order_line_items
            WHERE order_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(OrderWithItems { order, items })
    }

    /// Delete an order and its line items. Stock is not restored; a deleted
    /// sale is an audit-trail removal, not a return.
    pub async fn delete(&self, order_id: Uuid) -> AppResult<()> {
        let receipt: Option<Option<String>> =
            sqlx::query_scalar("SELECT receipt FROM orders WHERE id = $1")
                .bind(order_id)
                .fetch_optional(&self.db)
                .await?;

        let receipt = receipt.ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if let Some(filename) = receipt {
            self.storage.delete_receipt(&filename).await;
        }

        Ok(())
    }
}
