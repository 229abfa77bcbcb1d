//! Purchase/restock workflow
//!
//! Two transactional entry points: adding quantity to an existing product,
//! and registering a brand-new product through a supplier purchase. Both
//! append a purchase-order row; the record is append-only and has no update
//! path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::types::{PriceAdjustment, TransactionKind};
use shared::validation::{validate_payment, validate_price, validate_restock_quantity};

use crate::error::{AppError, AppResult};
use crate::services::product::duplicate_product_error;
use crate::services::{random_digits, stock};

/// Purchase-order service
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
}

/// Purchase-order row; supplier/product/user names are snapshots taken at
/// purchase time so later renames do not rewrite history
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_variant: String,
    pub product_code: String,
    pub quantity: i32,
    pub payment: Decimal,
    pub transaction_kind: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for adding stock to an existing product
#[derive(Debug, Deserialize)]
pub struct AddStockInput {
    pub supplier_id: Uuid,
    pub product_id: Uuid,
    #[serde(rename = "purchaseQuantity")]
    pub quantity: i32,
    #[serde(rename = "purchasePayment")]
    pub payment: Decimal,
    pub user_id: Uuid,
}

/// Input for registering a new product via purchase
#[derive(Debug, Deserialize)]
pub struct RegisterProductPurchaseInput {
    pub supplier_id: Uuid,
    #[serde(rename = "productType")]
    pub product_type: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "productVariant")]
    pub product_variant: String,
    #[serde(rename = "productQuantity")]
    pub quantity: i32,
    #[serde(rename = "productPrice")]
    pub price: Decimal,
    #[serde(rename = "purchasePayment")]
    pub payment: Decimal,
    pub user_id: Uuid,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRef {
    name: String,
    variant: String,
    code: String,
}

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add stock to an existing product and append a RESTOCK record
    pub async fn add_stock(&self, input: AddStockInput) -> AppResult<()> {
        validate_restock_quantity(input.quantity)
            .map_err(|msg| AppError::validation("purchaseQuantity", msg))?;
        validate_payment(input.payment)
            .map_err(|msg| AppError::validation("purchasePayment", msg))?;

        let mut tx = self.db.begin().await?;

        // All referenced entities are resolved before any write
        let supplier_name = fetch_supplier_name(&mut tx, input.supplier_id).await?;

        let product = sqlx::query_as::<_, ProductRef>(
            "SELECT name, variant, code FROM products WHERE id = $1",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let user_name = fetch_user_name(&mut tx, input.user_id).await?;

        insert_purchase_order(
            &mut tx,
            &input.supplier_id,
            &supplier_name,
            &input.product_id,
            &product,
            input.quantity,
            input.payment,
            TransactionKind::Restock,
            &input.user_id,
            &user_name,
        )
        .await?;

        stock::adjust_quantity(&mut tx, input.product_id, input.quantity).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Register a brand-new product via a supplier purchase: product row
    /// with its initial quantity, first price-history entry, and a
    /// NEW PRODUCT purchase record. No separate stock adjustment is needed
    /// since the product is created with its quantity already set.
    pub async fn register_product(&self, input: RegisterProductPurchaseInput) -> AppResult<Uuid> {
        validate_restock_quantity(input.quantity)
            .map_err(|msg| AppError::validation("productQuantity", msg))?;
        validate_price(input.price).map_err(|msg| AppError::validation("productPrice", msg))?;
        validate_payment(input.payment)
            .map_err(|msg| AppError::validation("purchasePayment", msg))?;

        let code = format!("PROD-{}", random_digits(10));

        let mut tx = self.db.begin().await?;

        let supplier_name = fetch_supplier_name(&mut tx, input.supplier_id).await?;
        let user_name = fetch_user_name(&mut tx, input.user_id).await?;

        let product_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO products (product_type, code, name, variant, quantity, price, price_adjustment)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&input.product_type)
        .bind(&code)
        .bind(&input.product_name)
        .bind(&input.product_variant)
        .bind(input.quantity)
        .bind(input.price)
        .bind(PriceAdjustment::None.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(duplicate_product_error)?;

        sqlx::query("INSERT INTO price_history (product_id, price) VALUES ($1, $2)")
            .bind(product_id)
            .bind(input.price)
            .execute(&mut *tx)
            .await?;

        let product = ProductRef {
            name: input.product_name.clone(),
            variant: input.product_variant.clone(),
            code,
        };

        insert_purchase_order(
            &mut tx,
            &input.supplier_id,
            &supplier_name,
            &product_id,
            &product,
            input.quantity,
            input.payment,
            TransactionKind::NewProduct,
            &input.user_id,
            &user_name,
        )
        .await?;

        tx.commit().await?;

        Ok(product_id)
    }

    /// List purchase orders, newest first
    pub async fn list(&self) -> AppResult<Vec<PurchaseOrder>> {
        let rows = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            SELECT id, supplier_id, supplier_name, product_id, product_name,
                   product_variant, product_code, quantity, payment,
                   transaction_kind, user_id, user_name, created_at
            FROM purchase_orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Get a single purchase order
    pub async fn get(&self, purchase_order_id: Uuid) -> AppResult<PurchaseOrder> {
        sqlx::query_as::<_, PurchaseOrder>(
            r#"
            SELECT id, supplier_id, supplier_name, product_id, product_name,
                   product_variant, product_code, quantity, payment,
                   transaction_kind, user_id, user_name, created_at
            FROM purchase_orders
            WHERE id = $1
            "#,
        )
        .bind(purchase_order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))
    }

    /// Delete a purchase order record. Stock is not reverted.
    pub async fn delete(&self, purchase_order_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(purchase_order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Purchase order".to_string()));
        }

        Ok(())
    }
}

async fn fetch_supplier_name(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    supplier_id: Uuid,
) -> AppResult<String> {
    sqlx::query_scalar::<_, String>("SELECT name FROM suppliers WHERE id = $1")
        .bind(supplier_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
}

async fn fetch_user_name(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
) -> AppResult<String> {
    sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))
}

#[allow(clippy::too_many_arguments)]
async fn insert_purchase_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    supplier_id: &Uuid,
    supplier_name: &str,
    product_id: &Uuid,
    product: &ProductRef,
    quantity: i32,
    payment: Decimal,
    kind: TransactionKind,
    user_id: &Uuid,
    user_name: &str,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO purchase_orders (
            supplier_id, supplier_name, product_id, product_name,
            product_variant, product_code, quantity, payment,
            transaction_kind, user_id, user_name
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(supplier_id)
    .bind(supplier_name)
    .bind(product_id)
    .bind(&product.name)
    .bind(&product.variant)
    .bind(&product.code)
    .bind(quantity)
    .bind(payment)
    .bind(kind.as_str())
    .bind(user_id)
    .bind(user_name)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
