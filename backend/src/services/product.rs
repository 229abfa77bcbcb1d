//! Product registration, updates and price-revision tracking

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::types::{PriceAdjustment, ProductCategory};
use shared::validation::{validate_non_negative_quantity, validate_price};

use crate::error::{AppError, AppResult};
use crate::services::storage::{image_filename, FileStorage, UploadedFile};
use crate::services::random_digits;

/// Product service for registration, updates and price history
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
    storage: FileStorage,
}

/// Product row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub product_type: String,
    pub code: String,
    pub image: Option<String>,
    pub name: String,
    pub variant: String,
    pub quantity: i32,
    pub price: Decimal,
    pub price_adjustment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only price revision
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PriceHistoryEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Product with its price history, newest revision first
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithHistory {
    #[serde(flatten)]
    pub product: Product,
    pub price_history: Vec<PriceHistoryEntry>,
}

/// Input for registering a product manually
#[derive(Debug)]
pub struct RegisterProductInput {
    pub product_type: String,
    pub name: String,
    pub variant: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Input for updating a product's quantity and price
#[derive(Debug)]
pub struct UpdateProductInput {
    pub quantity: i32,
    pub price: Decimal,
}

/// Map an insert/update failure on the products table to a 409 naming the
/// colliding field. Uniqueness of code and variant is enforced by the
/// database constraints, not by a prior SELECT, so a concurrent insert
/// still surfaces as a conflict rather than a 500.
pub(crate) fn duplicate_product_error(err: sqlx::Error) -> AppError {
    match err.as_database_error().and_then(|db_err| db_err.constraint()) {
        Some("products_variant_key") => AppError::DuplicateEntry("productVariant".to_string()),
        Some("products_code_key") => AppError::DuplicateEntry("productCode".to_string()),
        _ => AppError::DatabaseError(err),
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool, storage: FileStorage) -> Self {
        Self { db, storage }
    }

    /// Register a product with a generated `PROD-` code and its first
    /// price-history entry. The image blob, when present, is written before
    /// the transaction and removed again if the transaction fails.
    pub async fn register(
        &self,
        input: RegisterProductInput,
        image: Option<UploadedFile>,
    ) -> AppResult<Uuid> {
        validate_non_negative_quantity(input.quantity)
            .map_err(|msg| AppError::validation("productQuantity", msg))?;
        validate_price(input.price).map_err(|msg| AppError::validation("productPrice", msg))?;

        let code = format!("PROD-{}", random_digits(10));

        let image_name = match &image {
            Some(file) => {
                let filename = image_filename(&input.variant, &file.filename);
                self.storage.save_product_image(&filename, &file.bytes).await?;
                Some(filename)
            }
            None => None,
        };

        let result = self.insert_product(&input, &code, image_name.as_deref()).await;

        if result.is_err() {
            if let Some(filename) = &image_name {
                self.storage.delete_product_image(filename).await;
            }
        }

        result
    }

    async fn insert_product(
        &self,
        input: &RegisterProductInput,
        code: &str,
        image: Option<&str>,
    ) -> AppResult<Uuid> {
        let mut tx = self.db.begin().await?;

        let product_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO products (product_type, code, image, name, variant, quantity, price, price_adjustment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&input.product_type)
        .bind(code)
        .bind(image)
        .bind(&input.name)
        .bind(&input.variant)
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

        tx.commit().await?;

        Ok(product_id)
    }

    /// Update a product's quantity and price, appending a price-history row
    /// and flagging the adjustment whenever the price actually changes.
    /// Nothing in this service resets the flag back to NONE.
    pub async fn update(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
        image: Option<UploadedFile>,
    ) -> AppResult<()> {
        validate_non_negative_quantity(input.quantity)
            .map_err(|msg| AppError::validation("productQuantity", msg))?;
        validate_price(input.price).map_err(|msg| AppError::validation("productPrice", msg))?;

        let current = sqlx::query_as::<_, (Decimal, String, String, Option<String>)>(
            "SELECT price, variant, price_adjustment, image FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let (current_price, variant, current_adjustment, current_image) = current;

        let new_image_name = match &image {
            Some(file) => {
                let filename = image_filename(&variant, &file.filename);
                self.storage.save_product_image(&filename, &file.bytes).await?;
                Some(filename)
            }
            None => None,
        };

        let price_changed = input.price != current_price;
        let adjustment = if price_changed {
            PriceAdjustment::New.as_str().to_string()
        } else {
            current_adjustment
        };

        let result = self
            .apply_update(product_id, &input, price_changed, &adjustment, new_image_name.as_deref())
            .await;

        if result.is_err() {
            if let Some(filename) = &new_image_name {
                self.storage.delete_product_image(filename).await;
            }
            return result;
        }

        if new_image_name.is_some() {
            if let Some(previous) = current_image {
                self.storage.delete_product_image(&previous).await;
            }
        }

        Ok(())
    }

    async fn apply_update(
        &self,
        product_id: Uuid,
        input: &UpdateProductInput,
        price_changed: bool,
        adjustment: &str,
        image: Option<&str>,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        if price_changed {
            sqlx::query("INSERT INTO price_history (product_id, price) VALUES ($1, $2)")
                .bind(product_id)
                .bind(input.price)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            UPDATE products
            SET quantity = $1, price = $2, price_adjustment = $3,
                image = COALESCE($4, image), updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(input.quantity)
        .bind(input.price)
        .bind(adjustment)
        .bind(image)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// List products, optionally filtered by category
    pub async fn list(&self, category: Option<ProductCategory>) -> AppResult<Vec<Product>> {
        let base = r#"
            SELECT id, product_type, code, image, name, variant, quantity, price,
                   price_adjustment, created_at, updated_at
            FROM products
        "#;

        let query = match category {
            None => format!("{} ORDER BY updated_at DESC", base),
            Some(ProductCategory::Product) => {
                format!("{} WHERE product_type = 'PRODUCT' ORDER BY updated_at DESC", base)
            }
            Some(ProductCategory::Other) => {
                format!("{} WHERE product_type != 'PRODUCT' ORDER BY updated_at DESC", base)
            }
        };

        let products = sqlx::query_as::<_, Product>(&query).fetch_all(&self.db).await?;

        Ok(products)
    }

    /// Get a product together with its price history, newest first
    pub async fn get(&self, product_id: Uuid) -> AppResult<ProductWithHistory> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_type, code, image, name, variant, quantity, price,
                   price_adjustment, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let price_history = sqlx::query_as::<_, PriceHistoryEntry>(
            r#"
            SELECT id, product_id, price, created_at
            FROM price_history
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductWithHistory { product, price_history })
    }

    /// Delete a product; price history goes with it (cascade), and any
    /// stored image blob is removed best-effort
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let image: Option<Option<String>> =
            sqlx::query_scalar("SELECT image FROM products WHERE id = $1")
                .bind(product_id)
                .fetch_optional(&self.db)
                .await?;

        let image = image.ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if let Some(filename) = image {
            self.storage.delete_product_image(&filename).await;
        }

        Ok(())
    }
}
