//! Product Repository
//!
//! Owns the product lifecycle: creation and the soft/hard delete decision.
//! A product referenced by at least one historic order is never removed,
//! only tombstoned, so old orders keep enriching with its name and price.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, parse_lines};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Product is referenced by historic orders: row retained with
    /// `is_deleted = 1`, asset retained
    SoftDeleted,
    /// Product was unreferenced: row removed; the caller should now
    /// request deletion of the returned asset reference
    HardDeleted { image: Option<String> },
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find all active products, in creation order
    pub async fn find_all_active(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = sqlx::query_as(
            "SELECT id, name, category, price, image, is_deleted, created_at
             FROM products WHERE is_deleted = 0 ORDER BY id",
        )
        .fetch_all(self.base.pool())
        .await?;
        Ok(products)
    }

    /// Find all products, soft-deleted ones included (for order enrichment)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = sqlx::query_as(
            "SELECT id, name, category, price, image, is_deleted, created_at
             FROM products ORDER BY id",
        )
        .fetch_all(self.base.pool())
        .await?;
        Ok(products)
    }

    /// Find product by id, soft-deleted ones included
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as(
            "SELECT id, name, category, price, image, is_deleted, created_at
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(product)
    }

    /// Create a new product, returning its id
    pub async fn create(&self, data: ProductCreate) -> RepoResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, category, price, image, is_deleted, created_at)
             VALUES (?, ?, ?, ?, 0, ?)
             RETURNING id",
        )
        .bind(&data.name)
        .bind(data.category)
        .bind(data.price)
        .bind(&data.image)
        .bind(now_millis())
        .fetch_one(self.base.pool())
        .await?;
        Ok(id)
    }

    /// Delete a product, soft or hard depending on historic order references
    ///
    /// The lookup, the reference check and the mutation run in a single
    /// transaction, so a concurrently submitted order cannot slip between
    /// the check and the delete.
    ///
    /// The reference check is structural: every order's line items are
    /// parsed and compared by product id. A substring probe over the
    /// serialized text would false-positive (id 1 inside id 12).
    pub async fn delete(&self, id: i64) -> RepoResult<DeleteOutcome> {
        let mut tx = self.base.pool().begin().await?;

        let product: Option<Product> = sqlx::query_as(
            "SELECT id, name, category, price, image, is_deleted, created_at
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let product =
            product.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let blobs: Vec<(String,)> = sqlx::query_as("SELECT product_data FROM orders")
            .fetch_all(&mut *tx)
            .await?;
        let referenced = blobs
            .iter()
            .any(|(raw,)| parse_lines(raw).iter().any(|line| line.id == id));

        let outcome = if referenced {
            sqlx::query("UPDATE products SET is_deleted = 1 WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            DeleteOutcome::SoftDeleted
        } else {
            sqlx::query("DELETE FROM products WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            DeleteOutcome::HardDeleted {
                image: product.image,
            }
        };

        tx.commit().await?;

        tracing::info!(
            product_id = id,
            soft = matches!(outcome, DeleteOutcome::SoftDeleted),
            "Product deleted"
        );

        Ok(outcome)
    }
}
