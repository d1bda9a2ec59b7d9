//! Order Repository
//!
//! Orders are append-only: there is no update or delete.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate, serialize_lines};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find all orders, in creation order
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> =
            sqlx::query_as("SELECT id, product_data, note, created_at FROM orders ORDER BY id")
                .fetch_all(self.base.pool())
                .await?;
        Ok(orders)
    }

    /// Create a new order, returning its id
    ///
    /// Every referenced product must exist and be active at submission
    /// time; the check runs inside the insert transaction so a concurrent
    /// product delete cannot interleave.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<i64> {
        if data.product_data.is_empty() {
            return Err(RepoError::Validation(
                "Order must contain at least one line item".to_string(),
            ));
        }
        for line in &data.product_data {
            if line.quantity < 1 {
                return Err(RepoError::Validation(format!(
                    "Invalid quantity {} for product {}",
                    line.quantity, line.id
                )));
            }
        }

        let raw = serialize_lines(&data.product_data)
            .map_err(|e| RepoError::Validation(format!("Unserializable line items: {}", e)))?;

        let mut tx = self.base.pool().begin().await?;

        for line in &data.product_data {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT id FROM products WHERE id = ? AND is_deleted = 0")
                    .bind(line.id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if exists.is_none() {
                return Err(RepoError::Validation(format!(
                    "Unknown or inactive product: {}",
                    line.id
                )));
            }
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (product_data, note, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&raw)
        .bind(&data.note)
        .bind(now_millis())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }
}
