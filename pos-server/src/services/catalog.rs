//! Catalog Service - Product lifecycle orchestration
//!
//! Sits between the HTTP handlers and the stores: the repository decides
//! soft vs hard delete inside its transaction, this service handles the
//! surrounding asset work and the partial-failure surface.

use std::sync::Arc;

use crate::assets::ImageStore;
use crate::db::models::{Category, ProductCreate};
use crate::db::repository::{DeleteOutcome, ProductRepository};
use crate::utils::{AppError, AppResult};
use sqlx::SqlitePool;

/// Result of a completed delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDeleted {
    /// Row tombstoned (still referenced by historic orders) rather than removed
    pub soft_deleted: bool,
    /// Set when the row was removed but the asset could not be: the
    /// product is gone from the catalog, an orphaned image may remain
    pub asset_warning: Option<String>,
}

#[derive(Clone)]
pub struct CatalogService {
    repo: ProductRepository,
    images: Arc<dyn ImageStore>,
}

impl CatalogService {
    pub fn new(pool: SqlitePool, images: Arc<dyn ImageStore>) -> Self {
        Self {
            repo: ProductRepository::new(pool),
            images,
        }
    }

    /// Create a product from validated form input
    ///
    /// The image is stored first; if the asset store fails, no row is
    /// created. A row-insert failure after a successful store leaves an
    /// orphaned asset, which the distinct error kinds let callers tell
    /// apart.
    pub async fn create_product(
        &self,
        name: String,
        category: Category,
        price: f64,
        image_data: &[u8],
        image_filename: &str,
    ) -> AppResult<i64> {
        let image_ref = self.images.store(image_data, image_filename).await?;

        let id = self
            .repo
            .create(ProductCreate {
                name,
                category,
                price,
                image: Some(image_ref),
            })
            .await?;

        tracing::info!(product_id = id, "Product created");
        Ok(id)
    }

    /// Delete a product; referenced products are tombstoned instead
    ///
    /// Exactly one asset-delete request is issued for a hard delete, none
    /// for a soft delete. Asset-delete failure never rolls back the row
    /// deletion; it is surfaced as a warning on the success result.
    pub async fn delete_product(&self, id: i64) -> AppResult<ProductDeleted> {
        match self.repo.delete(id).await? {
            DeleteOutcome::SoftDeleted => Ok(ProductDeleted {
                soft_deleted: true,
                asset_warning: None,
            }),
            DeleteOutcome::HardDeleted { image } => {
                let mut asset_warning = None;
                if let Some(image_ref) = image {
                    if let Err(e) = self.images.delete(&image_ref).await {
                        tracing::warn!(
                            image_ref = %image_ref,
                            error = %e,
                            "Product row deleted but asset removal failed"
                        );
                        asset_warning =
                            Some(format!("Image {} could not be removed", image_ref));
                    }
                }
                Ok(ProductDeleted {
                    soft_deleted: false,
                    asset_warning,
                })
            }
        }
    }

    /// Validate a submitted price string: non-negative finite number
    pub fn parse_price(raw: &str) -> AppResult<f64> {
        let price: f64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid price: {}", raw)))?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::validation(format!("Invalid price: {}", raw)));
        }
        Ok(price)
    }
}
