//! Shared fixtures for integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use pos_server::AppError;
use pos_server::assets::ImageStore;

/// Asset store that records calls instead of touching a filesystem
pub struct MockImageStore {
    stores: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_delete: bool,
}

impl MockImageStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            stores: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            fail_delete: false,
        })
    }

    pub fn failing_delete() -> Arc<Self> {
        Arc::new(Self {
            stores: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            fail_delete: true,
        })
    }

    pub fn store_calls(&self) -> Vec<String> {
        self.stores.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn store(&self, _data: &[u8], filename: &str) -> Result<String, AppError> {
        let image_ref = format!("/uploads/{}", filename);
        self.stores.lock().unwrap().push(image_ref.clone());
        Ok(image_ref)
    }

    async fn delete(&self, image_ref: &str) -> Result<(), AppError> {
        self.deletes.lock().unwrap().push(image_ref.to_string());
        if self.fail_delete {
            return Err(AppError::asset("disk detached"));
        }
        Ok(())
    }
}

/// Single-connection pool: every in-memory SQLite connection is its own
/// database, so the pool must not open a second one.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}
