//! User Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::User;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user: Option<User> =
            sqlx::query_as("SELECT id, username, hash_pass FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(user)
    }

    /// Insert a user with an already-hashed password, returning its id
    pub async fn create(&self, username: &str, hash_pass: &str) -> RepoResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, hash_pass) VALUES (?, ?) RETURNING id",
        )
        .bind(username)
        .bind(hash_pass)
        .fetch_one(self.base.pool())
        .await?;
        Ok(id)
    }
}
