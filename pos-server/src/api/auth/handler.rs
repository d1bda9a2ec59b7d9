//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
}

/// POST /login - 登录
///
/// Verifies credentials against the argon2 hash; never a plaintext
/// comparison.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            let password_valid = u.verify_password(&req.password).map_err(|e| {
                AppError::internal(format!("Password verification failed: {}", e))
            })?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse { user_id: user.id }))
}
