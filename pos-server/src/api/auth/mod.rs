//! Auth API 模块 - 公共路由 (无需认证)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/login", post(handler::login))
}
