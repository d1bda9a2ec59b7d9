//! Order API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list).post(handler::create))
}
