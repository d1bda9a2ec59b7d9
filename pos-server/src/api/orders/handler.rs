//! Order API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::OrderCreate;
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::{EnrichedOrder, enrich_orders};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub id: i64,
}

/// GET /orders - 获取所有订单 (已联结商品数据)
///
/// 联结使用全量商品集 (含软删除)，历史订单始终能还原名称和价格。
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EnrichedOrder>>> {
    let orders = OrderRepository::new(state.db.clone()).find_all().await?;
    let products = ProductRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(enrich_orders(&orders, &products)))
}

/// POST /orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    let id = OrderRepository::new(state.db.clone()).create(payload).await?;
    tracing::info!(order_id = id, "Order created");
    Ok((StatusCode::CREATED, Json(CreateOrderResponse { id })))
}
