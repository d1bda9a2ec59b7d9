//! Report API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::enrich_orders;
use crate::reporting::{DailyReport, daily_report};
use crate::utils::AppResult;
use crate::utils::time;

/// Query params for the daily report
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub start_date: String,
    pub end_date: String,
    /// Optional product-name filter (case-insensitive substring)
    pub product: Option<String>,
}

/// GET /reports/daily - 按日历日分组的销售报表
///
/// 日界使用配置的门店时区 (`Config::timezone`)。
pub async fn daily(
    State(state): State<ServerState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<DailyReport>> {
    let start = time::parse_date(&query.start_date)?;
    let end = time::parse_date(&query.end_date)?;

    let orders = OrderRepository::new(state.db.clone()).find_all().await?;
    let products = ProductRepository::new(state.db.clone()).find_all().await?;
    let enriched = enrich_orders(&orders, &products);

    let report = daily_report(
        enriched,
        start,
        end,
        query.product.as_deref(),
        state.config.timezone,
    );

    Ok(Json(report))
}
