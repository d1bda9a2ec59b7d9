//! Product API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use http::StatusCode;
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Category, Product};
use crate::db::repository::ProductRepository;
use crate::services::CatalogService;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: String,
    /// true when the row was tombstoned instead of removed
    pub soft_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// GET /products - 获取所有在售商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all_active().await?;
    Ok(Json(products))
}

/// POST /products - 创建商品 (multipart: name, category, price, image)
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<CreateProductResponse>)> {
    let mut name: Option<String> = None;
    let mut category: Option<String> = None;
    let mut price: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("category") => category = Some(field.text().await?),
            Some("price") => price = Some(field.text().await?),
            Some("image") => {
                let filename = field.file_name().map(|s| s.to_string()).ok_or_else(|| {
                    AppError::validation("No filename provided in image field".to_string())
                })?;
                let data = field.bytes().await?.to_vec();
                image = Some((filename, data));
            }
            _ => {}
        }
    }

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Missing required field: name".to_string()))?;
    let category: Category = category
        .ok_or_else(|| AppError::validation("Missing required field: category".to_string()))?
        .parse()
        .map_err(AppError::Validation)?;
    let price = CatalogService::parse_price(
        &price.ok_or_else(|| AppError::validation("Missing required field: price".to_string()))?,
    )?;
    let (filename, data) = image
        .ok_or_else(|| AppError::validation("Missing required field: image".to_string()))?;

    let id = state
        .catalog()
        .create_product(name, category, price, &data, &filename)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateProductResponse { id })))
}

/// DELETE /products/{id} - 删除商品 (历史订单引用时转为软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteProductResponse>> {
    let deleted = state.catalog().delete_product(id).await?;

    Ok(Json(DeleteProductResponse {
        message: "Produit supprimé avec succès.".to_string(),
        soft_deleted: deleted.soft_deleted,
        warning: deleted.asset_warning,
    }))
}
