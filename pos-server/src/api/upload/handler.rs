//! Image Upload Handler
//!
//! Accepts multiple image formats (PNG, JPEG, WebP); everything is
//! re-encoded to JPG by the asset store.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::assets::ImageStore;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

/// POST /upload - 独立图片上传
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    // Find the image field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string());
        if field_name.as_deref() == Some("image") {
            original_filename = field.file_name().map(|s| s.to_string());
            field_data = Some(field.bytes().await?.to_vec());
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No 'image' field found. Field name must be 'image'".to_string())
    })?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in image field".to_string()))?;

    let file_path = state.images.store(&data, &filename).await?;

    Ok(Json(UploadResponse { file_path }))
}
