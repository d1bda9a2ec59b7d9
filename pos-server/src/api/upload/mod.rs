//! Upload Routes
//!
//! 图片上传与访问接口。

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::assets::LocalImageStore;
use crate::core::ServerState;

/// Upload file response
enum UploadFileResponse {
    Ok(Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok(content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, "image/jpeg")],
                content,
            )
                .into_response(),
            UploadFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            UploadFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve uploaded file handler
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    // Security check: prevent path traversal
    let Some(file_path) = LocalImageStore::resolve(&state.config.uploads_dir(), &filename) else {
        return UploadFileResponse::BadRequest("Invalid filename");
    };

    match tokio::fs::read(&file_path).await {
        Ok(content) => UploadFileResponse::Ok(content.into()),
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Uploaded file not found");
            UploadFileResponse::NotFound
        }
    }
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Upload image API
        .route("/upload", post(handler::upload))
        // Serve uploaded images - public access
        .route("/uploads/{filename}", get(serve_uploaded_file))
}
