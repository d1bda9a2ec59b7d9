//! Image Asset Storage
//!
//! Product photos live outside the relational store, behind the
//! [`ImageStore`] trait so handlers never touch the filesystem directly.
//! The production implementation validates and re-encodes uploads to JPEG
//! before persisting them under the work directory.

use async_trait::async_trait;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::utils::AppError;

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for dish images (85% - maintains color appeal while controlling file size)
const JPEG_QUALITY: u8 = 85;

/// Public URL prefix for stored references
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Asset storage collaborator
///
/// `store` returns the reference persisted on the product row; `delete`
/// removes a previously stored asset. Both may fail transiently; callers
/// decide whether to retry.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, data: &[u8], filename: &str) -> Result<String, AppError>;
    async fn delete(&self, image_ref: &str) -> Result<(), AppError>;
}

/// Filesystem-backed image store
pub struct LocalImageStore {
    images_dir: PathBuf,
}

/// Validate upload size, extension and decodability
fn validate_image(data: &[u8], ext: &str) -> Result<image::DynamicImage, AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image file ({}): {}", ext_lower, e)))
}

/// Re-encode as JPEG with quality setting
fn compress_image(img: &image::DynamicImage) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }
    Ok(buffer)
}

impl LocalImageStore {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// Resolve a stored filename to its on-disk path
    ///
    /// Rejects path traversal attempts.
    pub fn resolve(images_dir: &Path, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return None;
        }
        Some(images_dir.join(filename))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, data: &[u8], filename: &str) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Empty file provided".to_string()));
        }

        let ext = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {}", filename))
            })?;

        let img = validate_image(data, ext)?;
        let compressed = compress_image(&img)?;

        tokio::fs::create_dir_all(&self.images_dir)
            .await
            .map_err(|e| AppError::asset(format!("Failed to create images directory: {}", e)))?;

        let new_filename = format!("{}.jpg", Uuid::new_v4());
        let file_path = self.images_dir.join(&new_filename);
        tokio::fs::write(&file_path, &compressed)
            .await
            .map_err(|e| AppError::asset(format!("Failed to save file: {}", e)))?;

        tracing::info!(
            original_name = %filename,
            size = compressed.len(),
            "Image stored"
        );

        Ok(format!("{}{}", UPLOADS_PREFIX, new_filename))
    }

    async fn delete(&self, image_ref: &str) -> Result<(), AppError> {
        let filename = image_ref.strip_prefix(UPLOADS_PREFIX).unwrap_or(image_ref);
        let path = Self::resolve(&self.images_dir, filename)
            .ok_or_else(|| AppError::asset(format!("Invalid image reference: {}", image_ref)))?;

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::asset(format!("Failed to remove {}: {}", image_ref, e)))?;

        tracing::info!(image_ref = %image_ref, "Image removed");
        Ok(())
    }
}
