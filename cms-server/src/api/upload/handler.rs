//! Image Upload Handler
//!
//! Proxies dashboard uploads to the external media host and returns the
//! hosted URL plus the delete handle.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (10MB)
pub(crate) const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Accepted image content types
const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
}

/// An image file pulled out of a multipart body.
pub(crate) struct ImageField {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Read the image field from a multipart body, enforcing size and type.
pub(crate) async fn read_image_field(mut multipart: Multipart) -> AppResult<ImageField> {
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name() else { continue };
        if name != "file" && name != "image" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("image").to_string();
        let declared_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if bytes.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large ({} bytes, max {MAX_FILE_SIZE})",
                bytes.len()
            )));
        }

        // content type from the form, falling back to the file extension
        let content_type = declared_type
            .or_else(|| mime_guess::from_path(&file_name).first().map(|m| m.to_string()))
            .unwrap_or_default();
        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::validation(format!(
                "Invalid file type '{content_type}', expected an image"
            )));
        }

        return Ok(ImageField { bytes: bytes.to_vec(), file_name });
    }
    Err(AppError::validation("No image file provided"))
}

/// POST /api/upload - 上传图片到媒体托管
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    if !state.media.is_configured() {
        return Err(AppError::internal("Image upload service not configured"));
    }

    let image = read_image_field(multipart).await?;
    let uploaded = state
        .media
        .upload(image.bytes, &image.file_name, "uploads")
        .await?;

    match (uploaded.url, uploaded.public_id) {
        (Some(url), Some(public_id)) => Ok(Json(UploadResponse { url, public_id })),
        _ => Err(AppError::internal("Media host returned an incomplete asset")),
    }
}
