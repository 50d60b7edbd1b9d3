//! Image Upload Handler
//!
//! Accepts base64-encoded images from the back office, converts to JPEG and
//! stores them content-addressed. Identical uploads resolve to the same file.

use axum::{Extension, Json, extract::State};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Cursor;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Maximum decoded file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality for stored images (85% keeps menu photos appealing at
/// reasonable size)
const JPEG_QUALITY: u8 = 85;

/// Upload request: raw base64 (optionally a `data:` URL) plus the content
/// kind it belongs to
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64 image payload, `data:image/...;base64,` prefix tolerated
    pub image: String,
    /// What the image is for: menu_item | event | blog
    pub kind: String,
}

/// Upload response
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size: usize,
    pub url: String,
}

const SUPPORTED_KINDS: &[&str] = &["menu_item", "event", "blog"];

/// Decode the payload, tolerating data-URL prefixes
fn decode_base64(payload: &str) -> AppResult<Vec<u8>> {
    let raw = match payload.split_once(";base64,") {
        Some((_, data)) => data,
        None => payload,
    };
    BASE64
        .decode(raw.trim())
        .map_err(|e| AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid base64 payload: {}", e)))
}

/// Re-encode as JPEG with fixed quality
fn process_image(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {}", e))
    })?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img.write_with_encoder(encoder).map_err(|e| {
            AppError::with_message(
                ErrorCode::ImageProcessingFailed,
                format!("Failed to compress image: {}", e),
            )
        })?;
    }
    Ok(buffer)
}

/// POST /api/upload/image - 上传图片
pub async fn upload_image(
    State(state): State<ServerState>,
    Extension(_current_user): Extension<CurrentUser>,
    Json(payload): Json<UploadRequest>,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    if !SUPPORTED_KINDS.contains(&payload.kind.as_str()) {
        return Err(AppError::validation(format!(
            "Unknown upload kind '{}'. Supported: {}",
            payload.kind,
            SUPPORTED_KINDS.join(", ")
        )));
    }

    let data = decode_base64(&payload.image)?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }

    let jpeg = process_image(&data)?;

    // Content-addressed filename: identical images share one file
    let mut hasher = Sha256::new();
    hasher.update(&jpeg);
    let hash = hex::encode(hasher.finalize());
    let filename = format!("{}.jpg", &hash[..16]);

    let images_dir = state.config.uploads_dir();
    fs::create_dir_all(&images_dir).map_err(|e| {
        AppError::with_message(
            ErrorCode::FileStorageFailed,
            format!("Failed to create images directory: {}", e),
        )
    })?;

    let path = images_dir.join(&filename);
    if !path.exists() {
        fs::write(&path, &jpeg).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to store image: {}", e),
            )
        })?;
    }

    tracing::info!(
        kind = %payload.kind,
        filename = %filename,
        size = jpeg.len(),
        "Image uploaded"
    );

    Ok(Json(ApiResponse::success(UploadResponse {
        url: format!("/uploads/images/{}", filename),
        size: jpeg.len(),
        filename,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1x1 px PNG
    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([120, 80, 40]));
        let mut buffer = Vec::new();
        img.write_to(
            &mut Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .unwrap();
        buffer
    }

    #[test]
    fn test_decode_base64_plain_and_data_url() {
        let data = tiny_png();
        let encoded = BASE64.encode(&data);

        assert_eq!(decode_base64(&encoded).unwrap(), data);
        let data_url = format!("data:image/png;base64,{}", encoded);
        assert_eq!(decode_base64(&data_url).unwrap(), data);
        assert!(decode_base64("not-base64!!!").is_err());
    }

    #[test]
    fn test_process_image_outputs_jpeg() {
        let jpeg = process_image(&tiny_png()).unwrap();
        // JPEG magic bytes
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_process_rejects_garbage() {
        assert!(process_image(b"definitely not an image").is_err());
    }
}
