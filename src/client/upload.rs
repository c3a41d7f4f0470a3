//! Image upload: local checks, data-URL encoding, POST /api/upload.

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use reqwest::Method;
use serde::Serialize;
use std::path::Path;

use super::ApiClient;
use crate::error::{AdminError, Result};
use crate::models::UploadResponse;

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Request body for POST /api/upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// `data:<mime>;base64,<payload>`
    pub image: String,
    pub file_name: String,
}

pub fn validate_image_magic_bytes(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    match bytes {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        // GIF: 47 49 46 38
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        // WebP: 52 49 46 46 ... 57 45 42 50
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64_ENGINE.encode(bytes))
}

/// Check an image the way the upload endpoint expects it and wrap it as a data URL.
pub fn prepare_image(file_name: &str, bytes: &[u8]) -> Result<UploadRequest> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AdminError::Upload(
            "Unsupported file type. Allowed: JPEG, PNG, WebP, GIF.".to_string(),
        ));
    }

    if bytes.is_empty() {
        return Err(AdminError::Upload("Empty file".to_string()));
    }

    if bytes.len() > MAX_FILE_SIZE {
        return Err(AdminError::Upload(
            "File too large. Maximum size is 5MB.".to_string(),
        ));
    }

    let mime = validate_image_magic_bytes(bytes).ok_or_else(|| {
        AdminError::Upload("File content does not match an allowed image type.".to_string())
    })?;

    Ok(UploadRequest {
        image: to_data_url(mime, bytes),
        file_name: file_name.to_string(),
    })
}

impl ApiClient {
    /// Upload an already prepared image. Returns the hosted URL.
    pub async fn upload(&self, request: &UploadRequest) -> Result<String> {
        let response: UploadResponse = self
            .send_json(Method::POST, &["api", "upload"], request, "upload")
            .await?;
        tracing::info!(file = %request.file_name, url = %response.url, "image uploaded");
        Ok(response.url)
    }

    /// Read `path`, validate it and upload it.
    pub async fn upload_image(&self, path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AdminError::Upload("Invalid filename".to_string()))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        let request = prepare_image(&file_name, &bytes)?;
        self.upload(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_magic_bytes() {
        assert_eq!(validate_image_magic_bytes(&PNG_HEADER), Some("image/png"));
        assert_eq!(validate_image_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(validate_image_magic_bytes(b"GIF89a"), Some("image/gif"));
        assert_eq!(validate_image_magic_bytes(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(validate_image_magic_bytes(b"%PDF-1.7"), None);
        assert_eq!(validate_image_magic_bytes(&[0xFF]), None);
    }

    #[test]
    fn test_prepare_image_builds_data_url() {
        let request = prepare_image("Cover.PNG", &PNG_HEADER).unwrap();
        assert!(request.image.starts_with("data:image/png;base64,"));
        assert_eq!(request.file_name, "Cover.PNG");
        let encoded = request.image.trim_start_matches("data:image/png;base64,");
        assert_eq!(BASE64_ENGINE.decode(encoded).unwrap(), PNG_HEADER.to_vec());
    }

    #[test]
    fn test_prepare_image_rejects_bad_input() {
        let err = prepare_image("notes.txt", b"hello").unwrap_err();
        assert_eq!(err.user_message(), "Unsupported file type. Allowed: JPEG, PNG, WebP, GIF.");

        let err = prepare_image("empty.png", &[]).unwrap_err();
        assert_eq!(err.user_message(), "Empty file");

        let err = prepare_image("fake.jpg", b"%PDF-1.7 not an image").unwrap_err();
        assert_eq!(err.user_message(), "File content does not match an allowed image type.");

        let mut big = PNG_HEADER.to_vec();
        big.resize(MAX_FILE_SIZE + 1, 0);
        let err = prepare_image("big.png", &big).unwrap_err();
        assert_eq!(err.user_message(), "File too large. Maximum size is 5MB.");
    }
}
