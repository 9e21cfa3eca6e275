use crate::constants::{DEFAULT_UPLOAD_PRESET, DEFAULT_UPLOAD_URL};
use crate::error::{CompressionError, Result};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub upload_url: String,
    pub upload_preset: String,
    pub folder: Option<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            folder: None,
        }
    }
}

impl UploadOptions {
    pub fn new(
        upload_url: Option<String>,
        upload_preset: Option<String>,
        folder: Option<String>,
    ) -> Self {
        Self {
            upload_url: upload_url.unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string()),
            upload_preset: upload_preset.unwrap_or_else(|| DEFAULT_UPLOAD_PRESET.to_string()),
            folder,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Generates a unique public id for an uploaded photo.
pub fn generate_image_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Uploads an encoded JPEG buffer to the unsigned-upload endpoint.
///
/// The request is a multipart/form-data POST carrying the blob plus the
/// `upload_preset`, `public_id` and optional `folder` fields. The endpoint
/// answers with a JSON document whose `secure_url` is the public URL.
///
/// # Arguments
/// * `data` - JPEG bytes, ownership transferred to the request body
/// * `file_name` - File name recorded in the multipart part
/// * `public_id` - Storage identifier for the blob
/// * `options` - Endpoint configuration
///
/// # Returns
/// * `Ok(secure_url)` - Public URL of the stored photo
/// * `Err(CompressionError::Upload)` - If the request fails or the response is not 2xx
pub async fn upload_blob_async(
    data: Vec<u8>,
    file_name: &str,
    public_id: &str,
    options: &UploadOptions,
) -> Result<String> {
    let part = Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str("image/jpeg")
        .map_err(|e| CompressionError::Upload(format!("invalid mime type: {}", e)))?;

    let mut form = Form::new()
        .part("file", part)
        .text("upload_preset", options.upload_preset.clone())
        .text("public_id", public_id.to_string());

    if let Some(folder) = &options.folder {
        form = form.text("folder", folder.clone());
    }

    let client = reqwest::Client::new();
    let response = client
        .post(&options.upload_url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| CompressionError::Upload(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        // The endpoint reports failures as {"error": {"message": ...}}
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);
        return Err(CompressionError::Upload(format!(
            "HTTP {}: {}",
            status, detail
        )));
    }

    let parsed: UploadResponse = response
        .json()
        .await
        .map_err(|e| CompressionError::Upload(format!("invalid upload response: {}", e)))?;

    Ok(parsed.secure_url)
}

pub fn upload_blob_sync(
    data: Vec<u8>,
    file_name: &str,
    public_id: &str,
    options: &UploadOptions,
) -> Result<String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CompressionError::Upload(format!("failed to create runtime: {}", e)))?;

    runtime.block_on(upload_blob_async(data, file_name, public_id, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_options_default() {
        let options = UploadOptions::default();
        assert_eq!(
            options.upload_url,
            "https://api.cloudinary.com/v1_1/signaleo/image/upload"
        );
        assert_eq!(options.upload_preset, "app_reports");
        assert_eq!(options.folder, None);
    }

    #[test]
    fn test_upload_options_new() {
        let options = UploadOptions::new(
            Some("https://custom.endpoint.com/upload".to_string()),
            Some("custom_preset".to_string()),
            Some("reports/42".to_string()),
        );

        assert_eq!(options.upload_url, "https://custom.endpoint.com/upload");
        assert_eq!(options.upload_preset, "custom_preset");
        assert_eq!(options.folder, Some("reports/42".to_string()));
    }

    #[test]
    fn test_generate_image_id_unique() {
        let a = generate_image_id();
        let b = generate_image_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_upload_blob_async_unreachable_endpoint() {
        let options = UploadOptions::new(
            Some("http://127.0.0.1:1/upload".to_string()),
            None,
            None,
        );
        let result = upload_blob_async(vec![0xFF, 0xD8], "x.jpg", "x", &options).await;
        assert!(matches!(result, Err(CompressionError::Upload(_))));
    }
}
