use crate::constants::{MAX_SOURCE_BYTES, MAX_SOURCE_DIMENSION};
use crate::error::{CompressionError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, GenericImageView};
use std::fs;
use std::path::Path;

/// Loads a source image reference into a decoded bitmap.
///
/// Accepts the same references the mobile client hands over: a local file
/// path, an `http(s)://` URL, or a base64 `data:` URL. This is the single
/// asynchronous suspension point of the compression pipeline; everything
/// after it runs synchronously.
///
/// # Returns
/// * `Ok(DynamicImage)` - The decoded bitmap
/// * `Err(CompressionError::ImageLoad)` - If the reference cannot be fetched or decoded
pub async fn load_source(source: &str) -> Result<DynamicImage> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(source).await?
    } else if let Some(rest) = source.strip_prefix("data:") {
        decode_data_url(source, rest)?
    } else {
        return load_path(Path::new(source));
    };

    if bytes.len() as u64 > MAX_SOURCE_BYTES {
        return Err(CompressionError::SourceTooLarge(
            bytes.len() as u64,
            MAX_SOURCE_BYTES,
        ));
    }

    decode_bytes(source, &bytes)
}

/// Blocking wrapper around [`load_source`] for CLI use.
pub fn load_source_sync(source: &str) -> Result<DynamicImage> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(load_source(source))
}

/// Loads and decodes an image from a local file.
///
/// # Security Features
/// - Validates file existence and canonical paths
/// - Enforces a maximum file size before reading
/// - Validates decoded dimensions to prevent memory exhaustion
pub fn load_path(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    let canonical_path = path
        .canonicalize()
        .map_err(|_| CompressionError::FileNotFound(path.to_path_buf()))?;

    let file_size = fs::metadata(&canonical_path)?.len();
    if file_size > MAX_SOURCE_BYTES {
        return Err(CompressionError::SourceTooLarge(file_size, MAX_SOURCE_BYTES));
    }

    let bytes = fs::read(&canonical_path)?;
    decode_bytes(&path.to_string_lossy(), &bytes)
}

async fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let mut response = reqwest::get(url)
        .await
        .map_err(|e| CompressionError::ImageLoad(url.to_string(), e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CompressionError::ImageLoad(
            url.to_string(),
            format!("HTTP status {}", status),
        ));
    }

    // Reject oversized bodies before reading when the server declares a length
    if let Some(length) = response.content_length() {
        if length > MAX_SOURCE_BYTES {
            return Err(CompressionError::SourceTooLarge(length, MAX_SOURCE_BYTES));
        }
    }

    // Stream with a running cap so an undeclared or lying length cannot
    // buffer more than the source limit
    let mut bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| CompressionError::ImageLoad(url.to_string(), e.to_string()))?
    {
        let received = bytes.len() as u64 + chunk.len() as u64;
        if received > MAX_SOURCE_BYTES {
            return Err(CompressionError::SourceTooLarge(received, MAX_SOURCE_BYTES));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

fn decode_data_url(source: &str, rest: &str) -> Result<Vec<u8>> {
    let (meta, payload) = rest.split_once(',').ok_or_else(|| {
        CompressionError::ImageLoad(source_label(source), "malformed data URL".to_string())
    })?;

    if !meta.ends_with(";base64") {
        return Err(CompressionError::ImageLoad(
            source_label(source),
            "only base64 data URLs are supported".to_string(),
        ));
    }

    BASE64
        .decode(payload)
        .map_err(|e| CompressionError::ImageLoad(source_label(source), e.to_string()))
}

fn decode_bytes(source: &str, bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CompressionError::ImageLoad(source_label(source), e.to_string()))?;

    let (width, height) = img.dimensions();
    if width > MAX_SOURCE_DIMENSION || height > MAX_SOURCE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_SOURCE_DIMENSION,
        ));
    }

    Ok(img)
}

/// Error labels for data URLs omit the payload, which can run to megabytes.
fn source_label(source: &str) -> String {
    match source.split_once(',') {
        Some((meta, _)) if source.starts_with("data:") => format!("{},...", meta),
        _ => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Serves a single HTTP response on a local port and returns its URL.
    /// The declared length may differ from the actual body to exercise the
    /// download guards.
    async fn serve_once(body: Vec<u8>, declared_length: Option<u64>) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).await;

            let length = declared_length.unwrap_or(body.len() as u64);
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                length
            );
            let _ = stream.write_all(header.as_bytes()).await;
            let _ = stream.write_all(&body).await;
            let _ = stream.shutdown().await;
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_load_source_remote_url() {
        let url = serve_once(png_bytes(6, 5), None).await;

        let img = load_source(&url).await.unwrap();
        assert_eq!(img.dimensions(), (6, 5));
    }

    #[tokio::test]
    async fn test_load_source_remote_unreachable() {
        let result = load_source("http://127.0.0.1:1/photo.jpg").await;
        assert!(matches!(result, Err(CompressionError::ImageLoad(_, _))));
    }

    #[tokio::test]
    async fn test_load_source_remote_oversized_declared_length() {
        // The declared length is rejected before any body byte is buffered
        let url = serve_once(png_bytes(6, 5), Some(MAX_SOURCE_BYTES + 1)).await;

        let result = load_source(&url).await;
        assert!(matches!(
            result,
            Err(CompressionError::SourceTooLarge(_, _))
        ));
    }

    #[test]
    fn test_load_path_not_found() {
        let result = load_path(Path::new("nonexistent.jpg"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_source_missing_file() {
        // An invalid reference surfaces an error, never a partial buffer.
        let result = load_source("nonexistent.jpg").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_source_data_url() {
        let encoded = BASE64.encode(png_bytes(4, 3));
        let url = format!("data:image/png;base64,{}", encoded);

        let img = load_source(&url).await.unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }

    #[tokio::test]
    async fn test_load_source_malformed_data_url() {
        let result = load_source("data:image/png;base64").await;
        assert!(matches!(result, Err(CompressionError::ImageLoad(_, _))));
    }

    #[tokio::test]
    async fn test_load_source_non_base64_data_url() {
        let result = load_source("data:text/plain,hello").await;
        assert!(matches!(result, Err(CompressionError::ImageLoad(_, _))));
    }

    #[tokio::test]
    async fn test_load_source_undecodable_payload() {
        let encoded = BASE64.encode(b"not an image at all");
        let url = format!("data:image/png;base64,{}", encoded);

        let result = load_source(&url).await;
        assert!(matches!(result, Err(CompressionError::ImageLoad(_, _))));
    }

    #[test]
    fn test_load_path_decodes_real_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, png_bytes(8, 8)).unwrap();

        let img = load_path(&path).unwrap();
        assert_eq!(img.dimensions(), (8, 8));
    }

    #[test]
    fn test_source_label_truncates_data_urls() {
        let label = source_label("data:image/png;base64,AAAA");
        assert_eq!(label, "data:image/png;base64,...");

        let label = source_label("photo.jpg");
        assert_eq!(label, "photo.jpg");
    }
}
