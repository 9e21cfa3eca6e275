use crate::cloudinary::{generate_image_id, upload_blob_async, UploadOptions};
use crate::compress::{compress_source, CompressOptions};
use crate::error::{CompressionError, Result};

/// Record of one uploaded report photo.
#[derive(Debug, Clone)]
pub struct ImageReport {
    pub id: String,
    pub report_id: String,
    pub url: String,
}

/// Compresses and uploads every photo of a report.
///
/// Photos are processed sequentially to avoid saturating the connection.
/// Blobs are stored under `reports/{report_id}` as `{id}_{index}.jpg`.
/// Per-photo failures are collected and reported; the call fails only
/// when no photo could be uploaded at all.
///
/// # Returns
/// * `Ok(reports)` - One `ImageReport` per successfully uploaded photo
/// * `Err(CompressionError::Upload)` - If every photo failed
pub async fn upload_report_photos(
    photos: &[String],
    report_id: &str,
    compress_options: &CompressOptions,
    upload_options: &UploadOptions,
) -> Result<Vec<ImageReport>> {
    if photos.is_empty() {
        return Ok(Vec::new());
    }

    let mut results = Vec::new();
    let mut errors = Vec::new();

    for (index, source) in photos.iter().enumerate() {
        match upload_single_photo(source, report_id, index, compress_options, upload_options).await
        {
            Ok(report) => {
                println!("✅ Photo {}/{} uploaded: {}", index + 1, photos.len(), report.url);
                results.push(report);
            }
            Err(e) => {
                eprintln!("❌ Photo {}/{} failed: {}", index + 1, photos.len(), e);
                errors.push(e.to_string());
            }
        }
    }

    if results.is_empty() && !errors.is_empty() {
        return Err(CompressionError::Upload(format!(
            "no photo could be uploaded:\n{}",
            errors.join("\n")
        )));
    }

    if !errors.is_empty() {
        eprintln!(
            "⚠️  {} photo(s) failed out of {}",
            errors.len(),
            photos.len()
        );
    }

    Ok(results)
}

async fn upload_single_photo(
    source: &str,
    report_id: &str,
    index: usize,
    compress_options: &CompressOptions,
    upload_options: &UploadOptions,
) -> Result<ImageReport> {
    let compressed = compress_source(source, compress_options).await?;

    let id = generate_image_id();
    let file_name = format!("{}_{}.jpg", id, index);
    let public_id = format!("{}_{}", id, index);

    let options = UploadOptions {
        folder: Some(format!("reports/{}", report_id)),
        ..upload_options.clone()
    };

    let url = upload_blob_async(compressed.data, &file_name, &public_id, &options).await?;

    Ok(ImageReport {
        id,
        report_id: report_id.to_string(),
        url,
    })
}

/// CLI entry point: compress the given photos and upload them for a report.
pub fn upload_photos_command(
    inputs: &[String],
    report_id: &str,
    upload_url: Option<String>,
    upload_preset: Option<String>,
    max_size: Option<u64>,
) -> Result<()> {
    println!("📤 Uploading {} photo(s) for report {}", inputs.len(), report_id);

    let compress_options = CompressOptions::new(max_size, None)?;
    let upload_options = UploadOptions::new(upload_url, upload_preset, None);

    println!("🔗 Upload URL: {}", upload_options.upload_url);
    println!("🔖 Preset: {}", upload_options.upload_preset);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CompressionError::Upload(format!("failed to create runtime: {}", e)))?;
    let reports = runtime.block_on(upload_report_photos(
        inputs,
        report_id,
        &compress_options,
        &upload_options,
    ))?;

    println!("✅ Upload complete: {}/{} photo(s)", reports.len(), inputs.len());
    for report in &reports {
        println!("🌐 {}", report.url);
    }

    Ok(())
}
