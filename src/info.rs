use crate::compress::fit_dimensions;
use crate::constants::{DEFAULT_MAX_BYTES, DEFAULT_MAX_DIMENSION};
use crate::error::{CompressionError, Result};
use crate::source::load_path;
use image::GenericImageView;
use std::fs;
use std::path::Path;

/// Prints dimensions, size and the predicted compression outcome for a photo.
pub fn show_photo_info(input_path: &Path) -> Result<()> {
    if !input_path.exists() {
        return Err(CompressionError::FileNotFound(input_path.to_path_buf()));
    }

    println!("📊 Analyzing photo: {:?}", input_path);

    let img = load_path(input_path)?;
    let metadata = fs::metadata(input_path)?;
    let (width, height) = img.dimensions();

    println!("📋 Basic Information:");
    println!("  📁 File: {:?}", input_path);
    println!("  📏 Dimensions: {}x{} pixels", width, height);
    println!("  📦 File size: {} bytes", metadata.len());
    println!("  🎨 Color type: {:?}", img.color());

    let size_kb = metadata.len() as f64 / 1024.0;
    let size_mb = size_kb / 1024.0;
    if size_mb >= 1.0 {
        println!("  📊 Size: {:.2} MB ({:.2} KB)", size_mb, size_kb);
    } else {
        println!("  📊 Size: {:.2} KB", size_kb);
    }

    let aspect_ratio = f64::from(width) / f64::from(height);
    println!("  📐 Aspect ratio: {:.2}:1", aspect_ratio);

    println!("\n💡 Compression Preview:");

    let (out_width, out_height) = fit_dimensions(width, height, DEFAULT_MAX_DIMENSION);
    if (out_width, out_height) == (width, height) {
        println!(
            "  📏 Within the {} px bound, dimensions kept as-is",
            DEFAULT_MAX_DIMENSION
        );
    } else {
        println!(
            "  📏 Will be resized to {}x{} ({} px bound)",
            out_width, out_height, DEFAULT_MAX_DIMENSION
        );
    }

    if metadata.len() <= DEFAULT_MAX_BYTES {
        println!(
            "  🎯 Already at or below the {} byte target; re-encoding may still shrink it",
            DEFAULT_MAX_BYTES
        );
    } else {
        println!(
            "  🎯 Above the {} byte target; the quality search will run",
            DEFAULT_MAX_BYTES
        );
    }

    Ok(())
}
