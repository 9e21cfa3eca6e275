use crate::constants::{
    DEFAULT_MAX_BYTES, DEFAULT_MAX_DIMENSION, JPEG_FALLBACK_QUALITY, JPEG_QUALITY_FLOOR,
    JPEG_QUALITY_START, JPEG_QUALITY_STEP,
};
use crate::error::{CompressionError, Result};
use crate::source::load_source_sync;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{imageops, DynamicImage, GenericImageView, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct CompressOptions {
    pub max_bytes: u64,
    pub max_dimension: u32,
}

impl CompressOptions {
    pub fn new(max_bytes: Option<u64>, max_dimension: Option<u32>) -> Result<Self> {
        let max_bytes = max_bytes.unwrap_or(DEFAULT_MAX_BYTES);
        if max_bytes == 0 {
            return Err(CompressionError::InvalidTargetSize);
        }

        let max_dimension = max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION);
        if max_dimension == 0 {
            return Err(CompressionError::InvalidDimensionBound);
        }

        Ok(Self {
            max_bytes,
            max_dimension,
        })
    }
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// A JPEG-encoded photo ready for upload, along with the final pixel
/// dimensions and the quality percent that produced it.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl CompressedImage {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// Quality as the [0, 1] factor the JPEG encoder interprets.
    pub fn quality_factor(&self) -> f32 {
        f32::from(self.quality) / 100.0
    }
}

/// Computes output dimensions bounded by `max_dim`, preserving aspect ratio.
///
/// Images already within the bound keep their dimensions (no upscaling).
/// Otherwise the longer side is scaled to exactly `max_dim` and the shorter
/// side rounded to the nearest pixel. A square larger than the bound maps
/// to `max_dim x max_dim`.
pub fn fit_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width <= max_dim && height <= max_dim {
        return (width, height);
    }

    // Extreme aspect ratios can round the shorter side to zero; clamp to
    // one pixel so decodable inputs stay compressible
    if width >= height {
        let scaled = (f64::from(max_dim) * f64::from(height) / f64::from(width)).round() as u32;
        (max_dim, scaled.max(1))
    } else {
        let scaled = (f64::from(max_dim) * f64::from(width) / f64::from(height)).round() as u32;
        (scaled.max(1), max_dim)
    }
}

/// Encodes an RGB surface to JPEG at the given quality percent (1-100).
pub fn encode_jpeg(surface: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, quality);
    surface
        .write_with_encoder(encoder)
        .map_err(|e| CompressionError::Encoding(e.to_string()))?;

    if data.is_empty() {
        return Err(CompressionError::Encoding(format!(
            "encoder produced no output at quality {}",
            quality
        )));
    }

    Ok(data)
}

/// Produces a size-bounded JPEG from a decoded image.
///
/// Pipeline: flatten to RGB, resize so the longer side fits
/// `options.max_dimension`, then encode starting at quality 85 and step
/// down by 5 while the output exceeds `options.max_bytes`, stopping at
/// quality 10. If the floor still overshoots, one dimension-reduction
/// pass scales both sides by sqrt(target / current size) and re-encodes
/// once at quality 70. The result of that pass is returned even when it
/// remains above the target (best effort, not a hard guarantee).
///
/// # Arguments
/// * `img` - Decoded source image; not modified
/// * `options` - Target byte size and dimension bound
///
/// # Returns
/// * `Ok(CompressedImage)` - Encoded buffer with final dimensions and quality
/// * `Err(CompressionError)` - If a render surface cannot be produced or encoding fails
pub fn compress_to_target(img: &DynamicImage, options: &CompressOptions) -> Result<CompressedImage> {
    let (src_width, src_height) = img.dimensions();
    let (width, height) = fit_dimensions(src_width, src_height, options.max_dimension);

    // JPEG carries no alpha channel
    let bitmap = img.to_rgb8();
    let surface = render_surface(&bitmap, width, height)?;

    let mut quality = JPEG_QUALITY_START;
    let mut data = encode_jpeg(&surface, quality)?;

    while data.len() as u64 > options.max_bytes && quality > JPEG_QUALITY_FLOOR {
        quality -= JPEG_QUALITY_STEP;
        data = encode_jpeg(&surface, quality)?;
    }

    let (mut out_width, mut out_height) = (width, height);

    // Quality floor reached and still over target: shrink dimensions once,
    // assuming encoded size scales roughly with pixel count.
    if data.len() as u64 > options.max_bytes {
        let scale = (options.max_bytes as f64 / data.len() as f64).sqrt();
        let reduced_width = (f64::from(width) * scale).round() as u32;
        let reduced_height = (f64::from(height) * scale).round() as u32;

        let reduced = render_surface(&bitmap, reduced_width, reduced_height)?;
        quality = JPEG_FALLBACK_QUALITY;
        data = encode_jpeg(&reduced, quality)?;
        out_width = reduced_width;
        out_height = reduced_height;
    }

    Ok(CompressedImage {
        data,
        width: out_width,
        height: out_height,
        quality,
    })
}

/// Redraws the source bitmap at the requested dimensions.
fn render_surface(bitmap: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        return Err(CompressionError::RenderSurface(width, height));
    }

    if (width, height) == bitmap.dimensions() {
        Ok(bitmap.clone())
    } else {
        Ok(imageops::resize(bitmap, width, height, FilterType::Lanczos3))
    }
}

/// Loads an image from any supported source reference and compresses it
/// to the target size.
pub async fn compress_source(source: &str, options: &CompressOptions) -> Result<CompressedImage> {
    let img = crate::source::load_source(source).await?;
    compress_to_target(&img, options)
}

/// CLI entry point: compress a source reference and write the JPEG to disk.
pub fn compress_file(input: &str, output: &Path, options: &CompressOptions) -> Result<()> {
    println!("🗜️  Compressing photo: {}", input);
    println!("📁 Output: {:?}", output);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading image...");

    let img = load_source_sync(input)?;
    pb.finish_with_message("✅ Image loaded");

    let (src_width, src_height) = img.dimensions();
    println!("📊 Source: {}x{} pixels", src_width, src_height);

    let compressed = compress_to_target(&img, options)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }
    fs::write(output, &compressed.data)?;

    println!(
        "📈 Compressed: {} bytes ({}x{}, quality {}%)",
        compressed.size_bytes(),
        compressed.width,
        compressed.height,
        compressed.quality
    );

    if compressed.size_bytes() > options.max_bytes {
        println!(
            "⚠️  Output still exceeds target of {} bytes (best effort)",
            options.max_bytes
        );
    } else {
        println!("✅ Output fits target of {} bytes", options.max_bytes);
    }

    Ok(())
}
