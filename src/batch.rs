use crate::compress::{compress_to_target, CompressOptions};
use crate::constants::MAX_BATCH_FILES;
use crate::error::{CompressionError, Result};
use crate::source::load_path;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use walkdir::WalkDir;

/// Compresses every photo found under `input` into `output` as JPEG files,
/// in parallel.
///
/// # Arguments
/// * `input` - Directory path, single file, or glob pattern
/// * `output` - Output directory, created if missing
/// * `options` - Target size and dimension bound applied to every photo
/// * `recursive` - Descend into subdirectories when `input` is a directory
pub fn batch_compress_images(
    input: &str,
    output: &Path,
    options: &CompressOptions,
    recursive: bool,
) -> Result<()> {
    println!("🚀 Starting batch compression...");
    println!("📁 Input: {}", input);
    println!("📁 Output: {:?}", output);

    let start_time = Instant::now();

    let image_files = collect_image_files(input, recursive)?;
    let total_files = image_files.len();

    if total_files == 0 {
        println!("⚠️  No image files found in the input path");
        return Ok(());
    }

    if total_files > MAX_BATCH_FILES {
        return Err(CompressionError::BatchFileLimitExceeded(
            total_files,
            MAX_BATCH_FILES,
        ));
    }

    println!("📊 Found {} image files to process", total_files);

    fs::create_dir_all(output)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output.to_path_buf()))?;

    let main_progress = ProgressBar::new(total_files as u64);
    main_progress.set_style(ProgressStyle::default_bar());

    let processed_count = Arc::new(AtomicUsize::new(0));
    let total_size_before = Arc::new(AtomicU64::new(0));
    let total_size_after = Arc::new(AtomicU64::new(0));

    let results: Vec<Result<()>> = image_files
        .into_par_iter()
        .map(|input_path| {
            let progress = main_progress.clone();
            let processed_count = processed_count.clone();
            let total_size_before = total_size_before.clone();
            let total_size_after = total_size_after.clone();

            match process_single_photo(&input_path, output, options) {
                Ok((before_size, after_size)) => {
                    total_size_before.fetch_add(before_size, Ordering::Relaxed);
                    total_size_after.fetch_add(after_size, Ordering::Relaxed);
                    processed_count.fetch_add(1, Ordering::Relaxed);
                    progress.inc(1);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("❌ Failed to process {:?}: {}", input_path, e);
                    progress.inc(1);
                    Err(e)
                }
            }
        })
        .collect();

    main_progress.finish_with_message("✅ Batch compression complete");

    let total_before = total_size_before.load(Ordering::Relaxed);
    let total_after = total_size_after.load(Ordering::Relaxed);
    let compression_ratio = if total_before > 0 {
        ((total_before as f64 - total_after as f64) / total_before as f64) * 100.0
    } else {
        0.0
    };

    let elapsed_time = start_time.elapsed();

    println!("\n📊 Batch Compression Summary:");
    println!(
        "  📁 Total files processed: {}",
        processed_count.load(Ordering::Relaxed)
    );
    println!("  📊 Total original size: {} bytes", total_before);
    println!("  📊 Total compressed size: {} bytes", total_after);
    println!("  🎯 Overall compression ratio: {:.1}%", compression_ratio);
    println!("  ⏱️  Total time: {:?}", elapsed_time);

    let failed_count = results.iter().filter(|r| r.is_err()).count();
    if failed_count > 0 {
        println!("  ⚠️  Failed files: {}", failed_count);
    }

    Ok(())
}

pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    let input_path = Path::new(input);
    let canonical_input = if input_path.exists() {
        input_path
            .canonicalize()
            .map_err(|_| CompressionError::NoImageFilesFound(input.to_string()))?
    } else {
        input_path.to_path_buf()
    };

    if canonical_input.exists() && canonical_input.is_file() {
        image_files.push(canonical_input);
    } else if canonical_input.exists() && canonical_input.is_dir() {
        let walker = if recursive {
            WalkDir::new(&canonical_input).into_iter()
        } else {
            WalkDir::new(&canonical_input).max_depth(1).into_iter()
        };

        for entry in walker.filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.')) {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && is_image_file(path) {
                if let Ok(canonical_path) = path.canonicalize() {
                    image_files.push(canonical_path);
                }
            }
        }
    } else if let Ok(glob_pattern) = glob(input) {
        for entry in glob_pattern.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                if let Ok(canonical_path) = entry.canonicalize() {
                    image_files.push(canonical_path);
                }
            }
        }
    } else {
        return Err(CompressionError::NoImageFilesFound(input.to_string()));
    }

    Ok(image_files)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "webp" | "bmp" | "tiff" | "gif"
            )
        })
        .unwrap_or(false)
}

fn process_single_photo(
    input_path: &Path,
    output_dir: &Path,
    options: &CompressOptions,
) -> Result<(u64, u64)> {
    let output_path = generate_output_path(input_path, output_dir)?;

    let original_size = fs::metadata(input_path)?.len();
    let img = load_path(input_path)?;
    let compressed = compress_to_target(&img, options)?;
    fs::write(&output_path, &compressed.data)?;

    Ok((original_size, compressed.size_bytes()))
}

/// Output is always JPEG, so the extension is rewritten to `.jpg`.
pub fn generate_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| CompressionError::NoImageFilesFound(input_path.display().to_string()))?;

    let output_filename = format!("{}.jpg", file_stem.to_string_lossy());
    Ok(output_dir.join(output_filename))
}
