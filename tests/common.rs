use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes a real decodable PNG of the given dimensions.
pub fn create_test_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::new_rgb8(width, height).save(&path).unwrap();
    path
}

/// Writes a PNG filled with deterministic noise, which resists JPEG
/// compression and exercises the quality search.
pub fn create_noisy_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let mut state = 0x9e3779b97f4a7c15_u64;
    let buffer = RgbImage::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        Rgb([
            (state >> 16) as u8,
            (state >> 32) as u8,
            (state >> 48) as u8,
        ])
    });
    let path = dir.join(name);
    DynamicImage::ImageRgb8(buffer).save(&path).unwrap();
    path
}
