/// Default upper bound on the encoded output size (200 KiB).
pub const DEFAULT_MAX_BYTES: u64 = 200 * 1024;

/// Default bound on the longer pixel dimension of the output.
pub const DEFAULT_MAX_DIMENSION: u32 = 1280;

/// JPEG quality ladder, in percent. The search starts at
/// `JPEG_QUALITY_START` and steps down by `JPEG_QUALITY_STEP` until the
/// output fits the target or `JPEG_QUALITY_FLOOR` is reached.
pub const JPEG_QUALITY_START: u8 = 85;
pub const JPEG_QUALITY_STEP: u8 = 5;
pub const JPEG_QUALITY_FLOOR: u8 = 10;

/// Quality used for the single dimension-reduction pass taken when the
/// floor alone cannot meet the target.
pub const JPEG_FALLBACK_QUALITY: u8 = 70;

/// Maximum accepted source size in bytes (64 MiB).
pub const MAX_SOURCE_BYTES: u64 = 64 * 1024 * 1024;

/// Maximum accepted source dimension, as a decompression-bomb guard.
pub const MAX_SOURCE_DIMENSION: u32 = 16384;

pub const MAX_BATCH_FILES: usize = 1000;

pub const DEFAULT_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1/signaleo/image/upload";
pub const DEFAULT_UPLOAD_PRESET: &str = "app_reports";
