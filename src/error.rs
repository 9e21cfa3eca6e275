use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load image from {0}: {1}")]
    ImageLoad(String, String),

    #[error("Failed to create render surface of {0}x{1} pixels")]
    RenderSurface(u32, u32),

    #[error("JPEG encoding error: {0}")]
    Encoding(String),

    #[error("Invalid target size: must be at least 1 byte")]
    InvalidTargetSize,

    #[error("Invalid dimension bound: must be at least 1 pixel")]
    InvalidDimensionBound,

    #[error("Image dimensions too large: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("Source too large: {0} bytes. Maximum allowed: {1} bytes")]
    SourceTooLarge(u64, u64),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Batch file count limit exceeded: {0} files, maximum allowed {1}")]
    BatchFileLimitExceeded(usize, usize),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Upload error: {0}")]
    Upload(String),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
