pub mod batch;
pub mod cli;
pub mod cloudinary;
pub mod compress;
pub mod constants;
pub mod error;
pub mod info;
pub mod source;
pub mod upload;

pub use batch::{batch_compress_images, collect_image_files, generate_output_path, is_image_file};
pub use cloudinary::{generate_image_id, upload_blob_async, upload_blob_sync, UploadOptions};
pub use compress::{
    compress_file, compress_source, compress_to_target, encode_jpeg, fit_dimensions,
    CompressOptions, CompressedImage,
};
pub use error::{CompressionError, Result};
pub use info::show_photo_info;
pub use source::{load_path, load_source, load_source_sync};
pub use upload::{upload_photos_command, upload_report_photos, ImageReport};
