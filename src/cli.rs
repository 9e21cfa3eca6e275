use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "signaleo-img",
    about = "Size-bounded JPEG compression and photo upload for Signaleo road-defect reports",
    long_about = "signaleo-img prepares citizen-submitted road-defect photos for upload: it \
                  produces JPEG blobs bounded to a target byte size (200 KiB by default) and a \
                  maximum dimension of 1280 px, and can push them to the unsigned-upload \
                  endpoint used by the Signaleo mobile client.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    signaleo-img compress photo.png photo.jpg -s 204800\n  \
    signaleo-img batch ./photos ./compressed -r\n  \
    signaleo-img upload photo1.jpg photo2.jpg -R a1b2c3\n  \
    signaleo-img info photo.png"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single photo to a size-bounded JPEG",
        long_about = "Compress a single photo to a JPEG at or below the target byte size. \
                      The input may be a local file, an http(s) URL, or a base64 data URL."
    )]
    Compress {
        #[arg(help = "Input photo: file path, http(s) URL, or base64 data URL")]
        input: String,

        #[arg(help = "Output JPEG file path")]
        output: PathBuf,

        #[arg(
            short = 's',
            long,
            help = "Target maximum size in bytes (default: 204800)",
            long_help = "Best-effort upper bound on the encoded output size. The quality \
                         search steps from 85% down to 10%, then a single dimension-reduction \
                         pass runs if the floor still overshoots."
        )]
        max_size: Option<u64>,

        #[arg(
            short = 'd',
            long,
            help = "Maximum pixel dimension (default: 1280)",
            long_help = "Bound on the longer side of the output. Smaller images are never \
                         upscaled; larger ones are scaled down preserving aspect ratio."
        )]
        max_dimension: Option<u32>,
    },

    #[command(
        about = "Compress multiple photos in parallel",
        long_about = "Process a directory, file, or glob pattern of photos in parallel, \
                      writing size-bounded JPEG outputs to the output directory."
    )]
    Batch {
        #[arg(
            help = "Input directory, file, or glob pattern",
            long_help = "Examples: './photos', 'photo.png', '/path/to/photos/*.jpg'"
        )]
        input: String,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[arg(short = 's', long, help = "Target maximum size in bytes (default: 204800)")]
        max_size: Option<u64>,

        #[arg(short = 'd', long, help = "Maximum pixel dimension (default: 1280)")]
        max_dimension: Option<u32>,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel threads (default: auto)",
            long_help = "Number of threads for parallel batch processing. \
                         If not specified, uses number of CPU cores."
        )]
        threads: Option<usize>,

        #[arg(short = 'r', long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Compress and upload report photos",
        long_about = "Compress each photo to the target size and upload it to the \
                      unsigned-upload endpoint, under the folder reports/{report-id}. \
                      Photos are uploaded sequentially; per-photo failures are reported \
                      and the command fails only when no photo could be uploaded."
    )]
    Upload {
        #[arg(required = true, help = "Photo(s) to upload: file paths or URLs")]
        inputs: Vec<String>,

        #[arg(short = 'R', long, help = "Report identifier used as the storage folder")]
        report: String,

        #[arg(
            short = 'u',
            long,
            help = "Custom unsigned-upload endpoint URL",
            long_help = "Override the default Cloudinary-style upload endpoint."
        )]
        upload_url: Option<String>,

        #[arg(short = 'p', long, help = "Unsigned upload preset (default: app_reports)")]
        preset: Option<String>,

        #[arg(short = 's', long, help = "Target maximum size in bytes (default: 204800)")]
        max_size: Option<u64>,
    },

    #[command(
        about = "Display photo information and the predicted compression outcome"
    )]
    Info {
        #[arg(help = "Photo file path to analyze")]
        input: PathBuf,
    },
}
