use clap::Parser;
use rayon::ThreadPoolBuilder;
use signaleo_img::cli::{Args, Commands};
use signaleo_img::compress::{compress_file, CompressOptions};
use signaleo_img::{batch_compress_images, show_photo_info, upload_photos_command};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Compress {
            input,
            output,
            max_size,
            max_dimension,
        } => {
            let options = CompressOptions::new(max_size, max_dimension)?;
            compress_file(&input, &output, &options)?;
        }
        Commands::Batch {
            input,
            output,
            max_size,
            max_dimension,
            threads,
            recursive,
        } => {
            setup_thread_pool(threads);
            let options = CompressOptions::new(max_size, max_dimension)?;
            batch_compress_images(&input, &output, &options, recursive)?;
        }
        Commands::Upload {
            inputs,
            report,
            upload_url,
            preset,
            max_size,
        } => {
            upload_photos_command(&inputs, &report, upload_url, preset, max_size)?;
        }
        Commands::Info { input } => {
            show_photo_info(&input)?;
        }
    }

    Ok(())
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to set thread pool size: {}", e);
            });
    }
}
