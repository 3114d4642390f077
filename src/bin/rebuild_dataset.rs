use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pubdate::cli::DownloadArgs;
use pubdate::dataset::{Dataset, COL_RAW_TEXT_CONTENT, COL_TEXT_CONTENT};
use pubdate::logging::configure_logging;
use pubdate::pipeline::{rebuild_dataset, TracingReporter};

#[derive(Parser, Debug)]
#[command(about = "Download every document of a dataset and keep the usable ones")]
struct Args {
    /// Source table with a 'text version' column
    input: PathBuf,

    /// Table of valid documents
    #[arg(short, long, default_value = "dataset_valid.csv")]
    output: PathBuf,

    /// Directory receiving the downloaded texts
    #[arg(long, env = "ARCHIVE_DIR", default_value = "txt")]
    archive_dir: PathBuf,

    #[command(flatten)]
    download: DownloadArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let dataset = Dataset::from_path(&args.input)?;
    let downloader = args.download.downloader()?;
    let (valid, summary) =
        rebuild_dataset(&dataset, &args.archive_dir, &downloader, &TracingReporter).await?;
    valid.write_to_path(&args.output)?;

    println!("Valid entries: {}", summary.valid);
    println!("Failed downloads: {}", summary.failed_urls.len());
    if !valid.is_empty() {
        println!("\nSample with URL:\n{}", valid.value(0, COL_TEXT_CONTENT).unwrap_or(""));
        println!("\nSample without URL:\n{}", valid.value(0, COL_RAW_TEXT_CONTENT).unwrap_or(""));
    }
    println!("\nResults saved to: {}", args.output.display());
    Ok(())
}
