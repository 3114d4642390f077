use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pubdate::cli::{DownloadArgs, LlmArgs, NerArgs};
use pubdate::dataset::Dataset;
use pubdate::logging::configure_logging;
use pubdate::pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(about = "Run every stage from download to evaluation")]
struct Args {
    /// Source table with 'text version', 'published' and 'Gold_label' columns
    input: PathBuf,

    /// Directory receiving the archived texts and every intermediate table
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    #[command(flatten)]
    download: DownloadArgs,

    #[command(flatten)]
    ner: NerArgs,

    #[command(flatten)]
    llm: LlmArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let dataset = Dataset::from_path(&args.input)?;
    let pipeline = Pipeline::new(
        args.download.downloader()?,
        args.ner.backend()?,
        args.llm.selector()?,
    )
    .with_chunk_chars(args.ner.chunk_chars);

    let summary = pipeline.run(&dataset, &args.output_dir).await?;

    println!("Valid entries: {} of {}", summary.rebuild.valid, summary.rebuild.total);
    println!("{}", summary.accuracy);
    println!("\nResults saved to: {}", summary.evaluation_path.display());
    Ok(())
}
