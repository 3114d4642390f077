use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use pubdate::cli::NerArgs;
use pubdate::dataset::{Dataset, COL_TIME_LIST};
use pubdate::dates::parse_candidate_list;
use pubdate::logging::configure_logging;
use pubdate::pipeline::{extract_candidates, TracingReporter};

#[derive(Parser, Debug)]
#[command(about = "Shortlist date candidates in every document with a NER model")]
struct Args {
    /// Input table with a 'raw_text_content' column
    #[arg(long)]
    csv: PathBuf,

    /// Output table (defaults to <input stem>_ner.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    ner: NerArgs,
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    PathBuf::from(format!("{}_ner.csv", stem))
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let dataset = Dataset::from_path(&args.csv)?;
    println!("Loaded {} rows", dataset.len());

    let backend = args.ner.backend()?;
    let output = extract_candidates(&dataset, backend.as_ref(), args.ner.chunk_chars, &TracingReporter).await?;

    let with_dates = output
        .column(COL_TIME_LIST)
        .into_iter()
        .filter(|cell| !parse_candidate_list(cell.unwrap_or("")).is_empty())
        .count();
    let path = args.output.unwrap_or_else(|| default_output(&args.csv));
    output.write_to_path(&path)?;

    println!("Documents with at least one candidate: {} of {}", with_dates, output.len());
    println!("Results saved to {}", path.display());
    Ok(())
}
