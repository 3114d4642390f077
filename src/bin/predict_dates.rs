use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pubdate::cli::LlmArgs;
use pubdate::dataset::{Dataset, COL_PREDICTED_TIME, COL_PREDICTION_IN_CANDIDATES};
use pubdate::logging::configure_logging;
use pubdate::pipeline::{predict_dates, TracingReporter};

#[derive(Parser, Debug)]
#[command(about = "Pick the publication date of every document among its candidates")]
struct Args {
    /// Table produced by extract_candidates
    #[arg(short, long, default_value = "dataset_valid_ner.csv")]
    input: PathBuf,

    /// Table of predictions
    #[arg(short, long, default_value = "final_results_predicted.csv")]
    output: PathBuf,

    #[command(flatten)]
    llm: LlmArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let dataset = Dataset::from_path(&args.input)?;
    let selector = args.llm.selector()?;
    let output = predict_dates(&dataset, &selector, &TracingReporter).await?;
    output.write_to_path(&args.output)?;

    let answered = output.column(COL_PREDICTED_TIME).iter().filter(|v| v.is_some()).count();
    let off_list = output
        .column(COL_PREDICTION_IN_CANDIDATES)
        .iter()
        .filter(|v| **v == Some("false"))
        .count();
    println!("Predictions: {} of {} documents", answered, output.len());
    println!("Answers outside the candidate list: {}", off_list);
    println!("Results saved to {}", args.output.display());
    Ok(())
}
