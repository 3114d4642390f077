use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pubdate::dataset::Dataset;
use pubdate::logging::configure_logging;
use pubdate::pipeline::{evaluate, evaluation_output_path, TracingReporter};

#[derive(Parser, Debug)]
#[command(about = "Score given and predicted dates against the gold labels")]
struct Args {
    /// Table produced by clean_dates
    #[arg(short, long)]
    input_file: PathBuf,

    /// A .csv file, or a directory that receives evaluation.csv
    #[arg(short, long)]
    output_file: PathBuf,
}

fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let dataset = Dataset::from_path(&args.input_file)?;
    let evaluation = evaluate(&dataset, &TracingReporter);

    println!("{}", evaluation.report);

    let output_path = evaluation_output_path(&args.output_file);
    evaluation.table.write_to_path(&output_path)?;
    println!("\nResults saved to: {}", output_path.display());
    Ok(())
}
