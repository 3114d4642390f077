use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pubdate::dataset::{Dataset, COL_CLEANED_GOLD_LABEL, COL_CLEANED_PREDICTION_DATE};
use pubdate::logging::configure_logging;
use pubdate::pipeline::{clean_dates, TracingReporter};

#[derive(Parser, Debug)]
#[command(about = "Normalise predicted and gold dates to DD/MM/YYYY")]
struct Args {
    /// Table produced by predict_dates
    input_csv: PathBuf,

    /// Output table
    #[arg(short, long)]
    output_csv: PathBuf,
}

fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let dataset = Dataset::from_path(&args.input_csv)?;
    let output = clean_dates(&dataset, &TracingReporter);
    output.write_to_path(&args.output_csv)?;

    let count = |column: &str| output.column(column).iter().filter(|v| v.is_some()).count();
    println!(
        "Normalised predictions: {} of {}",
        count(COL_CLEANED_PREDICTION_DATE),
        output.len()
    );
    println!("Normalised gold labels: {} of {}", count(COL_CLEANED_GOLD_LABEL), output.len());
    println!("Results saved to {}", args.output_csv.display());
    Ok(())
}
