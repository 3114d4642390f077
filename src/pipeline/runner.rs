use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::{
    clean_dates, evaluate, extract_candidates, predict_dates, rebuild_dataset, ProgressReporter,
    RebuildSummary, TracingReporter,
};
use crate::dataset::Dataset;
use crate::download::Downloader;
use crate::ner::{NerBackend, DEFAULT_CHUNK_CHARS};
use crate::scoring::AccuracyReport;
use crate::selector::CandidateSelector;
use crate::TARGET_PIPELINE;

pub const ARCHIVE_DIR: &str = "txt";
pub const VALID_TABLE: &str = "dataset_valid.csv";
pub const CANDIDATES_TABLE: &str = "dataset_valid_ner.csv";
pub const PREDICTIONS_TABLE: &str = "final_results_predicted.csv";
pub const CLEANED_TABLE: &str = "cleaned_dates.csv";
pub const EVALUATION_TABLE: &str = "evaluation.csv";

#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub rebuild: RebuildSummary,
    pub accuracy: AccuracyReport,
    pub evaluation_path: PathBuf,
}

/// Runs every stage in order, saving each intermediate table so that a run
/// can be resumed with the individual stage binaries.
pub struct Pipeline {
    downloader: Downloader,
    ner: Arc<dyn NerBackend>,
    chunk_chars: usize,
    selector: CandidateSelector,
    reporter: Arc<dyn ProgressReporter>,
}

impl Pipeline {
    pub fn new(downloader: Downloader, ner: Arc<dyn NerBackend>, selector: CandidateSelector) -> Self {
        Pipeline {
            downloader,
            ner,
            chunk_chars: DEFAULT_CHUNK_CHARS,
            selector,
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.chunk_chars = chunk_chars;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub async fn run(&self, input: &Dataset, output_dir: &Path) -> Result<PipelineSummary> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        let reporter = self.reporter.as_ref();

        let (valid, rebuild) = rebuild_dataset(
            input,
            &output_dir.join(ARCHIVE_DIR),
            &self.downloader,
            reporter,
        )
        .await?;
        save(&valid, output_dir, VALID_TABLE)?;

        let with_candidates =
            extract_candidates(&valid, self.ner.as_ref(), self.chunk_chars, reporter).await?;
        save(&with_candidates, output_dir, CANDIDATES_TABLE)?;

        let predicted = predict_dates(&with_candidates, &self.selector, reporter).await?;
        save(&predicted, output_dir, PREDICTIONS_TABLE)?;

        let cleaned = clean_dates(&predicted, reporter);
        save(&cleaned, output_dir, CLEANED_TABLE)?;

        let evaluation = evaluate(&cleaned, reporter);
        let evaluation_path = save(&evaluation.table, output_dir, EVALUATION_TABLE)?;

        Ok(PipelineSummary {
            rebuild,
            accuracy: evaluation.report,
            evaluation_path,
        })
    }
}

fn save(table: &Dataset, output_dir: &Path, name: &str) -> Result<PathBuf> {
    let path = output_dir.join(name);
    table.write_to_path(&path)?;
    info!(target: TARGET_PIPELINE, "Results saved to {} ({} rows)", path.display(), table.len());
    Ok(path)
}
