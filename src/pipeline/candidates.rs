use anyhow::Result;
use tracing::info;

use super::{ProgressReporter, Stage};
use crate::dataset::{Dataset, COL_LOCAL_FILENAME, COL_RAW_TEXT_CONTENT, COL_TIME_LIST};
use crate::dates::encode_candidate_list;
use crate::metrics::ResourceMonitor;
use crate::ner::{date_candidates, NerBackend};
use crate::TARGET_PIPELINE;

/// Fill `time_list` with the date shortlist of every document, in row order.
///
/// Rows without text get an empty list.
pub async fn extract_candidates(
    dataset: &Dataset,
    backend: &dyn NerBackend,
    chunk_chars: usize,
    reporter: &dyn ProgressReporter,
) -> Result<Dataset> {
    let total = dataset.len();
    reporter.stage_started(Stage::Candidates, total);

    let mut monitor = ResourceMonitor::new();
    let mut lists = Vec::with_capacity(total);
    for row in 0..total {
        let text = dataset.value(row, COL_RAW_TEXT_CONTENT).unwrap_or("");
        let candidates = if text.is_empty() {
            Vec::new()
        } else {
            date_candidates(backend, text, chunk_chars).await
        };

        let label = dataset
            .value(row, COL_LOCAL_FILENAME)
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", row));
        info!(target: TARGET_PIPELINE, "File: {}, Found {} dates", label, candidates.len());

        lists.push(Some(encode_candidate_list(&candidates)?));
        reporter.item_finished(Stage::Candidates, &label, total - row - 1);
        monitor.log_usage(row + 1);
    }

    let mut output = dataset.clone();
    output.set_column(COL_TIME_LIST, &lists);
    reporter.stage_finished(Stage::Candidates, total);
    Ok(output)
}
