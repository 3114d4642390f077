use anyhow::Result;
use tracing::{error, info};

use super::{ProgressReporter, Stage};
use crate::dataset::{
    Dataset, COL_CACHE, COL_DOC_ID, COL_ENTITY, COL_ENTITY_TYPE, COL_GOLD_LABEL,
    COL_LOCAL_FILENAME, COL_NATURE, COL_PREDICTED_TIME, COL_PREDICTION_IN_CANDIDATES,
    COL_PUBLISHED, COL_TEXT_CONTENT, COL_TEXT_VERSION, COL_TIME_LIST, COL_URL,
};
use crate::dates::parse_candidate_list;
use crate::selector::CandidateSelector;
use crate::util::prompt_context;
use crate::TARGET_PIPELINE;

const OUTPUT_COLUMNS: [&str; 12] = [
    COL_DOC_ID,
    COL_URL,
    COL_CACHE,
    COL_TEXT_VERSION,
    COL_NATURE,
    COL_PUBLISHED,
    COL_ENTITY,
    COL_ENTITY_TYPE,
    COL_TIME_LIST,
    COL_PREDICTED_TIME,
    COL_PREDICTION_IN_CANDIDATES,
    COL_GOLD_LABEL,
];

/// Ask the model for the publication date of every document, one request per
/// row in table order.
///
/// A failed request leaves `predicted_time` empty for that row.
pub async fn predict_dates(
    dataset: &Dataset,
    selector: &CandidateSelector,
    reporter: &dyn ProgressReporter,
) -> Result<Dataset> {
    let total = dataset.len();
    reporter.stage_started(Stage::Selection, total);

    let mut predictions: Vec<Option<String>> = Vec::with_capacity(total);
    let mut containment: Vec<Option<&str>> = Vec::with_capacity(total);

    for row in 0..total {
        let label = dataset
            .value(row, COL_LOCAL_FILENAME)
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", row));
        let context = prompt_context(dataset.value(row, COL_TEXT_CONTENT).unwrap_or(""));
        let candidates = parse_candidate_list(dataset.value(row, COL_TIME_LIST).unwrap_or(""));

        match selector.select(&context, &candidates).await {
            Ok(selection) => {
                info!(target: TARGET_PIPELINE, "{}: predicted '{}'", label, selection.text);
                containment.push(Some(if selection.in_candidates { "true" } else { "false" }));
                predictions.push(Some(selection.text));
            }
            Err(e) => {
                error!(target: TARGET_PIPELINE, "{}: no prediction: {}", label, e);
                containment.push(None);
                predictions.push(None);
            }
        }
        reporter.item_finished(Stage::Selection, &label, total - row - 1);
    }

    let mut output = dataset.clone();
    output.set_column(COL_PREDICTED_TIME, &predictions);
    output.set_column(COL_PREDICTION_IN_CANDIDATES, &containment);
    reporter.stage_finished(Stage::Selection, total);
    Ok(output.project(&OUTPUT_COLUMNS))
}
