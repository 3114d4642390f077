use super::{ProgressReporter, Stage};
use crate::dataset::{
    Dataset, COL_CACHE, COL_CLEANED_GOLD_LABEL, COL_CLEANED_PREDICTION_DATE, COL_DOC_ID,
    COL_ENTITY, COL_ENTITY_TYPE, COL_EXTRACTED_DATE, COL_GOLD_LABEL, COL_NATURE,
    COL_PREDICTED_TIME, COL_PUBLISHED, COL_TEXT_VERSION, COL_URL,
};
use crate::dates::DateNormalizer;

const OUTPUT_COLUMNS: [&str; 11] = [
    COL_DOC_ID,
    COL_URL,
    COL_CACHE,
    COL_TEXT_VERSION,
    COL_NATURE,
    COL_PUBLISHED,
    COL_ENTITY,
    COL_ENTITY_TYPE,
    COL_GOLD_LABEL,
    COL_CLEANED_PREDICTION_DATE,
    COL_CLEANED_GOLD_LABEL,
];

/// Normalise the predicted and gold dates of every row to `DD/MM/YYYY`.
pub fn clean_dates(dataset: &Dataset, reporter: &dyn ProgressReporter) -> Dataset {
    let normalizer = DateNormalizer::new();
    let total = dataset.len();
    reporter.stage_started(Stage::Cleaning, total);

    let mut extracted = Vec::with_capacity(total);
    let mut predicted = Vec::with_capacity(total);
    let mut gold = Vec::with_capacity(total);
    for row in 0..total {
        let span = dataset
            .value(row, COL_PREDICTED_TIME)
            .and_then(|answer| normalizer.extract_span(answer))
            .map(|span| span.text);
        predicted.push(span.and_then(|text| normalizer.canonicalize(text)));
        extracted.push(span);
        gold.push(
            dataset
                .value(row, COL_GOLD_LABEL)
                .and_then(|label| normalizer.canonicalize(label)),
        );
    }

    let mut output = dataset.clone();
    output.set_column(COL_EXTRACTED_DATE, &extracted);
    output.set_column(COL_CLEANED_PREDICTION_DATE, &predicted);
    output.set_column(COL_CLEANED_GOLD_LABEL, &gold);
    reporter.stage_finished(Stage::Cleaning, total);
    output.project(&OUTPUT_COLUMNS)
}
