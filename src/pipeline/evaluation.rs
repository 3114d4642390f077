use std::path::{Path, PathBuf};

use super::{ProgressReporter, Stage};
use crate::dataset::{
    Dataset, COL_CACHE, COL_CLEANED_GOLD_LABEL, COL_CLEANED_PREDICTION_DATE, COL_DOC_ID,
    COL_ENTITY, COL_ENTITY_TYPE, COL_GIVEN_ACC, COL_GOLD_LABEL_CLEAN, COL_NATURE,
    COL_OUR_PREDICTION_ACC, COL_PREDICTED_DATE, COL_PUBLISHED, COL_TEXT_VERSION, COL_URL,
};
use crate::scoring::{AccuracyReport, AccuracyScorer, PredictionRecord};

const OUTPUT_COLUMNS: [&str; 12] = [
    COL_DOC_ID,
    COL_URL,
    COL_CACHE,
    COL_TEXT_VERSION,
    COL_NATURE,
    COL_ENTITY,
    COL_ENTITY_TYPE,
    COL_PUBLISHED,
    COL_CLEANED_PREDICTION_DATE,
    COL_CLEANED_GOLD_LABEL,
    COL_GIVEN_ACC,
    COL_OUR_PREDICTION_ACC,
];

/// Scores and the table they are written into.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: AccuracyReport,
    pub table: Dataset,
}

/// Where the evaluation table goes: `output` itself when it names a `.csv`
/// file, `output/evaluation.csv` otherwise.
pub fn evaluation_output_path(output: &Path) -> PathBuf {
    if output.to_string_lossy().ends_with(".csv") {
        output.to_path_buf()
    } else {
        output.join("evaluation.csv")
    }
}

/// Float text as other table tools write it: `50.0`, `33.333333333333336`.
fn float_cell(value: f64) -> String {
    format!("{:?}", value)
}

fn record(dataset: &Dataset, row: usize) -> PredictionRecord {
    let owned = |column: &str| dataset.value(row, column).map(str::to_string);
    PredictionRecord {
        predicted: owned(COL_CLEANED_PREDICTION_DATE),
        gold: owned(COL_CLEANED_GOLD_LABEL),
        given: owned(COL_PUBLISHED),
    }
}

/// Compare given and predicted dates against the gold dates.
///
/// Both percentages are stored on the first row only.
pub fn evaluate(dataset: &Dataset, reporter: &dyn ProgressReporter) -> Evaluation {
    reporter.stage_started(Stage::Evaluation, dataset.len());

    let records: Vec<PredictionRecord> = (0..dataset.len()).map(|row| record(dataset, row)).collect();
    let report = AccuracyScorer::score(&records);

    let mut table = dataset.clone();
    table.ensure_column(COL_GIVEN_ACC);
    table.ensure_column(COL_OUR_PREDICTION_ACC);
    if !table.is_empty() {
        table.set_value(0, COL_GIVEN_ACC, Some(&float_cell(report.given_accuracy())));
        table.set_value(0, COL_OUR_PREDICTION_ACC, Some(&float_cell(report.predicted_accuracy())));
    }

    let mut table = table.project(&OUTPUT_COLUMNS);
    table.rename_column(COL_CLEANED_PREDICTION_DATE, COL_PREDICTED_DATE);
    table.rename_column(COL_CLEANED_GOLD_LABEL, COL_GOLD_LABEL_CLEAN);

    reporter.stage_finished(Stage::Evaluation, records.len());
    Evaluation { report, table }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NullReporter;

    fn table() -> Dataset {
        let mut dataset = Dataset::new(vec![
            COL_DOC_ID.to_string(),
            COL_PUBLISHED.to_string(),
            COL_CLEANED_PREDICTION_DATE.to_string(),
            COL_CLEANED_GOLD_LABEL.to_string(),
        ]);
        dataset.push_row(vec!["d1".into(), "01/12/2023".into(), "01/12/2023".into(), "01/12/2023".into()]);
        dataset.push_row(vec!["d2".into(), "".into(), "02/12/2023".into(), "".into()]);
        dataset
    }

    #[test]
    fn test_evaluate_writes_scores_on_first_row() {
        let evaluation = evaluate(&table(), &NullReporter);
        assert_eq!(evaluation.report.predicted_matches, 1);
        assert_eq!(evaluation.report.given_matches, 1);

        let out = &evaluation.table;
        assert_eq!(out.value(0, COL_OUR_PREDICTION_ACC), Some("50.0"));
        assert_eq!(out.value(0, COL_GIVEN_ACC), Some("50.0"));
        assert_eq!(out.value(1, COL_OUR_PREDICTION_ACC), None);
        assert_eq!(out.value(0, COL_PREDICTED_DATE), Some("01/12/2023"));
        assert_eq!(out.value(0, COL_GOLD_LABEL_CLEAN), Some("01/12/2023"));
        assert!(!out.has_column(COL_CLEANED_PREDICTION_DATE));
        assert_eq!(
            out.headers(),
            &[
                COL_DOC_ID,
                COL_PUBLISHED,
                COL_PREDICTED_DATE,
                COL_GOLD_LABEL_CLEAN,
                COL_GIVEN_ACC,
                COL_OUR_PREDICTION_ACC
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_evaluate_scores_cleaned_table() {
        use crate::dataset::{COL_GOLD_LABEL, COL_PREDICTED_TIME, COL_TIME_LIST};
        use crate::pipeline::clean_dates;

        let mut predicted = Dataset::new(vec![
            COL_DOC_ID.to_string(),
            COL_PUBLISHED.to_string(),
            COL_TIME_LIST.to_string(),
            COL_PREDICTED_TIME.to_string(),
            COL_GOLD_LABEL.to_string(),
        ]);
        predicted.push_row(vec![
            "d1".into(),
            "".into(),
            r#"["31 janvier 2024"]"#.into(),
            "31 janvier 2024".into(),
            "31/01/2024".into(),
        ]);
        predicted.push_row(vec!["d2".into(), "06/01/2024".into(), "[]".into(), "".into(), "6 janvier 2024".into()]);

        let cleaned = clean_dates(&predicted, &NullReporter);
        assert!(!cleaned.has_column(COL_PREDICTED_TIME));

        let evaluation = evaluate(&cleaned, &NullReporter);
        assert_eq!(evaluation.report.total, 2);
        assert_eq!(evaluation.report.predicted_matches, 1);
        assert_eq!(evaluation.report.given_matches, 1);
    }

    #[test]
    fn test_evaluate_empty_table() {
        let empty = Dataset::new(vec![COL_DOC_ID.to_string()]);
        let evaluation = evaluate(&empty, &NullReporter);
        assert_eq!(evaluation.report.total, 0);
        assert_eq!(evaluation.report.predicted_accuracy(), 0.0);
        assert!(evaluation.table.is_empty());
    }

    #[test]
    fn test_float_cells_keep_a_fraction() {
        assert_eq!(float_cell(100.0), "100.0");
        assert_eq!(float_cell(0.0), "0.0");
        assert_eq!(float_cell(100.0 / 3.0), "33.333333333333336");
    }

    #[test]
    fn test_output_path_rule() {
        assert_eq!(
            evaluation_output_path(Path::new("out/scores.csv")),
            PathBuf::from("out/scores.csv")
        );
        assert_eq!(
            evaluation_output_path(Path::new("out")),
            PathBuf::from("out/evaluation.csv")
        );
    }
}
