use std::fmt;

/// The three dates compared for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionRecord {
    /// `DD/MM/YYYY` form of the answer.
    pub predicted: Option<String>,
    /// `DD/MM/YYYY` form of the gold label.
    pub gold: Option<String>,
    /// Date shipped with the source dataset.
    pub given: Option<String>,
}

impl PredictionRecord {
    pub fn given_matches(&self) -> bool {
        same_date(self.given.as_deref(), self.gold.as_deref())
    }

    pub fn predicted_matches(&self) -> bool {
        same_date(self.predicted.as_deref(), self.gold.as_deref())
    }
}

/// Exact equality of two present dates; a missing side never matches.
fn same_date(left: Option<&str>, right: Option<&str>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

/// Match counts over a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccuracyReport {
    pub total: usize,
    pub given_matches: usize,
    pub predicted_matches: usize,
}

fn percentage(matches: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matches as f64 * 100.0 / total as f64
    }
}

impl AccuracyReport {
    /// Share of records whose given date equals the gold date, in percent.
    pub fn given_accuracy(&self) -> f64 {
        percentage(self.given_matches, self.total)
    }

    /// Share of records whose predicted date equals the gold date, in percent.
    pub fn predicted_accuracy(&self) -> f64 {
        percentage(self.predicted_matches, self.total)
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Given accuracy: {:.2}%\nOur prediction accuracy: {:.2}%",
            self.given_accuracy(),
            self.predicted_accuracy()
        )
    }
}

pub struct AccuracyScorer;

impl AccuracyScorer {
    pub fn score(records: &[PredictionRecord]) -> AccuracyReport {
        records
            .iter()
            .fold(AccuracyReport::default(), |mut report, record| {
                report.total += 1;
                report.given_matches += record.given_matches() as usize;
                report.predicted_matches += record.predicted_matches() as usize;
                report
            })
    }
}
