//! The batch stages and the runner that chains them.
//!
//! Each stage takes a [`Dataset`](crate::dataset::Dataset), adds its own
//! columns and hands back a new table. Failures on a single document never
//! stop a stage: the row is dropped (download) or gets an empty value.

mod candidates;
mod cleaning;
mod evaluation;
mod rebuild;
mod runner;
mod selection;

pub use candidates::extract_candidates;
pub use cleaning::clean_dates;
pub use evaluation::{evaluate, evaluation_output_path, Evaluation};
pub use rebuild::{rebuild_dataset, RebuildSummary};
pub use runner::{Pipeline, PipelineSummary};
pub use selection::predict_dates;

use std::fmt;
use tracing::info;

use crate::TARGET_PIPELINE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Download,
    Candidates,
    Selection,
    Cleaning,
    Evaluation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Download => "download",
            Stage::Candidates => "candidates",
            Stage::Selection => "selection",
            Stage::Cleaning => "cleaning",
            Stage::Evaluation => "evaluation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observer notified as a stage works through its documents.
pub trait ProgressReporter: Send + Sync {
    fn stage_started(&self, stage: Stage, total: usize);

    /// `item` finished; `remaining` documents are still to go.
    fn item_finished(&self, stage: Stage, item: &str, remaining: usize);

    fn stage_finished(&self, stage: Stage, processed: usize);
}

/// Reports progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn stage_started(&self, stage: Stage, total: usize) {
        info!(target: TARGET_PIPELINE, "{}: starting on {} documents", stage, total);
    }

    fn item_finished(&self, stage: Stage, item: &str, remaining: usize) {
        info!(target: TARGET_PIPELINE, "{}: finished {}, {} left", stage, item, remaining);
    }

    fn stage_finished(&self, stage: Stage, processed: usize) {
        info!(target: TARGET_PIPELINE, "{}: done, {} documents processed", stage, processed);
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn stage_started(&self, _stage: Stage, _total: usize) {}
    fn item_finished(&self, _stage: Stage, _item: &str, _remaining: usize) {}
    fn stage_finished(&self, _stage: Stage, _processed: usize) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every notification for inspection.
    #[derive(Default)]
    pub(crate) struct RecordingReporter {
        pub events: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingReporter {
        fn stage_started(&self, stage: Stage, total: usize) {
            self.events.lock().unwrap().push(format!("start {} {}", stage, total));
        }

        fn item_finished(&self, stage: Stage, _item: &str, remaining: usize) {
            self.events.lock().unwrap().push(format!("item {} {}", stage, remaining));
        }

        fn stage_finished(&self, stage: Stage, processed: usize) {
            self.events.lock().unwrap().push(format!("finish {} {}", stage, processed));
        }
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Download.to_string(), "download");
        assert_eq!(Stage::Evaluation.as_str(), "evaluation");
    }
}
