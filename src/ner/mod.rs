//! Named-entity recognition collaborators and date candidate shortlisting.
//!
//! A [`NerBackend`] turns a chunk of text into tagged spans. Documents are fed
//! to it in fixed-size chunks and only the `DATE` spans are kept, in order,
//! before the shortlist filter runs.

pub mod http;
pub mod pattern;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::dates::filter_dates;
use crate::error::CollaboratorError;
use crate::util;
use crate::TARGET_NER_REQUEST;

pub use http::HttpNerBackend;
pub use pattern::PatternNerBackend;

/// Characters sent to the recogniser per call.
pub const DEFAULT_CHUNK_CHARS: usize = 512;

/// Coarse entity classes reported by token-classification models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Date,
    Person,
    Organization,
    Location,
    Misc,
    Other,
}

impl EntityCategory {
    /// Map a model label (`DATE`, `B-PER`, `I-LOC`, ...) to a category.
    pub fn from_label(label: &str) -> Self {
        let label = label
            .strip_prefix("B-")
            .or_else(|| label.strip_prefix("I-"))
            .unwrap_or(label);
        match label.to_ascii_uppercase().as_str() {
            "DATE" => EntityCategory::Date,
            "PER" | "PERSON" => EntityCategory::Person,
            "ORG" | "ORGANIZATION" => EntityCategory::Organization,
            "LOC" | "LOCATION" => EntityCategory::Location,
            "MISC" => EntityCategory::Misc,
            _ => EntityCategory::Other,
        }
    }
}

/// A recognised span of text and its entity class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedSpan {
    pub text: String,
    pub category: EntityCategory,
}

impl RecognizedSpan {
    pub fn new(text: impl Into<String>, category: EntityCategory) -> Self {
        RecognizedSpan {
            text: text.into(),
            category,
        }
    }
}

/// Pluggable recogniser. Implementations must be usable from several tasks.
#[async_trait]
pub trait NerBackend: Send + Sync {
    /// Short identifier used in logs (e.g. "http", "pattern").
    fn backend_id(&self) -> &str;

    /// Recognise entities in a single chunk of text.
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, CollaboratorError>;
}

/// Run `backend` over `text` chunk by chunk and collect every `DATE` span,
/// in chunk order.
pub async fn recognize_dates(
    backend: &dyn NerBackend,
    text: &str,
    chunk_chars: usize,
) -> Result<Vec<String>, CollaboratorError> {
    let mut dates = Vec::new();
    for chunk in util::chunk_chars(text, chunk_chars) {
        let spans = backend.recognize(chunk).await?;
        dates.extend(
            spans
                .into_iter()
                .filter(|span| span.category == EntityCategory::Date)
                .map(|span| span.text),
        );
    }
    Ok(dates)
}

/// Shortlist of date candidates for one document.
///
/// A recogniser failure is logged and yields an empty list so the batch can
/// continue.
pub async fn date_candidates(backend: &dyn NerBackend, text: &str, chunk_chars: usize) -> Vec<String> {
    match recognize_dates(backend, text, chunk_chars).await {
        Ok(dates) => {
            let candidates = filter_dates(&dates);
            debug!(
                target: TARGET_NER_REQUEST,
                "{}: {} date spans, {} candidates kept",
                backend.backend_id(),
                dates.len(),
                candidates.len()
            );
            candidates
        }
        Err(e) => {
            error!(target: TARGET_NER_REQUEST, "{}: error processing text: {}", backend.backend_id(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Tags every whitespace-separated token that contains a digit as a date.
    pub(crate) struct DigitTokenBackend {
        pub calls: AtomicUsize,
    }

    impl DigitTokenBackend {
        pub fn new() -> Self {
            DigitTokenBackend {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl NerBackend for DigitTokenBackend {
        fn backend_id(&self) -> &str {
            "digits"
        }

        async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, CollaboratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text
                .split_whitespace()
                .map(|token| {
                    let category = if token.chars().any(|c| c.is_ascii_digit()) {
                        EntityCategory::Date
                    } else {
                        EntityCategory::Misc
                    };
                    RecognizedSpan::new(token, category)
                })
                .collect())
        }
    }

    pub(crate) struct FailingBackend;

    #[async_trait]
    impl NerBackend for FailingBackend {
        fn backend_id(&self) -> &str {
            "failing"
        }

        async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>, CollaboratorError> {
            Err(CollaboratorError::request("ner", "connection refused"))
        }
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(EntityCategory::from_label("DATE"), EntityCategory::Date);
        assert_eq!(EntityCategory::from_label("B-PER"), EntityCategory::Person);
        assert_eq!(EntityCategory::from_label("I-loc"), EntityCategory::Location);
        assert_eq!(EntityCategory::from_label("TIME"), EntityCategory::Other);
    }

    #[tokio::test]
    async fn test_recognize_dates_chunks_and_filters_category() {
        let backend = DigitTokenBackend::new();
        let text = "le 02/02/2024 puis 03/03/2024";
        let dates = recognize_dates(&backend, text, 10).await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
        // Chunks: "le 02/02/2", "024 puis 0", "3/03/2024".
        assert_eq!(dates, vec!["02/02/2", "024", "0", "3/03/2024"]);
    }

    #[tokio::test]
    async fn test_date_candidates_applies_filter() {
        let backend = DigitTokenBackend::new();
        let text = "Séance du 02/02/2024, affiché le 02/02/2024 et 2024";
        let candidates = date_candidates(&backend, text, DEFAULT_CHUNK_CHARS).await;
        assert_eq!(candidates, vec!["02/02/2024,", "02/02/2024"]);
    }

    #[tokio::test]
    async fn test_failure_yields_empty_list() {
        let candidates = date_candidates(&FailingBackend, "le 2 mars 2023", 512).await;
        assert!(candidates.is_empty());
    }
}
