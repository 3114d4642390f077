use async_trait::async_trait;

use super::{EntityCategory, NerBackend, RecognizedSpan};
use crate::dates::DateNormalizer;
use crate::error::CollaboratorError;

/// Offline recogniser tagging every span the date grammars match as `DATE`.
///
/// Useful when no model server is available; it only finds dates that the
/// normaliser can already read.
#[derive(Clone, Copy, Default)]
pub struct PatternNerBackend {
    normalizer: DateNormalizer,
}

impl PatternNerBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NerBackend for PatternNerBackend {
    fn backend_id(&self) -> &str {
        "pattern"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, CollaboratorError> {
        Ok(self
            .normalizer
            .find_spans(text)
            .into_iter()
            .map(|span| RecognizedSpan::new(span.text, EntityCategory::Date))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::date_candidates;

    #[tokio::test]
    async fn test_tags_grammar_matches_as_dates() {
        let backend = PatternNerBackend::new();
        let spans = backend
            .recognize("Délibération du 12 mars 2024, transmise le 15/03/2024.")
            .await
            .unwrap();
        assert_eq!(
            spans,
            vec![
                RecognizedSpan::new("12 mars 2024", EntityCategory::Date),
                RecognizedSpan::new("15/03/2024", EntityCategory::Date),
            ]
        );
    }

    #[tokio::test]
    async fn test_candidates_from_pattern_backend() {
        let text = "Affiché le 15/03/2024. Séance du 12 mars 2024. Rappel : 15/03/2024.";
        let candidates = date_candidates(&PatternNerBackend::new(), text, 512).await;
        assert_eq!(candidates, vec!["15/03/2024", "12 mars 2024"]);
    }
}
