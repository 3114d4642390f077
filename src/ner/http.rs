use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::{EntityCategory, NerBackend, RecognizedSpan};
use crate::error::CollaboratorError;
use crate::TARGET_NER_REQUEST;

const SERVICE: &str = "ner";

pub const DEFAULT_NER_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_NER_RETRIES: usize = 3;

#[derive(Debug, Deserialize)]
struct TaggedEntity {
    #[serde(alias = "entity")]
    entity_group: String,
    word: String,
}

/// Token-classification servers answer either with a flat list or with one
/// list per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NerResponse {
    Flat(Vec<TaggedEntity>),
    Nested(Vec<Vec<TaggedEntity>>),
}

fn spans_from_body(body: &[u8]) -> Result<Vec<RecognizedSpan>, CollaboratorError> {
    let response: NerResponse =
        serde_json::from_slice(body).map_err(|e| CollaboratorError::malformed(SERVICE, e))?;
    let entities = match response {
        NerResponse::Flat(entities) => entities,
        NerResponse::Nested(lists) => lists.into_iter().flatten().collect(),
    };
    Ok(entities
        .into_iter()
        .map(|entity| RecognizedSpan::new(entity.word, EntityCategory::from_label(&entity.entity_group)))
        .collect())
}

/// Recogniser served over HTTP by a token-classification endpoint, such as a
/// text-embeddings-inference or Hugging Face inference server hosting
/// `Jean-Baptiste/camembert-ner-with-dates`.
///
/// Each chunk is POSTed as `{"inputs": "<chunk>"}`.
#[derive(Debug, Clone)]
pub struct HttpNerBackend {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    request_timeout: Duration,
    max_retries: usize,
}

impl HttpNerBackend {
    pub fn new(endpoint: &str) -> Result<Self> {
        let parsed = url::Url::parse(endpoint)
            .with_context(|| format!("Invalid NER endpoint: {}", endpoint))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("NER endpoint must use http or https: {}", endpoint);
        }
        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .context("Failed to build NER HTTP client")?;

        Ok(HttpNerBackend {
            client,
            endpoint: endpoint.to_string(),
            token: None,
            request_timeout: DEFAULT_NER_TIMEOUT,
            max_retries: DEFAULT_NER_RETRIES,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    async fn send_once(&self, text: &str) -> Result<Vec<RecognizedSpan>, CollaboratorError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::request(SERVICE, format!("HTTP {}", status)));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;
        spans_from_body(&body)
    }
}

#[async_trait]
impl NerBackend for HttpNerBackend {
    fn backend_id(&self) -> &str {
        "http"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, CollaboratorError> {
        let mut backoff = 2;
        let mut timed_out = false;

        for retry_count in 0..self.max_retries {
            debug!(target: TARGET_NER_REQUEST, "Sending NER request ({} chars) to {}", text.chars().count(), self.endpoint);

            match timeout(self.request_timeout, self.send_once(text)).await {
                Ok(Ok(spans)) => {
                    debug!(target: TARGET_NER_REQUEST, "NER response received: {} spans", spans.len());
                    return Ok(spans);
                }
                // A body we cannot read will not improve on retry.
                Ok(Err(e @ CollaboratorError::Malformed { .. })) => return Err(e),
                Ok(Err(e)) => {
                    warn!(target: TARGET_NER_REQUEST, "Error from NER endpoint: {}", e);
                    timed_out = false;
                }
                Err(_) => {
                    warn!(target: TARGET_NER_REQUEST, "NER request timed out after {:?}", self.request_timeout);
                    timed_out = true;
                }
            }

            if retry_count < self.max_retries - 1 {
                info!(target: TARGET_NER_REQUEST, "Retrying NER request... ({}/{})", retry_count + 1, self.max_retries);
                sleep(Duration::from_secs(backoff)).await;
                backoff *= 2;
            }
        }

        if timed_out {
            return Err(CollaboratorError::Timeout {
                service: SERVICE,
                after: self.request_timeout,
            });
        }
        Err(CollaboratorError::Exhausted {
            service: SERVICE,
            attempts: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_response() {
        let body = br#"[
            {"entity_group": "ORG", "score": 0.98, "word": "Mairie de Tronget", "start": 0, "end": 17},
            {"entity_group": "DATE", "score": 0.99, "word": "31 janvier 2024", "start": 40, "end": 55}
        ]"#;
        let spans = spans_from_body(body).unwrap();
        assert_eq!(
            spans,
            vec![
                RecognizedSpan::new("Mairie de Tronget", EntityCategory::Organization),
                RecognizedSpan::new("31 janvier 2024", EntityCategory::Date),
            ]
        );
    }

    #[test]
    fn test_nested_response_and_entity_alias() {
        let body = br#"[[{"entity": "DATE", "word": "02/02/2024"}], []]"#;
        let spans = spans_from_body(body).unwrap();
        assert_eq!(spans, vec![RecognizedSpan::new("02/02/2024", EntityCategory::Date)]);
    }

    #[test]
    fn test_empty_response() {
        assert!(spans_from_body(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_response() {
        let err = spans_from_body(br#"{"error": "model loading"}"#).unwrap_err();
        assert!(matches!(err, CollaboratorError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_unanswered_request_reports_timeout() {
        let base = crate::download::testing::hang().await;
        let backend = HttpNerBackend::new(&base)
            .unwrap()
            .with_timeout(Duration::from_millis(50))
            .with_max_retries(1);
        let err = backend.recognize("le 2 mars 2023").await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Timeout { service: "ner", .. }));
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_retries() {
        let base = crate::download::testing::serve("500 Internal Server Error", "text/plain", Vec::new()).await;
        let backend = HttpNerBackend::new(&base).unwrap().with_max_retries(1);
        let err = backend.recognize("le 2 mars 2023").await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Exhausted { attempts: 1, .. }));
    }

    #[test]
    fn test_endpoint_validation() {
        assert!(HttpNerBackend::new("http://localhost:8080/ner").is_ok());
        assert!(HttpNerBackend::new("localhost:8080").is_err());
        assert!(HttpNerBackend::new("not a url").is_err());
    }
}
