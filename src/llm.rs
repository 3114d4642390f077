use async_openai::types::CreateCompletionRequestArgs;
use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use std::time::Duration;
use tokio::time::sleep;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::error::CollaboratorError;
use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST};

const SERVICE: &str = "llm";

/// Sampling configuration for date selection: nearly greedy, short output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        SamplingParams {
            temperature: 0.08,
            top_p: 0.95,
            max_tokens: 25,
        }
    }
}

/// Anything that turns a rendered prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, sampling: &SamplingParams) -> Result<String, CollaboratorError>;
}

#[async_trait]
impl TextGenerator for LLMParams {
    async fn generate(&self, prompt: &str, sampling: &SamplingParams) -> Result<String, CollaboratorError> {
        generate_llm_response(prompt, sampling, self).await
    }
}

async fn send_request(
    prompt: &str,
    sampling: &SamplingParams,
    params: &LLMParams,
) -> Result<String, CollaboratorError> {
    match &params.llm_client {
        LLMClient::Ollama(ollama) => {
            let mut request = GenerationRequest::new(params.model.clone(), prompt.to_string());
            request.options = Some(
                GenerationOptions::default()
                    .temperature(sampling.temperature)
                    .top_p(sampling.top_p)
                    .num_predict(sampling.max_tokens as i32),
            );
            let response = ollama
                .generate(request)
                .await
                .map_err(|e| CollaboratorError::request(SERVICE, e))?;
            Ok(response.response)
        }
        LLMClient::OpenAI(client) => {
            let request = CreateCompletionRequestArgs::default()
                .model(params.model.clone())
                .prompt(prompt)
                .temperature(sampling.temperature)
                .top_p(sampling.top_p)
                .max_tokens(sampling.max_tokens)
                .build()
                .map_err(|e| CollaboratorError::request(SERVICE, e))?;
            let response = client
                .completions()
                .create(request)
                .await
                .map_err(|e| CollaboratorError::request(SERVICE, e))?;
            response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.text)
                .ok_or_else(|| CollaboratorError::malformed(SERVICE, "no choices in completion"))
        }
    }
}

/// Generate a completion, retrying with exponential back-off on errors,
/// timeouts and empty output.
pub async fn generate_llm_response(
    prompt: &str,
    sampling: &SamplingParams,
    params: &LLMParams,
) -> Result<String, CollaboratorError> {
    let max_retries = params.max_retries.max(1);
    let mut backoff = 2;
    let mut timed_out = false;

    debug!(target: TARGET_LLM_REQUEST, "Starting LLM response generation with model {}", params.model);

    for retry_count in 0..max_retries {
        debug!(target: TARGET_LLM_REQUEST, "Sending LLM request with prompt: {}", prompt);

        match timeout(params.request_timeout, send_request(prompt, sampling, params)).await {
            Ok(Ok(response_text)) if !response_text.trim().is_empty() => {
                debug!(target: TARGET_LLM_REQUEST, "LLM response received: {}", response_text);
                return Ok(response_text);
            }
            Ok(Ok(_)) => {
                warn!(target: TARGET_LLM_REQUEST, "LLM returned an empty response");
                timed_out = false;
            }
            Ok(Err(e)) => {
                warn!(target: TARGET_LLM_REQUEST, "Error generating response: {}", e);
                timed_out = false;
            }
            Err(_) => {
                warn!(target: TARGET_LLM_REQUEST, "LLM request timed out after {:?}", params.request_timeout);
                timed_out = true;
            }
        }

        if retry_count < max_retries - 1 {
            info!(target: TARGET_LLM_REQUEST, "Retrying LLM request... ({}/{})", retry_count + 1, max_retries);
            debug!(target: TARGET_LLM_REQUEST, "Backing off for {} seconds before retry", backoff);
            sleep(Duration::from_secs(backoff)).await;
            backoff *= 2; // Exponential backoff
        }
    }

    error!(target: TARGET_LLM_REQUEST, "No response generated after {} attempts", max_retries);
    if timed_out {
        return Err(CollaboratorError::Timeout {
            service: SERVICE,
            after: params.request_timeout,
        });
    }
    Err(CollaboratorError::Exhausted {
        service: SERVICE,
        attempts: max_retries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sampling_is_near_greedy() {
        let sampling = SamplingParams::default();
        assert_eq!(sampling.max_tokens, 25);
        assert!(sampling.temperature < 0.1);
        assert!((sampling.top_p - 0.95).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_unanswered_request_reports_timeout() {
        let base = crate::download::testing::hang().await;
        let url = url::Url::parse(&base).unwrap();
        let host = format!("http://{}", url.host_str().unwrap());
        let params = LLMParams {
            llm_client: LLMClient::Ollama(ollama_rs::Ollama::new(host, url.port().unwrap())),
            model: "test".to_string(),
            request_timeout: Duration::from_millis(50),
            max_retries: 1,
        };
        let err = generate_llm_response("prompt", &SamplingParams::default(), &params)
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Timeout { service: "llm", .. }));
    }
}
