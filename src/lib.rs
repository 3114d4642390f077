pub mod cli;
pub mod dataset;
pub mod dates;
pub mod download;
pub mod error;
pub mod llm;
pub mod logging;
pub mod metrics;
pub mod ner;
pub mod pipeline;
pub mod prompt;
pub mod scoring;
pub mod selector;
pub mod util;

use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use ollama_rs::Ollama;
use std::time::Duration;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
pub const TARGET_NER_REQUEST: &str = "ner_request";
pub const TARGET_PIPELINE: &str = "pipeline";

#[derive(Clone, Debug)]
pub enum LLMClient {
    Ollama(Ollama),
    /// Any server speaking the OpenAI completions API (vLLM, llama.cpp, ...).
    OpenAI(OpenAIClient<OpenAIConfig>),
}

#[derive(Clone, Debug)]
pub struct LLMParams {
    pub llm_client: LLMClient,
    pub model: String,
    pub request_timeout: Duration,
    pub max_retries: usize,
}
