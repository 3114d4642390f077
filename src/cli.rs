//! Command-line flag groups shared by the stage binaries.
//!
//! Every flag can also be set through the environment variable named in its
//! help text.

use anyhow::{Context, Result};
use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use clap::{Args, ValueEnum};
use ollama_rs::Ollama;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::download::{Downloader, DEFAULT_CONCURRENCY, MAX_RETRIES, MIN_CONTENT_LENGTH};
use crate::llm::{SamplingParams, TextGenerator};
use crate::ner::{HttpNerBackend, NerBackend, PatternNerBackend, DEFAULT_CHUNK_CHARS};
use crate::selector::{CandidateSelector, OffListPolicy};
use crate::{LLMClient, LLMParams, TARGET_LLM_REQUEST, TARGET_NER_REQUEST};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LlmBackend {
    Ollama,
    /// Any OpenAI-compatible completions server (vLLM, llama.cpp, ...)
    Openai,
}

#[derive(Debug, Clone, Args)]
pub struct LlmArgs {
    /// Generation backend
    #[arg(long, value_enum, env = "LLM_BACKEND", default_value = "ollama")]
    pub llm_backend: LlmBackend,

    /// Ollama host, with or without scheme
    #[arg(long, env = "OLLAMA_HOST", default_value = "localhost")]
    pub ollama_host: String,

    /// Ollama port
    #[arg(long, env = "OLLAMA_PORT", default_value = "11434")]
    pub ollama_port: u16,

    /// Base URL of the OpenAI-compatible server
    #[arg(long, env = "OPENAI_API_BASE", default_value = "http://localhost:8000/v1")]
    pub openai_api_base: String,

    /// API key for the OpenAI-compatible server
    #[arg(long, env = "OPENAI_API_KEY", default_value = "EMPTY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Model used for date selection
    #[arg(short, long, env = "LLM_MODEL", default_value = "qwen2.5:7b-instruct")]
    pub model: String,

    /// Sampling temperature
    #[arg(long, env = "LLM_TEMPERATURE", default_value = "0.08")]
    pub temperature: f32,

    /// Top P parameter
    #[arg(long, env = "LLM_TOP_P", default_value = "0.95")]
    pub top_p: f32,

    /// Maximum generated tokens
    #[arg(long, env = "LLM_MAX_TOKENS", default_value = "25")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value = "120")]
    pub llm_timeout_secs: u64,

    /// Attempts per document before giving up
    #[arg(long, env = "LLM_RETRIES", default_value = "3")]
    pub llm_retries: usize,

    /// What to store when the answer is not one of the candidates
    #[arg(long, value_enum, env = "OFF_LIST_POLICY", default_value = "keep")]
    pub off_list: OffListPolicy,
}

fn with_scheme(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

impl LlmArgs {
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }

    pub fn llm_params(&self) -> Result<LLMParams> {
        let llm_client = match self.llm_backend {
            LlmBackend::Ollama => {
                let host = with_scheme(&self.ollama_host);
                url::Url::parse(&host).with_context(|| format!("Invalid Ollama host: {}", host))?;
                info!(target: TARGET_LLM_REQUEST, "Connecting to Ollama at {}:{}", host, self.ollama_port);
                LLMClient::Ollama(Ollama::new(host, self.ollama_port))
            }
            LlmBackend::Openai => {
                url::Url::parse(&self.openai_api_base)
                    .with_context(|| format!("Invalid API base: {}", self.openai_api_base))?;
                info!(target: TARGET_LLM_REQUEST, "Using completions API at {}", self.openai_api_base);
                let config = OpenAIConfig::new()
                    .with_api_base(self.openai_api_base.clone())
                    .with_api_key(self.openai_api_key.clone());
                LLMClient::OpenAI(OpenAIClient::with_config(config))
            }
        };

        Ok(LLMParams {
            llm_client,
            model: self.model.clone(),
            request_timeout: Duration::from_secs(self.llm_timeout_secs),
            max_retries: self.llm_retries,
        })
    }

    pub fn selector(&self) -> Result<CandidateSelector> {
        let generator: Arc<dyn TextGenerator> = Arc::new(self.llm_params()?);
        Ok(CandidateSelector::new(generator)
            .with_sampling(self.sampling())
            .with_policy(self.off_list))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NerBackendKind {
    /// Token-classification model behind an HTTP endpoint
    Http,
    /// Offline recogniser built on the date grammars
    Pattern,
}

#[derive(Debug, Clone, Args)]
pub struct NerArgs {
    /// Recogniser used to find date spans
    #[arg(long, value_enum, env = "NER_BACKEND", default_value = "http")]
    pub ner_backend: NerBackendKind,

    /// Token-classification endpoint
    #[arg(long, env = "NER_ENDPOINT", default_value = "http://localhost:8080/")]
    pub ner_endpoint: String,

    /// Bearer token for the endpoint
    #[arg(long, env = "NER_TOKEN", hide_env_values = true)]
    pub ner_token: Option<String>,

    /// Characters sent per request
    #[arg(long, env = "NER_CHUNK_CHARS", default_value_t = DEFAULT_CHUNK_CHARS)]
    pub chunk_chars: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "NER_TIMEOUT_SECS", default_value = "60")]
    pub ner_timeout_secs: u64,

    /// Attempts per chunk before giving up
    #[arg(long, env = "NER_RETRIES", default_value = "3")]
    pub ner_retries: usize,
}

impl NerArgs {
    pub fn backend(&self) -> Result<Arc<dyn NerBackend>> {
        match self.ner_backend {
            NerBackendKind::Http => {
                info!(target: TARGET_NER_REQUEST, "Using NER endpoint {}", self.ner_endpoint);
                let backend = HttpNerBackend::new(&self.ner_endpoint)?
                    .with_token(self.ner_token.clone())
                    .with_timeout(Duration::from_secs(self.ner_timeout_secs))
                    .with_max_retries(self.ner_retries);
                Ok(Arc::new(backend))
            }
            NerBackendKind::Pattern => {
                info!(target: TARGET_NER_REQUEST, "Using the offline pattern recogniser");
                Ok(Arc::new(PatternNerBackend::new()))
            }
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    /// Maximum downloads in flight
    #[arg(long, env = "DOWNLOAD_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Minimum document length in characters
    #[arg(long, env = "MIN_CONTENT_LENGTH", default_value_t = MIN_CONTENT_LENGTH)]
    pub min_length: usize,

    /// Attempts per document
    #[arg(long, env = "DOWNLOAD_RETRIES", default_value_t = MAX_RETRIES)]
    pub download_retries: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "DOWNLOAD_TIMEOUT_SECS", default_value = "30")]
    pub download_timeout_secs: u64,
}

impl DownloadArgs {
    pub fn downloader(&self) -> Result<Downloader> {
        Ok(Downloader::new()?
            .with_concurrency(self.concurrency)
            .with_min_length(self.min_length)
            .with_max_retries(self.download_retries)
            .with_timeout(Duration::from_secs(self.download_timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        llm: LlmArgs,
        #[command(flatten)]
        ner: NerArgs,
        #[command(flatten)]
        download: DownloadArgs,
    }

    #[test]
    fn test_defaults() {
        let args = TestArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args.llm.sampling(), SamplingParams::default());
        assert_eq!(args.llm.off_list, OffListPolicy::Keep);
        assert_eq!(args.ner.chunk_chars, 512);
        assert_eq!(args.download.concurrency, 16);
        assert_eq!(args.download.min_length, 500);
    }

    #[test]
    fn test_backend_selection() {
        let args = TestArgs::try_parse_from([
            "test",
            "--llm-backend",
            "openai",
            "--off-list",
            "nearest",
            "--ner-backend",
            "pattern",
        ])
        .unwrap();
        assert_eq!(args.llm.llm_backend, LlmBackend::Openai);
        assert_eq!(args.llm.off_list, OffListPolicy::Nearest);
        assert_eq!(args.ner.backend().unwrap().backend_id(), "pattern");
        assert!(matches!(args.llm.llm_params().unwrap().llm_client, LLMClient::OpenAI(_)));
    }

    #[test]
    fn test_host_scheme_is_added() {
        assert_eq!(with_scheme("localhost"), "http://localhost");
        assert_eq!(with_scheme("https://gpu.local"), "https://gpu.local");
    }
}
