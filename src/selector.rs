use clap::ValueEnum;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::CollaboratorError;
use crate::llm::{SamplingParams, TextGenerator};
use crate::prompt::date_selection_prompt;
use crate::TARGET_LLM_REQUEST;

/// What to store when the model answers with text outside the candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OffListPolicy {
    /// Store the model's line unchanged.
    #[default]
    Keep,
    /// Replace it with the most similar candidate.
    Nearest,
}

/// The model's choice for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    /// Whether `text` is one of the candidates.
    pub in_candidates: bool,
}

/// Picks one publication date per document out of its candidate list.
#[derive(Clone)]
pub struct CandidateSelector {
    generator: Arc<dyn TextGenerator>,
    sampling: SamplingParams,
    policy: OffListPolicy,
}

/// The first line of generated text, ignoring leading blank space.
pub fn first_line(generated: &str) -> &str {
    generated
        .trim_start()
        .lines()
        .next()
        .unwrap_or("")
        .trim()
}

fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '\'' || c == '"').trim()
}

/// The candidate matching `answer`, ignoring surrounding quotes.
fn matching_candidate<'c>(answer: &str, candidates: &'c [String]) -> Option<&'c String> {
    let answer = strip_quotes(answer);
    candidates
        .iter()
        .find(|candidate| strip_quotes(candidate) == answer)
}

fn nearest_candidate<'c>(answer: &str, candidates: &'c [String]) -> Option<&'c String> {
    let answer = strip_quotes(answer);
    candidates.iter().max_by(|a, b| {
        strsim::normalized_levenshtein(answer, a)
            .total_cmp(&strsim::normalized_levenshtein(answer, b))
            // Ties go to the earlier candidate.
            .then(std::cmp::Ordering::Greater)
    })
}

impl CandidateSelector {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        CandidateSelector {
            generator,
            sampling: SamplingParams::default(),
            policy: OffListPolicy::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_policy(mut self, policy: OffListPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ask the model for the publication date of the document `context`.
    pub async fn select(
        &self,
        context: &str,
        candidates: &[String],
    ) -> Result<Selection, CollaboratorError> {
        let prompt = date_selection_prompt(candidates, context);
        let generated = self.generator.generate(&prompt, &self.sampling).await?;
        Ok(self.resolve(first_line(&generated), candidates))
    }

    /// Apply the containment check and off-list policy to a model answer.
    pub fn resolve(&self, answer: &str, candidates: &[String]) -> Selection {
        if let Some(candidate) = matching_candidate(answer, candidates) {
            return Selection {
                text: candidate.clone(),
                in_candidates: true,
            };
        }

        warn!(target: TARGET_LLM_REQUEST, "Model answer '{}' is not in the candidate list", answer);
        match self.policy {
            OffListPolicy::Keep => Selection {
                text: answer.to_string(),
                in_candidates: false,
            },
            OffListPolicy::Nearest => match nearest_candidate(answer, candidates) {
                Some(candidate) => {
                    debug!(target: TARGET_LLM_REQUEST, "Replacing '{}' with nearest candidate '{}'", answer, candidate);
                    Selection {
                        text: candidate.clone(),
                        in_candidates: true,
                    }
                }
                None => Selection {
                    text: answer.to_string(),
                    in_candidates: false,
                },
            },
        }
    }
}
