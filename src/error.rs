use std::time::Duration;
use thiserror::Error;

/// Failure of an external model service (NER or LLM).
///
/// These never abort a batch: callers log them and substitute an empty result
/// for the document being processed.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{service} request failed: {message}")]
    Request {
        service: &'static str,
        message: String,
    },

    #[error("{service} request timed out after {after:?}")]
    Timeout { service: &'static str, after: Duration },

    #[error("malformed {service} response: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    #[error("{service} returned no output after {attempts} attempts")]
    Exhausted {
        service: &'static str,
        attempts: usize,
    },
}

impl CollaboratorError {
    pub fn request(service: &'static str, err: impl std::fmt::Display) -> Self {
        CollaboratorError::Request {
            service,
            message: err.to_string(),
        }
    }

    pub fn malformed(service: &'static str, err: impl std::fmt::Display) -> Self {
        CollaboratorError::Malformed {
            service,
            message: err.to_string(),
        }
    }
}
