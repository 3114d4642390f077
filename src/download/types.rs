//! Type definitions and limits for document downloads.

use thiserror::Error;
use tokio::time::Duration;

/// Why a document could not be used.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("content too short: {length} characters (minimum {minimum})")]
    TooShort { length: usize, minimum: usize },

    #[error("failed to archive document: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Transport failures and server errors may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            DownloadError::Request(_) | DownloadError::Timeout(_) => true,
            DownloadError::Status(status) => status.is_server_error(),
            _ => false,
        }
    }
}

/// The outcome for one input row.
#[derive(Debug)]
pub struct DownloadResult {
    /// Zero-based row of the input table.
    pub index: usize,
    pub url: String,
    pub body: Result<String, DownloadError>,
}

// Constants
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const RETRY_DELAY: Duration = Duration::from_secs(2);
pub const MAX_RETRIES: usize = 3;
/// Bodies shorter than this many characters are rejected.
pub const MIN_CONTENT_LENGTH: usize = 500;
pub const DEFAULT_CONCURRENCY: usize = 16;
