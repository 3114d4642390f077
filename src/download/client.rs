//! HTTP client creation for document downloads.

use anyhow::Result;
use tracing::debug;

use crate::TARGET_WEB_REQUEST;

const USER_AGENT: &str = concat!("pubdate/", env!("CARGO_PKG_VERSION"));

/// Create the client shared by every download of a run.
///
/// Timeouts are applied per request by the caller.
pub fn create_http_client() -> Result<reqwest::Client> {
    debug!(target: TARGET_WEB_REQUEST, "Creating HTTP client");

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}
