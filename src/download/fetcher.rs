//! Fetching and decoding of document texts.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use rand::Rng;
use reqwest::{header, StatusCode};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, warn};

use super::client::create_http_client;
use super::types::{
    DownloadError, DownloadResult, DEFAULT_CONCURRENCY, MAX_RETRIES, MIN_CONTENT_LENGTH,
    REQUEST_TIMEOUT, RETRY_DELAY,
};
use crate::pipeline::{ProgressReporter, Stage};
use crate::util::is_valid_url;
use crate::TARGET_WEB_REQUEST;

/// Decode a response body using the charset announced in `content_type`,
/// falling back to UTF-8 and then Windows-1252.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some(charset) = content_type.and_then(|ct| {
        ct.split(';')
            .find(|part: &&str| part.trim().to_lowercase().starts_with("charset="))
            .and_then(|charset| charset.split('=').nth(1))
    }) {
        let charset = charset.trim().trim_matches('"');
        if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
            let (decoded, _, _) = encoding.decode(bytes);
            return decoded.into_owned();
        }
        debug!(target: TARGET_WEB_REQUEST, "Unsupported encoding: {}", charset);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Downloads document texts with bounded concurrency and a retry budget.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    concurrency: usize,
    min_length: usize,
    max_retries: usize,
    retry_delay: Duration,
    request_timeout: Duration,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(create_http_client()?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Downloader {
            client,
            concurrency: DEFAULT_CONCURRENCY,
            min_length: MIN_CONTENT_LENGTH,
            max_retries: MAX_RETRIES,
            retry_delay: RETRY_DELAY,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// One attempt at `url`: the body is accepted only for HTTP 200 and at
    /// least `min_length` characters.
    pub async fn fetch(&self, url: &str) -> Result<String, DownloadError> {
        if !is_valid_url(url) {
            return Err(DownloadError::InvalidUrl(url.to_string()));
        }

        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if status != StatusCode::OK {
                return Err(DownloadError::Status(status));
            }
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().await?;
            Ok::<_, DownloadError>(decode_body(&bytes, content_type.as_deref()))
        };

        let body = match timeout(self.request_timeout, request).await {
            Ok(result) => result?,
            Err(_) => return Err(DownloadError::Timeout(self.request_timeout)),
        };

        let length = body.chars().count();
        if length < self.min_length {
            return Err(DownloadError::TooShort {
                length,
                minimum: self.min_length,
            });
        }
        Ok(body)
    }

    /// [`Downloader::fetch`] with exponential back-off on retryable errors.
    pub async fn fetch_with_retries(&self, url: &str) -> Result<String, DownloadError> {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            match self.fetch(url).await {
                Ok(body) => {
                    debug!(target: TARGET_WEB_REQUEST, "Downloaded {} ({} bytes)", url, body.len());
                    return Ok(body);
                }
                Err(err) if err.is_retryable() && attempts < self.max_retries => {
                    let jitter = Duration::from_millis(rand::rng().random_range(0..250));
                    warn!(target: TARGET_WEB_REQUEST, "Error downloading {}: {}, retrying ({}/{})", url, err, attempts, self.max_retries);
                    sleep(delay + jitter).await;
                    delay *= 2;
                }
                Err(err) => {
                    warn!(target: TARGET_WEB_REQUEST, "Error downloading {}: {}", url, err);
                    return Err(err);
                }
            }
        }
    }

    /// Download every `(row, url)` pair and return the outcomes in row order.
    ///
    /// At most `concurrency` requests are in flight; every download is
    /// awaited before returning.
    pub async fn download_all(
        &self,
        urls: Vec<(usize, String)>,
        reporter: &dyn ProgressReporter,
    ) -> Vec<DownloadResult> {
        let total = urls.len();
        info!(target: TARGET_WEB_REQUEST, "Downloading {} documents with concurrency {}", total, self.concurrency);
        reporter.stage_started(Stage::Download, total);

        let mut pending = stream::iter(urls)
            .map(|(index, url)| async move {
                let body = self.fetch_with_retries(&url).await;
                DownloadResult { index, url, body }
            })
            .buffer_unordered(self.concurrency);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = pending.next().await {
            reporter.item_finished(Stage::Download, &result.url, total - results.len() - 1);
            results.push(result);
        }

        results.sort_by_key(|result| result.index);
        reporter.stage_finished(Stage::Download, results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::testing::serve;
    use crate::pipeline::NullReporter;

    fn downloader() -> Downloader {
        Downloader::new()
            .unwrap()
            .with_retry_delay(Duration::from_millis(1))
    }

    #[test]
    fn test_decode_body_uses_declared_charset() {
        let latin1 = b"d\xe9lib\xe9ration";
        assert_eq!(decode_body(latin1, Some("text/plain; charset=ISO-8859-1")), "délibération");
        assert_eq!(decode_body("août".as_bytes(), Some("text/plain")), "août");
    }

    #[test]
    fn test_decode_body_falls_back_to_windows_1252() {
        assert_eq!(decode_body(b"r\xe9union", None), "réunion");
    }

    #[tokio::test]
    async fn test_fetch_accepts_long_body() {
        let body = "Délibération du conseil municipal. ".repeat(20);
        let base = serve("200 OK", "text/plain; charset=utf-8", body.clone().into_bytes()).await;
        let fetched = downloader().fetch(&format!("{}/doc.txt", base)).await.unwrap();
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_fetch_rejects_short_body() {
        let base = serve("200 OK", "text/plain", b"trop court".to_vec()).await;
        let err = downloader().fetch(&base).await.unwrap_err();
        assert!(matches!(err, DownloadError::TooShort { length: 10, minimum: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_200() {
        let base = serve("404 Not Found", "text/plain", "x".repeat(600).into_bytes()).await;
        let err = downloader().fetch_with_retries(&base).await.unwrap_err();
        assert!(matches!(err, DownloadError::Status(StatusCode::NOT_FOUND)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_requested() {
        let err = downloader().fetch("nan").await.unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_download_all_keeps_row_order() {
        let good = serve("200 OK", "text/plain", "a".repeat(800).into_bytes()).await;
        let bad = serve("500 Internal Server Error", "text/plain", Vec::new()).await;
        let urls = vec![
            (0, good.clone()),
            (1, bad),
            (2, "not a url".to_string()),
            (3, good),
        ];

        let results = downloader()
            .with_concurrency(2)
            .download_all(urls, &NullReporter)
            .await;

        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(results[0].body.is_ok());
        assert!(matches!(results[1].body, Err(DownloadError::Status(_))));
        assert!(matches!(results[2].body, Err(DownloadError::InvalidUrl(_))));
        assert!(results[3].body.is_ok());
    }
}
