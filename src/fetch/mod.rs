//! Remote biography retrieval.
//!
//! [`BioFetcher`] is the injected async capability the modal controller
//! depends on; [`WikipediaClient`] is the production implementation against
//! the Wikipedia REST summary endpoint. One attempt per call, no internal
//! retry: a failed fetch surfaces as a biography error state with a manual
//! external link, and the user retries by re-opening.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Character budget applied to raw extracts before caching or display.
pub const BIO_CHAR_BUDGET: usize = 600;

/// Async capability that retrieves raw summary text for an author's remote
/// summary identifier.
#[async_trait]
pub trait BioFetcher: Send + Sync {
    /// Fetches the raw extract for a summary identifier.
    ///
    /// An empty extract is a valid result. Single attempt; callers decide
    /// whether and when to try again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport failure or a non-success
    /// response.
    async fn fetch(&self, page_id: &str) -> Result<String>;
}

/// Truncates a raw extract to the display budget.
///
/// Text within the budget is returned unchanged. Longer text is cut at the
/// budget (in characters), then the trailing partial sentence is discarded
/// by keeping everything through the last period inside the window. A
/// window with no period at all yields the literal prefix with a period
/// appended.
#[must_use]
pub fn truncate_extract(extract: &str, budget: usize) -> String {
    match extract.char_indices().nth(budget) {
        None => extract.to_string(),
        Some((cut, _)) => {
            let window = &extract[..cut];
            window
                .rfind('.')
                .map_or_else(|| format!("{window}."), |i| window[..=i].to_string())
        },
    }
}

/// Wikipedia REST summary endpoint response.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    /// The plain-text extract; absent for some page types.
    #[serde(default)]
    extract: Option<String>,
}

/// Biography fetcher backed by the Wikipedia REST summary endpoint.
pub struct WikipediaClient {
    /// Base endpoint; the page id is appended as a path segment.
    endpoint: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl WikipediaClient {
    /// Default summary endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://en.wikipedia.org/api/rest_v1/page/summary";

    /// Request timeout for summary lookups.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new client, honoring `AUTHORGRAPH_WIKIPEDIA_ENDPOINT`.
    #[must_use]
    pub fn new() -> Self {
        let endpoint = std::env::var("AUTHORGRAPH_WIKIPEDIA_ENDPOINT")
            .unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_string());
        Self {
            endpoint,
            client: build_http_client(),
        }
    }

    /// Sets the summary endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builds the summary URL with the page id percent-encoded as a path
    /// segment.
    fn summary_url(&self, page_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| Error::InvalidInput(format!("invalid summary endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidInput("summary endpoint cannot be a base URL".to_string()))?
            .push(page_id);
        Ok(url)
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BioFetcher for WikipediaClient {
    async fn fetch(&self, page_id: &str) -> Result<String> {
        let url = self.summary_url(page_id)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            let error_kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connect"
            } else if e.is_request() {
                "request"
            } else {
                "unknown"
            };
            tracing::error!(
                page_id,
                error = %e,
                error_kind,
                "summary request failed"
            );
            Error::Fetch {
                page_id: page_id.to_string(),
                cause: format!("{error_kind} error: {e}"),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(page_id, status = %status, "summary endpoint returned error status");
            return Err(Error::Fetch {
                page_id: page_id.to_string(),
                cause: format!("status {status}"),
            });
        }

        let summary: SummaryResponse = response.json().await.map_err(|e| {
            tracing::error!(page_id, error = %e, "failed to parse summary response");
            Error::Fetch {
                page_id: page_id.to_string(),
                cause: e.to_string(),
            }
        })?;

        Ok(summary.extract.unwrap_or_default())
    }
}

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(WikipediaClient::REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}
