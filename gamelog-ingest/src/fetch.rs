//! Source fetching: HTTP capability behind a trait, plus per-URL caching
//!
//! The pipeline never talks to `reqwest` directly. It sees a [`Fetcher`]
//! capability (`fetch(url) -> body`) wrapped in a [`SourceCache`], so tests
//! inject canned bodies and count calls, and repeated extraction from the
//! same source within one run reuses a single fetch.

use async_trait::async_trait;
use gamelog_common::{Error, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for source fetches
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability for fetching one source body by URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Production fetcher over a timeout-configured reqwest client
pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "GET {} returned status {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("reading body of {} failed: {}", url, e)))
    }
}

/// Memoizes raw response bodies by URL for the lifetime of the run.
///
/// No TTL and no eviction: the dataset is bounded by the source count and
/// the host process is run-to-completion, so stale entries cannot exist.
pub struct SourceCache<F: Fetcher> {
    fetcher: F,
    saved: HashMap<String, String>,
}

impl<F: Fetcher> SourceCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            saved: HashMap::new(),
        }
    }

    /// Return the cached body for `url`, fetching it on first use.
    pub async fn get_or_fetch(&mut self, url: &str) -> Result<&str> {
        if !self.saved.contains_key(url) {
            let body = self.fetcher.fetch(url).await?;
            info!(url, bytes = body.len(), "Fetched source body");
            self.saved.insert(url.to_string(), body);
        } else {
            debug!(url, "Source body served from cache");
        }
        Ok(self
            .saved
            .get(url)
            .expect("entry inserted above")
            .as_str())
    }
}
