// src/services/fetcher.rs

//! Page fetching with transparent rate-limit retry.
//!
//! The fetcher issues one logical page request at a time. Rate-limit
//! responses (429) are retried with a delay taken from the server's
//! Retry-After header when present, falling back to a fixed backoff.
//! Exhausted retries degrade to a synthetic forbidden response so the
//! caller always has a concrete response to classify; only transport-level
//! failures surface as errors.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Raw outcome of one page request, with the status carried as data.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub url: String,
    pub body: String,

    /// Server-provided retry delay in seconds, when rate limited
    pub retry_after: Option<u64>,
}

impl PageResponse {
    /// Synthetic forbidden response returned when the retry budget runs out.
    fn forbidden(url: String) -> Self {
        Self {
            status: 403,
            url,
            body: "Max retries exhausted".to_string(),
            retry_after: None,
        }
    }
}

/// A single HTTP GET with response-error-as-data semantics.
///
/// Implementations never fail on non-2xx statuses; those come back as
/// ordinary [`PageResponse`] values for the caller to classify.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<PageResponse>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the configured User-Agent and timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<PageResponse> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        let url = response.url().to_string();
        let body = response.text().await?;

        Ok(PageResponse {
            status,
            url,
            body,
            retry_after,
        })
    }
}

/// Injectable delay so tests can substitute a zero-cost wait.
pub type Sleeper =
    Arc<dyn Fn(Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

fn tokio_sleeper() -> Sleeper {
    Arc::new(|duration| Box::pin(tokio::time::sleep(duration)))
}

/// Issues a single logical page request, retrying on rate limits.
///
/// Stateless across calls: the retry budget resets for every `fetch`.
pub struct RetryingFetcher {
    transport: Box<dyn Transport>,
    base_url: String,
    max_retries: u32,
    backoff: Duration,
    sleeper: Sleeper,
}

impl RetryingFetcher {
    pub fn new(transport: Box<dyn Transport>, config: &CrawlerConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
            max_retries: config.max_retries,
            backoff: Duration::from_secs(config.backoff_secs),
            sleeper: tokio_sleeper(),
        }
    }

    /// Replace the delay function (tests substitute a recording no-op).
    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Request URL for a given catalog page.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}?page={}", self.base_url, page)
    }

    /// Fetch one catalog page.
    pub async fn fetch(&self, page: u32) -> Result<PageResponse> {
        let url = self.page_url(page);
        let mut attempts = 0;

        while attempts < self.max_retries {
            let response = self.transport.get(&url).await?;

            if response.status != 429 {
                return Ok(response);
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = response
                    .retry_after
                    .map(Duration::from_secs)
                    .unwrap_or(self.backoff);
                log::warn!(
                    "Rate limited on {} (attempt {}/{}), retrying in {:?}",
                    url,
                    attempts,
                    self.max_retries,
                    delay
                );
                (self.sleeper)(delay).await;
            }
        }

        log::warn!("Retry budget exhausted for {}", url);
        Ok(PageResponse::forbidden(url))
    }
}
