//! Page fetchers
//!
//! The crawl engine only depends on the [`Fetcher`] trait. Two
//! implementations are provided:
//! - [`HttpFetcher`]: HTTP GET through a shared reqwest client
//! - [`StaticFetcher`]: canned content from an in-memory table

use crate::config::{HttpConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Retrieves the raw content of a page
///
/// Implementations must be shareable across crawl tasks. No retries are
/// performed by the crawler; wrap a fetcher to add them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeouts for the client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with HTTP GET, following redirects
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from configuration
    pub fn new(user_agent: &UserAgentConfig, http: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, http)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Decodes using the charset from Content-Type, defaulting to UTF-8
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e)
            }
        })?;

        Ok(body.into_bytes())
    }
}

/// Serves fixed content per URL; unknown URLs fail with [`FetchError::NotFound`]
///
/// Every call is counted, which makes it easy to check how often a URL was
/// requested.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Vec<u8>>,
    fetches: std::sync::Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the content served for `url`
    pub fn with_page(self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.with_bytes(url, content.into().into_bytes())
    }

    /// Registers raw bytes served for `url`, in any encoding
    pub fn with_bytes(mut self, url: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.into(), content.into());
        self
    }

    /// How many times `url` was requested
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of requests served or refused
    pub fn total_fetches(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .fetches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(url.to_string())
            .or_insert(0) += 1;

        self.pages
            .get(url)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}
