//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Page fetching behind the [`Fetcher`] trait
//! - HTML parsing and link/asset extraction
//! - The visited registry shared by all crawl tasks
//! - Fan-out limiting and overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod registry;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher, StaticFetcher};
pub use parser::{extract_elements, parse_html, ExtractedLink, ExtractedPage};
pub use registry::{Claim, Discovered, Registry};
pub use scheduler::Scheduler;

use crate::config::CrawlerConfig;
use crate::graph::PageGraph;
use crate::CrawlError;
use std::sync::Arc;

/// Crawls every page of the seed's domain with default settings
///
/// # Arguments
///
/// * `seed` - The starting URL; links are in scope when they start with it
/// * `fetcher` - Where page content comes from
///
/// # Returns
///
/// * `Ok(PageGraph)` - The crawled pages, rooted at the seed
/// * `Err(CrawlError)` - The seed was invalid or a task failed fatally
///
/// # Example
///
/// ```
/// use domain_crawler::crawler::{crawl, StaticFetcher};
/// use std::sync::Arc;
///
/// # tokio_test_block(async {
/// let fetcher = StaticFetcher::new()
///     .with_page("http://example.com", r#"<a href="/a">A</a>"#)
///     .with_page("http://example.com/a", r#"<img src="a.png">"#);
///
/// let graph = crawl("http://example.com", Arc::new(fetcher)).await.unwrap();
/// assert_eq!(graph.len(), 2);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub async fn crawl(seed: &str, fetcher: Arc<dyn Fetcher>) -> Result<PageGraph, CrawlError> {
    run_crawl(seed, fetcher, &CrawlerConfig::default()).await
}

/// Crawls with an explicit fan-out limit and failure policy
pub async fn crawl_with_config(
    seed: &str,
    fetcher: Arc<dyn Fetcher>,
    config: &CrawlerConfig,
) -> Result<PageGraph, CrawlError> {
    run_crawl(seed, fetcher, config).await
}
