//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Seeding the visited registry with the root page
//! - Spawning one fetch-parse-extract task per newly claimed in-domain page
//! - Tracking outstanding tasks until the crawl terminates
//! - Applying the configured failure policy

use crate::config::{CrawlerConfig, FailurePolicy};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{extract_elements, parse_html, ExtractedPage};
use crate::crawler::registry::{Discovered, Registry};
use crate::crawler::scheduler::Scheduler;
use crate::graph::{PageGraph, PageId};
use crate::url::{parse_seed, Seed};
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// State shared by every crawl task
struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    registry: Registry,
    scheduler: Scheduler,
    domain: String,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    seed: Seed,
    policy: FailurePolicy,
    context: Arc<CrawlContext>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL to start from; it also defines the crawl domain
    /// * `fetcher` - Where page content comes from
    /// * `config` - Fan-out limit and failure policy
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError::InvalidSeed)` - The seed is not an absolute HTTP(S) URL
    pub fn new(
        seed: &str,
        fetcher: Arc<dyn Fetcher>,
        config: &CrawlerConfig,
    ) -> Result<Self, CrawlError> {
        let seed = parse_seed(seed)?;

        let context = CrawlContext {
            fetcher,
            registry: Registry::new(),
            scheduler: Scheduler::new(config.max_concurrent_fetches),
            domain: seed.domain.clone(),
        };

        Ok(Self {
            seed,
            policy: config.failure_policy,
            context: Arc::new(context),
        })
    }

    /// Runs the crawl to completion
    ///
    /// The crawl is over when every spawned task has finished. Under
    /// [`FailurePolicy::FailFast`] the first fetch or parse error closes the
    /// scheduler, lets running tasks finish, and is returned. Under
    /// [`FailurePolicy::BestEffort`] failed pages are flagged in the graph and
    /// the crawl goes on. A panicking task is always fatal.
    pub async fn run(self) -> Result<PageGraph, CrawlError> {
        let start_time = Instant::now();
        let ctx = self.context;

        tracing::info!(
            "Starting crawl of {} (fan-out {}, {})",
            self.seed.url,
            ctx.scheduler.limit(),
            self.policy
        );

        let root = ctx.registry.claim(&self.seed.url);
        debug_assert!(root.is_new, "registry starts empty");
        ctx.registry.mark_queued(root.page);

        let mut tasks = JoinSet::new();
        tasks.spawn(crawl_page(Arc::clone(&ctx), root.page, self.seed.url.clone()));

        let mut first_error: Option<CrawlError> = None;
        let mut failed_pages = 0usize;
        let mut crawled_pages = 0usize;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(CrawlError::from).and_then(|result| result);

            match outcome {
                Ok(discovered) => {
                    crawled_pages += 1;
                    if first_error.is_some() {
                        continue;
                    }
                    for Discovered { page, url } in discovered {
                        tracing::debug!("Scheduling {}", url);
                        tasks.spawn(crawl_page(Arc::clone(&ctx), page, url));
                    }
                }
                Err(e) if self.policy == FailurePolicy::BestEffort && !is_fatal(&e) => {
                    failed_pages += 1;
                    tracing::warn!("{}", e);
                }
                Err(e) => {
                    if first_error.is_none() {
                        tracing::error!("Aborting crawl: {}", e);
                        ctx.scheduler.close();
                        first_error = Some(e);
                    } else {
                        tracing::debug!("Ignoring error after abort: {}", e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let graph = ctx.registry.finish(&ctx.domain);
        tracing::info!(
            "Crawl completed: {} pages crawled, {} failed, {} recorded in {:?}",
            crawled_pages,
            failed_pages,
            graph.len(),
            start_time.elapsed()
        );

        Ok(graph)
    }
}

/// Errors that end the crawl regardless of policy
fn is_fatal(error: &CrawlError) -> bool {
    !matches!(
        error,
        CrawlError::Fetch { .. } | CrawlError::HtmlParse { .. }
    )
}

/// Fetches, parses and records one page
///
/// Returns the newly claimed in-domain pages that still need a task.
async fn crawl_page(
    ctx: Arc<CrawlContext>,
    page: PageId,
    url: String,
) -> Result<Vec<Discovered>, CrawlError> {
    // A slot released just before an abort can still reach a waiting task
    let permit = match ctx.scheduler.admit().await {
        Some(permit) if !ctx.scheduler.is_closed() => permit,
        _ => {
            tracing::debug!("Skipping {}: crawl aborted", url);
            return Ok(Vec::new());
        }
    };

    tracing::debug!("Fetching {} ({} in flight)", url, ctx.scheduler.in_flight());
    let fetched = ctx.fetcher.fetch(&url).await;
    drop(permit);

    let content = match fetched {
        Ok(content) => content,
        Err(source) => {
            ctx.registry.mark_failed(page);
            return Err(CrawlError::Fetch { url, source });
        }
    };

    let extracted = match extract_page(&content, &url, &ctx.domain) {
        Ok(extracted) => extracted,
        Err(e) => {
            ctx.registry.mark_failed(page);
            return Err(e);
        }
    };

    tracing::debug!(
        "Processed {}: {} links, {} static assets",
        url,
        extracted.links.len(),
        extracted.static_assets.len()
    );

    let discovered = ctx.registry.record(page, extracted, &ctx.domain);
    tracing::trace!("{} pages registered", ctx.registry.len());
    Ok(discovered)
}

/// Parses content and extracts its elements without yielding
fn extract_page(content: &[u8], url: &str, domain: &str) -> Result<ExtractedPage, CrawlError> {
    let document = parse_html(content, url)?;
    Ok(extract_elements(&document, domain))
}

/// Runs a complete crawl with the given fetcher and settings
///
/// # Example
///
/// ```no_run
/// use domain_crawler::config::{Config, CrawlerConfig};
/// use domain_crawler::crawler::{run_crawl, HttpFetcher};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = HttpFetcher::new(&config.user_agent, &config.http)?;
/// let graph = run_crawl("https://example.com", Arc::new(fetcher), &config.crawler).await?;
/// println!("{}", graph);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    seed: &str,
    fetcher: Arc<dyn Fetcher>,
    config: &CrawlerConfig,
) -> Result<PageGraph, CrawlError> {
    Coordinator::new(seed, fetcher, config)?.run().await
}
