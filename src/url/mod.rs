//! URL handling module for Domain-Crawler
//!
//! This module validates the seed URL, derives the crawl domain from it, and
//! normalizes the `href` values found on crawled pages.

mod normalize;

use crate::{UrlError, UrlResult};
use ::url::Url;

// Re-export main functions
pub use normalize::{is_in_domain, normalize_href};

/// The validated starting point of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// The seed URL as given (trimmed); key of the root page
    pub url: String,

    /// Prefix that decides which links are in scope
    pub domain: String,
}

/// Validates a seed URL and derives its crawl domain
///
/// The seed must be an absolute `http` or `https` URL. The domain is the seed
/// with any trailing `/` removed, so root-relative links rewrite cleanly.
///
/// # Examples
///
/// ```
/// use domain_crawler::url::parse_seed;
///
/// let seed = parse_seed("http://example.com/").unwrap();
/// assert_eq!(seed.url, "http://example.com/");
/// assert_eq!(seed.domain, "http://example.com");
///
/// assert!(parse_seed("ftp://example.com").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Seed> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            parsed.scheme()
        )));
    }

    Ok(Seed {
        url: seed.to_string(),
        domain: seed.trim_end_matches('/').to_string(),
    })
}
