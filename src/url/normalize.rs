/// Normalizes an `href` value found on a page
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Rewrite root-relative paths (`/about`) as `domain + path`
///
/// Every other form (absolute, scheme-relative, document-relative, fragments)
/// is kept as written. The result is the key used by the visited registry, so
/// the rewrite must happen before any dedup or scope check.
///
/// # Examples
///
/// ```
/// use domain_crawler::url::normalize_href;
///
/// assert_eq!(normalize_href(" /about ", "http://example.com"), "http://example.com/about");
/// assert_eq!(normalize_href("https://other.org/", "http://example.com"), "https://other.org/");
/// ```
pub fn normalize_href(href: &str, domain: &str) -> String {
    let href = href.trim();

    if href.starts_with('/') {
        format!("{}{}", domain, href)
    } else {
        href.to_string()
    }
}

/// Returns true if a normalized URL belongs to the seed domain
///
/// Scope is a plain prefix match against the domain string.
pub fn is_in_domain(url: &str, domain: &str) -> bool {
    url.starts_with(domain)
}
