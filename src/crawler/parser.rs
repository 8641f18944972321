//! HTML parser and element extractor
//!
//! This module turns raw page content into an element tree and walks it to
//! collect:
//! - One link record per `<a>` element, with its label and normalized target
//! - Static asset references from `<link href>`, `<img src>` and `<script src>`

use crate::graph::NO_LABEL;
use crate::url::normalize_href;
use crate::CrawlError;
use scraper::node::Element;
use scraper::Html;

/// How many leading bytes are checked for binary content
const BINARY_SNIFF_LEN: usize = 1024;

/// A link found on a page, before it is wired into the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Direct text of the anchor, or `<no label>`
    pub label: String,

    /// Normalized target; `None` when the anchor has no `href`
    pub href: Option<String>,
}

/// Everything extracted from one page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub links: Vec<ExtractedLink>,
    pub static_assets: Vec<String>,
}

/// Parses raw page content into an element tree
///
/// The HTML5 parsing algorithm recovers from any markup (unclosed tags are
/// auto-closed, names are case-folded). Bytes that are not valid UTF-8 are
/// replaced with U+FFFD, so pages in legacy encodings still yield their
/// links. Only binary content, detected by a NUL byte near the start, is
/// rejected.
///
/// # Arguments
///
/// * `content` - Raw response body
/// * `url` - Page URL, used to attribute errors
///
/// # Example
///
/// ```
/// use domain_crawler::crawler::{extract_elements, parse_html};
///
/// let html = br#"<html><body><a href="/page">Link</a></body></html>"#;
/// let document = parse_html(html, "https://example.com").unwrap();
/// let page = extract_elements(&document, "https://example.com");
/// assert_eq!(page.links[0].href.as_deref(), Some("https://example.com/page"));
/// ```
pub fn parse_html(content: &[u8], url: &str) -> Result<Html, CrawlError> {
    let head = &content[..content.len().min(BINARY_SNIFF_LEN)];
    if head.contains(&0) {
        return Err(CrawlError::HtmlParse {
            url: url.to_string(),
            message: "content is binary, not markup".to_string(),
        });
    }

    Ok(Html::parse_document(&String::from_utf8_lossy(content)))
}

/// Walks the element tree in document order and extracts links and assets
///
/// The walk is pre-order and descends into every element, so anchors nested
/// in other markup (and markup nested in anchors) are all visited. The
/// descendant iterator keeps the walk iterative regardless of nesting depth.
pub fn extract_elements(document: &Html, domain: &str) -> ExtractedPage {
    let mut page = ExtractedPage::default();

    for node in document.tree.root().descendants() {
        let Some(element) = node.value().as_element() else {
            continue;
        };

        let name = element.name();
        if name.eq_ignore_ascii_case("a") {
            let href = first_attr(element, "href").map(|href| normalize_href(href, domain));
            let texts = node.children().filter_map(|child| child.value().as_text());
            page.links.push(ExtractedLink {
                label: compose_label(texts.map(|text| &**text)),
                href,
            });
        } else if name.eq_ignore_ascii_case("link") {
            if let Some(href) = first_attr(element, "href") {
                page.static_assets.push(href.to_string());
            }
        } else if name.eq_ignore_ascii_case("img") || name.eq_ignore_ascii_case("script") {
            if let Some(src) = first_attr(element, "src") {
                page.static_assets.push(src.to_string());
            }
        }
    }

    page
}

/// Returns the value of the first attribute called `name`
fn first_attr<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element
        .attrs()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// Joins trimmed, non-empty text runs with newlines
fn compose_label<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    let runs: Vec<&str> = texts.map(str::trim).filter(|s| !s.is_empty()).collect();

    if runs.is_empty() {
        NO_LABEL.to_string()
    } else {
        runs.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "http://example.com";

    fn extract(html: &str) -> ExtractedPage {
        let document = parse_html(html.as_bytes(), DOMAIN).unwrap();
        extract_elements(&document, DOMAIN)
    }

    fn assets(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lower_case_document() {
        let page = extract(
            r#"<html>
  <head>
    <link rel="stylesheet" type="text/css" href="example.css">
  </head>
  <body>
    <a href="example.net">Example</a>
    <img src="example.png" alt="example"/>
    <script type="text/javascript" src="example.js"></script>
  </body>
</html>"#,
        );

        assert_eq!(
            page.links,
            vec![ExtractedLink {
                label: "Example".to_string(),
                href: Some("example.net".to_string()),
            }]
        );
        assert_eq!(
            page.static_assets,
            assets(&["example.css", "example.png", "example.js"])
        );
    }

    #[test]
    fn test_upper_case_document() {
        let page = extract(
            r#"<html>
  <head>
    <LINK rel="stylesheet" type="text/css" HREF="example.css">
  </head>
  <body>
    <A HREF="example.net">Example</A>
    <IMG SRC="example.png" alt="example"/>
    <SCRIPT type="text/javascript" SRC="example.js"/>
  </body>
</html>"#,
        );

        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].label, "Example");
        assert_eq!(page.links[0].href.as_deref(), Some("example.net"));
        assert_eq!(
            page.static_assets,
            assets(&["example.css", "example.png", "example.js"])
        );
    }

    #[test]
    fn test_unclosed_tags() {
        let page = extract(
            r#"<html>
  <head>
    <link rel="stylesheet" type="text/css" href="example.css">
  </head>
  <body>
    <a href="example.net">Example
    <img src="example.png" alt="example">
    <script type="text/javascript" src="example.js">
  </body>
</html>"#,
        );

        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].label, "Example");
        assert_eq!(
            page.static_assets,
            assets(&["example.css", "example.png", "example.js"])
        );
    }

    #[test]
    fn test_label_uses_direct_text_only() {
        let page = extract(r#"<a href="x">Example<span>Test</span>Link</a>"#);
        assert_eq!(page.links[0].label, "Example\nLink");
    }

    #[test]
    fn test_empty_label() {
        let page = extract(r#"<a href="x"></a><a href="y">   </a><a href="z"><b>bold</b></a>"#);
        assert_eq!(page.links.len(), 3);
        assert!(page.links.iter().all(|l| l.label == "<no label>"));
    }

    #[test]
    fn test_anchor_without_href() {
        let page = extract(r#"<a name="top">Top</a>"#);
        assert_eq!(
            page.links,
            vec![ExtractedLink {
                label: "Top".to_string(),
                href: None,
            }]
        );
    }

    #[test]
    fn test_first_href_wins() {
        let page = extract(r#"<a href="/first" HREF="/second">Dup</a>"#);
        assert_eq!(
            page.links[0].href.as_deref(),
            Some("http://example.com/first")
        );
    }

    #[test]
    fn test_href_trimmed_and_rewritten() {
        let page = extract("<a href=\"  /about.html \n\">About</a>");
        assert_eq!(
            page.links[0].href.as_deref(),
            Some("http://example.com/about.html")
        );
    }

    #[test]
    fn test_nested_anchors_in_markup() {
        let page = extract(
            r#"<div><ul><li><a href="/a">A</a></li><li><p><a href="/b">B</a></p></li></ul></div>"#,
        );
        let hrefs: Vec<_> = page.links.iter().filter_map(|l| l.href.as_deref()).collect();
        assert_eq!(hrefs, vec!["http://example.com/a", "http://example.com/b"]);
    }

    #[test]
    fn test_document_order_preserved() {
        let page = extract(
            r#"<script src="1.js"></script><a href="/1">1</a><img src="2.png"><a href="/2">2</a><link href="3.css">"#,
        );
        assert_eq!(page.static_assets, assets(&["1.js", "2.png", "3.css"]));
        assert_eq!(page.links[0].label, "1");
        assert_eq!(page.links[1].label, "2");
    }

    #[test]
    fn test_elements_without_source_ignored() {
        let page = extract(r#"<img alt="none"><script>var x = 1;</script><link rel="icon">"#);
        assert!(page.static_assets.is_empty());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_legacy_encoding_keeps_links() {
        let document = parse_html(b"<a href=\"/b\">Caf\xE9</a>", DOMAIN).unwrap();
        let page = extract_elements(&document, DOMAIN);

        assert_eq!(
            page.links,
            vec![ExtractedLink {
                label: "Caf\u{FFFD}".to_string(),
                href: Some("http://example.com/b".to_string()),
            }]
        );
    }

    #[test]
    fn test_binary_content_is_parse_error() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let result = parse_html(png, DOMAIN);
        assert!(matches!(result, Err(CrawlError::HtmlParse { .. })));
    }

    #[test]
    fn test_compose_label() {
        assert_eq!(compose_label(["  one ", "", "two"].into_iter()), "one\ntwo");
        assert_eq!(compose_label(std::iter::empty()), NO_LABEL);
    }
}
