//! Page graph produced by a crawl
//!
//! Pages live in an arena owned by [`PageGraph`] and refer to each other
//! through [`PageId`] handles. The graph may contain cycles; links flagged as
//! back-references close them, and both equality and rendering stop at those
//! links instead of descending again.

mod page;

pub use page::{Link, Page, PageId, NO_LABEL};

use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, IndexMut};

/// The complete result of a crawl: a root page plus every page reachable from it
#[derive(Debug, Clone)]
pub struct PageGraph {
    domain: String,
    root: PageId,
    pages: Vec<Page>,
}

impl PageGraph {
    /// Creates a graph holding only the root page
    ///
    /// The domain is the root URL without trailing slashes, as for a crawl.
    pub fn new(root_url: impl Into<String>) -> Self {
        let root_url = root_url.into();
        let domain = root_url.trim_end_matches('/').to_string();

        Self {
            domain,
            root: PageId(0),
            pages: vec![Page::new(root_url)],
        }
    }

    pub(crate) fn from_parts(domain: String, pages: Vec<Page>) -> Self {
        debug_assert!(!pages.is_empty(), "a crawl always registers its seed");
        Self {
            domain,
            root: PageId(0),
            pages,
        }
    }

    /// Appends a new page record and returns its handle
    ///
    /// No deduplication happens here; the crawl registry is what guarantees a
    /// single record per URL.
    pub fn add_page(&mut self, url: impl Into<String>) -> PageId {
        self.pages.push(Page::new(url));
        PageId(self.pages.len() - 1)
    }

    /// Domain prefix the crawl was scoped to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn root(&self) -> PageId {
        self.root
    }

    pub fn root_page(&self) -> &Page {
        &self[self.root]
    }

    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.0)
    }

    pub fn get_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.get_mut(id.0)
    }

    /// Looks up the first page recorded for a URL
    pub fn find(&self, url: &str) -> Option<PageId> {
        self.pages.iter().position(|p| p.url() == url).map(PageId)
    }

    /// Number of page records, crawled or not
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over every page record in claim order
    pub fn iter(&self) -> impl Iterator<Item = (PageId, &Page)> {
        self.pages.iter().enumerate().map(|(i, p)| (PageId(i), p))
    }

    /// Follows a link to its target page
    pub fn target(&self, link: &Link) -> Option<&Page> {
        link.target().and_then(|id| self.get(id))
    }
}

impl Index<PageId> for PageGraph {
    type Output = Page;

    fn index(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }
}

impl IndexMut<PageId> for PageGraph {
    fn index_mut(&mut self, id: PageId) -> &mut Page {
        &mut self.pages[id.0]
    }
}

/// Structural comparison starting at both roots
///
/// Arena positions never matter. Targets of back-reference links are not
/// compared, which keeps the comparison finite on cyclic graphs. Page pairs
/// are walked with an explicit stack, so deep chains need no call depth.
impl PartialEq for PageGraph {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.root, other.root)];
        let mut compared = HashSet::new();

        while let Some((a, b)) = pending.pop() {
            if !compared.insert((a, b)) {
                continue;
            }
            let (Some(page_a), Some(page_b)) = (self.get(a), other.get(b)) else {
                return false;
            };
            if !shallow_equal(page_a, page_b) {
                return false;
            }

            for (link_a, link_b) in page_a.links().iter().zip(page_b.links()) {
                match (link_a.target(), link_b.target()) {
                    (None, None) => {}
                    (Some(_), Some(_)) if link_a.is_back_reference() => {}
                    (Some(ta), Some(tb)) => pending.push((ta, tb)),
                    _ => return false,
                }
            }
        }

        true
    }
}

/// Compares one page pair without following any link
fn shallow_equal(a: &Page, b: &Page) -> bool {
    a.url() == b.url()
        && a.static_assets() == b.static_assets()
        && a.links().len() == b.links().len()
        && a.links().iter().zip(b.links()).all(|(link_a, link_b)| {
            link_a.label() == link_b.label()
                && link_a.is_back_reference() == link_b.is_back_reference()
        })
}

impl fmt::Display for PageGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::output::render_tree(self))
    }
}
