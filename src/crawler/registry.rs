//! Visited-page registry shared by all crawl tasks
//!
//! The registry owns every page record while a crawl is running. All access
//! goes through a single mutex that is only ever held for in-memory work,
//! never across a fetch.

use crate::crawler::parser::ExtractedPage;
use crate::graph::{Link, Page, PageGraph, PageId};
use crate::state::PageState;
use crate::url::is_in_domain;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of [`Registry::claim`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    /// The page registered for the URL
    pub page: PageId,

    /// True if this call created the page record
    pub is_new: bool,
}

/// A page a crawl task should be spawned for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub page: PageId,
    pub url: String,
}

#[derive(Debug, Default)]
struct RegistryInner {
    index: HashMap<String, PageId>,
    pages: Vec<Page>,
}

impl RegistryInner {
    fn claim(&mut self, url: &str) -> Claim {
        if let Some(&page) = self.index.get(url) {
            return Claim {
                page,
                is_new: false,
            };
        }

        let page = PageId(self.pages.len());
        self.pages.push(Page::new(url));
        self.index.insert(url.to_string(), page);

        Claim { page, is_new: true }
    }
}

/// Concurrency-safe map from URL to page record
#[derive(Debug, Default)]
pub struct Registry {
    inner: Mutex<RegistryInner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        // Critical sections never leave the map half-updated, so a panic in
        // another holder leaves consistent data behind
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically returns the page for `url`, creating a placeholder if needed
    pub fn claim(&self, url: &str) -> Claim {
        self.lock().claim(url)
    }

    /// Number of registered pages
    pub fn len(&self) -> usize {
        self.lock().pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pages.is_empty()
    }

    /// URL of a registered page
    #[cfg(test)]
    pub(crate) fn url(&self, page: PageId) -> Option<String> {
        self.lock().pages.get(page.0).map(|p| p.url().to_string())
    }

    /// State of a registered page
    #[cfg(test)]
    pub(crate) fn state(&self, page: PageId) -> Option<PageState> {
        self.lock().pages.get(page.0).map(Page::state)
    }

    /// Records that a crawl task now owns the page
    pub fn mark_queued(&self, page: PageId) {
        if let Some(p) = self.lock().pages.get_mut(page.0) {
            p.set_state(PageState::Queued);
        }
    }

    /// Records that fetching or parsing the page failed
    pub fn mark_failed(&self, page: PageId) {
        if let Some(p) = self.lock().pages.get_mut(page.0) {
            p.mark_failed();
        }
    }

    /// Wires the extraction result of `page` into the graph
    ///
    /// Every link target is claimed. A target that was not registered yet
    /// becomes an owned link; one that was already registered (by an
    /// ancestor, a sibling, or an earlier link on the same page) becomes a
    /// back-reference. Newly claimed targets inside `domain` are returned so
    /// the caller can schedule them; they are already marked queued.
    pub fn record(&self, page: PageId, extracted: ExtractedPage, domain: &str) -> Vec<Discovered> {
        let mut inner = self.lock();
        let mut discovered = Vec::new();
        let mut links = Vec::with_capacity(extracted.links.len());

        for found in extracted.links {
            let Some(href) = found.href else {
                links.push(Link::without_target(found.label));
                continue;
            };

            let claim = inner.claim(&href);
            if !claim.is_new {
                links.push(Link::back_reference(found.label, claim.page));
                continue;
            }

            if is_in_domain(&href, domain) {
                inner.pages[claim.page.0].set_state(PageState::Queued);
                discovered.push(Discovered {
                    page: claim.page,
                    url: href,
                });
            }
            links.push(Link::new(found.label, claim.page));
        }

        let target = &mut inner.pages[page.0];
        for link in links {
            target.push_link(link);
        }
        for asset in extracted.static_assets {
            target.push_static_asset(asset);
        }
        target.set_state(PageState::Processed);

        discovered
    }

    /// Moves every page record out into a [`PageGraph`]
    ///
    /// Called once all crawl tasks have finished; the registry is left empty.
    pub fn finish(&self, domain: &str) -> PageGraph {
        let mut inner = self.lock();
        inner.index.clear();
        PageGraph::from_parts(domain.to_string(), std::mem::take(&mut inner.pages))
    }
}
