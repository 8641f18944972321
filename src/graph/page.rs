use crate::state::PageState;

/// Label given to links without any direct text
pub const NO_LABEL: &str = "<no label>";

/// Stable handle of a page inside a [`PageGraph`](super::PageGraph)
///
/// Two links that point to the same URL hold the same `PageId`, which is how
/// the graph keeps reference identity without sharing ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub(crate) usize);

impl PageId {
    /// Position of the page in its graph's arena
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Everything recorded about one URL
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    state: PageState,
    links: Vec<Link>,
    static_assets: Vec<String>,
}

impl Page {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: PageState::Discovered,
            links: Vec::new(),
            static_assets: Vec::new(),
        }
    }

    /// Normalized absolute address of the page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Crawl lifecycle state
    pub fn state(&self) -> PageState {
        self.state
    }

    /// True when fetching or parsing this page failed
    pub fn fetch_failed(&self) -> bool {
        self.state.is_error()
    }

    /// Links in document order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Stylesheet, script and image references in document order
    pub fn static_assets(&self) -> &[String] {
        &self.static_assets
    }

    /// Appends a link record
    pub fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Appends a static asset reference
    pub fn push_static_asset(&mut self, asset: impl Into<String>) {
        self.static_assets.push(asset.into());
    }

    /// Sets the crawl state
    pub fn set_state(&mut self, state: PageState) {
        self.state = state;
    }

    /// Marks the page as failed, discarding anything recorded for it
    pub fn mark_failed(&mut self) {
        self.state = PageState::Failed;
        self.links.clear();
        self.static_assets.clear();
    }
}

/// One anchor element found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    label: String,
    target: Option<PageId>,
    back_reference: bool,
}

impl Link {
    /// A link that owns its target: renderers descend into it
    pub fn new(label: impl Into<String>, target: PageId) -> Self {
        Self {
            label: label.into(),
            target: Some(target),
            back_reference: false,
        }
    }

    /// A link to a page that was claimed elsewhere in the traversal
    pub fn back_reference(label: impl Into<String>, target: PageId) -> Self {
        Self {
            label: label.into(),
            target: Some(target),
            back_reference: true,
        }
    }

    /// An anchor without a usable `href`
    pub fn without_target(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
            back_reference: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> Option<PageId> {
        self.target
    }

    pub fn is_back_reference(&self) -> bool {
        self.back_reference
    }
}
