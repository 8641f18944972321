//! Page state definitions for tracking crawl progress
//!
//! Every page record is created in `Discovered` the moment its URL is claimed.
//! Pages inside the seed domain move to `Queued` when a crawl task is spawned
//! for them and end in `Processed` or `Failed`. Out-of-domain pages are never
//! fetched and stay `Discovered`.

use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageState {
    // ===== Active States =====
    /// URL has been claimed but no crawl task was scheduled for it
    #[default]
    Discovered,

    /// A crawl task owns this page and has not finished yet
    Queued,

    // ===== Terminal States =====
    /// Page was fetched, parsed, and its links and assets recorded
    Processed,

    /// Fetch or parse failed; the page carries no links or assets
    Failed,
}

impl PageState {
    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Short machine-friendly name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Queued => "queued",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> [Self; 4] {
        [Self::Discovered, Self::Queued, Self::Processed, Self::Failed]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
