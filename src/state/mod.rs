//! State module for tracking crawl progress
//!
//! - `PageState`: lifecycle of an individual page (discovered, queued, processed, failed)

mod page_state;

// Re-export main types
pub use page_state::PageState;
