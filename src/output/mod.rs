//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering the page graph as an indented text tree
//! - Summarizing a crawl as statistics

pub mod stats;
mod tree;

pub use stats::{format_statistics, print_statistics, CrawlStatistics};
pub use tree::{render_banner, render_page, render_tree};
