//! Statistics generation from a crawled page graph
//!
//! This module provides functionality for summarizing a [`PageGraph`] and
//! displaying the summary.

use crate::graph::{PageGraph, NO_LABEL};
use crate::state::PageState;
use crate::url::is_in_domain;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Write;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the summary was generated
    pub generated_at: DateTime<Utc>,

    /// Total number of page records (crawled or not)
    pub total_pages: u64,

    /// Count of pages by state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Pages whose URL is inside the crawl domain
    pub in_domain_pages: u64,

    /// Pages recorded from links leaving the domain
    pub out_of_domain_pages: u64,

    /// Total number of links found
    pub total_links: u64,

    /// Links that point back to an already claimed page
    pub back_references: u64,

    /// Anchors without a target
    pub links_without_target: u64,

    /// Anchors without label text
    pub unlabeled_links: u64,

    /// Total static asset references
    pub static_assets: u64,
}

impl CrawlStatistics {
    /// Builds statistics from a finished crawl
    pub fn from_graph(graph: &PageGraph) -> Self {
        let mut stats = Self {
            generated_at: Utc::now(),
            total_pages: 0,
            pages_by_state: HashMap::new(),
            in_domain_pages: 0,
            out_of_domain_pages: 0,
            total_links: 0,
            back_references: 0,
            links_without_target: 0,
            unlabeled_links: 0,
            static_assets: 0,
        };

        for (_, page) in graph.iter() {
            stats.total_pages += 1;
            *stats.pages_by_state.entry(page.state()).or_insert(0) += 1;

            if is_in_domain(page.url(), graph.domain()) {
                stats.in_domain_pages += 1;
            } else {
                stats.out_of_domain_pages += 1;
            }

            stats.static_assets += page.static_assets().len() as u64;

            for link in page.links() {
                stats.total_links += 1;
                if link.is_back_reference() {
                    stats.back_references += 1;
                }
                if link.target().is_none() {
                    stats.links_without_target += 1;
                }
                if link.label() == NO_LABEL {
                    stats.unlabeled_links += 1;
                }
            }
        }

        stats
    }

    /// Number of pages in the given state
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }
}

/// Formats statistics as a human readable report
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Statistics ===\n");
    let _ = writeln!(
        out,
        "Generated at: {}",
        stats.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Total pages recorded: {}", stats.total_pages);
    let _ = writeln!(out, "  In-domain pages: {}", stats.in_domain_pages);
    let _ = writeln!(out, "  Out-of-domain pages: {}", stats.out_of_domain_pages);
    let _ = writeln!(out, "  Total links found: {}", stats.total_links);
    let _ = writeln!(out, "  Back-references: {}", stats.back_references);
    let _ = writeln!(out, "  Links without target: {}", stats.links_without_target);
    let _ = writeln!(out, "  Unlabeled links: {}", stats.unlabeled_links);
    let _ = writeln!(out, "  Static assets: {}", stats.static_assets);
    let _ = writeln!(out);

    let _ = writeln!(out, "Pages by State:");
    for state in PageState::all_states() {
        let count = stats.count(state);
        if count == 0 {
            continue;
        }
        let percentage = if stats.total_pages > 0 {
            (count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        let _ = writeln!(out, "  {}: {} ({:.1}%)", state, count, percentage);
    }
    let _ = writeln!(out);

    // Success rate over pages a task actually ran for
    let processed = stats.count(PageState::Processed);
    let attempted = processed + stats.count(PageState::Failed);
    let success_rate = if attempted > 0 {
        (processed as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };

    let _ = writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        success_rate, processed, attempted
    );

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}
