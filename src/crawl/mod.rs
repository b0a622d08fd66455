// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Starts from one seed URL and follows links on the same domain only
// - Every page is fetched at most once, even when crawled in parallel
// - No depth limit: the crawl stops when there is nothing new to visit
// - A page that fails to fetch is skipped, the rest of the crawl carries on
// - A cap on how many pages are being fetched at the same moment
//
// Submodules:
// - registry:    the shared set of visited URLs
// - task:        one crawl task per URL, forking a child per link found
// - coordinator: kicks off the root task and waits for the whole tree
// - report:      what a finished crawl hands back
// =============================================================================

mod coordinator;
mod registry;
mod report;
mod task;

#[cfg(test)]
mod fixtures;

pub use coordinator::{CrawlCoordinator, DEFAULT_MAX_CONCURRENT};
pub use report::CrawlReport;
