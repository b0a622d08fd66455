// src/crawl/report.rs
// =============================================================================
// The result of a finished crawl.
//
// #[derive(Serialize)] lets main.rs print it as JSON with --json
// =============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Host of the seed URL; only links whose host contains it were followed
    pub domain: String,
    /// Every URL the crawl claimed, sorted. Includes the failed ones.
    pub visited: Vec<String>,
    /// URLs whose fetch failed, sorted
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failed: Vec<String>,
}

impl CrawlReport {
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
