// src/extract/mod.rs
// =============================================================================
// This module finds the links on a page that the crawler should follow.
//
// Submodules:
// - anchor: the real extractor, a regex over <a href="..."> tags
//
// Like fetching, extraction sits behind a trait so the crawl engine does not
// care how links are found.
// =============================================================================

mod anchor;

use std::collections::BTreeSet;

pub use anchor::AnchorLinkExtractor;

/// Pulls same-domain links out of page content.
///
/// Must be total: garbage in means an empty set out, never an error.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, content: &str, domain: &str) -> BTreeSet<String>;
}
