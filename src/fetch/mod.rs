// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into page content.
//
// Submodules:
// - http: the real fetcher, built on reqwest
//
// The crawl engine only ever talks to the PageFetcher trait, so tests can
// hand it an in-memory site instead of the network.
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Retrieves the textual content of a page.
///
/// No retries and no redirect following. Any timeout is the implementation's
/// own business; the crawler never imposes one.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
