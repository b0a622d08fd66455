// src/crawl/fixtures.rs
// =============================================================================
// Test helpers: an in-memory website that counts how often each page is hit,
// and how many fetches were ever running at the same time.
// =============================================================================

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use super::coordinator::DEFAULT_MAX_CONCURRENT;
use super::task::CrawlContext;
use crate::error::FetchError;
use crate::extract::AnchorLinkExtractor;
use crate::fetch::PageFetcher;

enum Page {
    Html(String),
    Down,
}

/// PageFetcher over a fixed url -> page map.
///
/// URLs that are not in the map answer 404.
#[derive(Default)]
pub(crate) struct FixtureFetcher {
    pages: HashMap<String, Page>,
    calls: DashMap<String, usize>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FixtureFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a page whose body is one anchor tag per link.
    pub(crate) fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.pages.insert(url.to_string(), Page::Html(anchors(links)));
        self
    }

    /// Adds a page that always fails to fetch.
    pub(crate) fn failing(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Page::Down);
        self
    }

    /// Makes every fetch take `delay`, so concurrent fetches overlap.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Most fetches that were ever running at once.
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls.get(url).map(|count| *count).unwrap_or(0)
    }

    pub(crate) fn call_counts(&self) -> HashMap<String, usize> {
        self.calls
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        // Give other tasks a chance to run in between
        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.pages.get(url) {
            Some(Page::Html(html)) => Ok(html.clone()),
            Some(Page::Down) => Err(FetchError::Connect("connection refused".to_string())),
            None => Err(FetchError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }
}

pub(crate) fn anchors(links: &[&str]) -> String {
    links
        .iter()
        .map(|link| format!("<a href=\"{link}\">{link}</a>"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A crawl context over `fetcher` with the real anchor extractor.
pub(crate) fn context(domain: &str, fetcher: Arc<FixtureFetcher>) -> Arc<CrawlContext> {
    context_with_limit(domain, fetcher, DEFAULT_MAX_CONCURRENT.get())
}

/// Same as `context`, allowing at most `max_concurrent` fetches at once.
pub(crate) fn context_with_limit(
    domain: &str,
    fetcher: Arc<FixtureFetcher>,
    max_concurrent: usize,
) -> Arc<CrawlContext> {
    Arc::new(CrawlContext::new(
        domain.to_string(),
        fetcher,
        Arc::new(AnchorLinkExtractor::new()),
        NonZeroUsize::new(max_concurrent).expect("limit must be non-zero"),
    ))
}
