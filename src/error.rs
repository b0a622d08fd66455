// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are only three kinds of failure:
// - SeedError:  the seed URL has no usable host. Fatal, nothing gets crawled.
// - FetchError: one page could not be fetched. Local to that page only.
// - CrawlError: the driver could not even start (bad seed, no runtime).
//
// Link extraction has no error type: it never fails, it just finds no links.
// =============================================================================

use thiserror::Error;

/// The seed URL could not be turned into a crawl domain.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed URL '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL has no host: {url}")]
    MissingHost { url: String },
}

/// A single page fetch failed.
///
/// The task that hit it logs a warning and stops; siblings and parents
/// carry on as if nothing happened.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Anything that stops a crawl before it starts.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("failed to start crawl runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
