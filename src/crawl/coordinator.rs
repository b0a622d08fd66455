// src/crawl/coordinator.rs
// =============================================================================
// Starts a crawl and waits for it to finish.
//
// How it works:
// 1. Work out the domain from the seed URL (a bad seed stops everything here)
// 2. Create an empty registry, wrapped in a context every task can share
// 3. Spawn the root task and wait for it. The root only finishes once every
//    task it (transitively) forked has finished.
// 4. Read the registry and return the report
//
// At most `max_concurrent` pages are fetched at the same time (default 50).
//
// run() is async and uses whatever tokio runtime it is called from.
// run_blocking() builds a runtime just for this one crawl and drops it after.
// =============================================================================

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, error, info};
use url::Url;

use super::report::CrawlReport;
use super::task::{CrawlContext, CrawlTask};
use crate::error::{CrawlError, SeedError};
use crate::extract::LinkExtractor;
use crate::fetch::PageFetcher;

/// How many fetches may be in flight at once unless told otherwise.
pub const DEFAULT_MAX_CONCURRENT: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(limit) => limit,
    None => panic!("default fetch limit must be non-zero"),
};

pub struct CrawlCoordinator {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    max_concurrent: NonZeroUsize,
}

impl CrawlCoordinator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Arc<dyn LinkExtractor>) -> Self {
        Self {
            fetcher,
            extractor,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Caps the number of pages fetched at the same time.
    pub fn with_max_concurrent(mut self, max_concurrent: NonZeroUsize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Crawls everything reachable from `seed_url` on the seed's domain.
    ///
    /// The only error is a seed URL without a usable host. Pages that fail
    /// to fetch end up in `CrawlReport::failed`, not in the error.
    pub async fn run(&self, seed_url: &str) -> Result<CrawlReport, SeedError> {
        let domain = derive_domain(seed_url)?;
        info!(seed = %seed_url, domain = %domain, "starting crawl");

        let ctx = Arc::new(CrawlContext::new(
            domain,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            self.max_concurrent,
        ));

        let root = CrawlTask::new(seed_url.to_string(), Arc::clone(&ctx));
        match tokio::spawn(root.run()).await {
            Ok(outcome) => debug!(?outcome, claimed = ctx.registry.len(), "root task joined"),
            Err(e) => error!(error = %e, "root crawl task panicked"),
        }

        let report = ctx.report();
        info!(
            visited = report.visited.len(),
            failed = report.failed.len(),
            "crawl finished"
        );
        Ok(report)
    }

    /// Same as `run`, on a fresh multi-threaded runtime that lives only as
    /// long as this crawl. `workers` defaults to one thread per core.
    pub fn run_blocking(
        &self,
        seed_url: &str,
        workers: Option<NonZeroUsize>,
    ) -> Result<CrawlReport, CrawlError> {
        // Fail before spinning up any threads
        derive_domain(seed_url)?;

        let mut builder = tokio::runtime::Builder::new_multi_thread();
        if let Some(workers) = workers {
            builder.worker_threads(workers.get());
        }
        let runtime = builder.enable_all().build()?;

        let report = runtime.block_on(self.run(seed_url))?;
        Ok(report)
    }
}

/// The host of `seed_url`, e.g. "example.com" for "https://example.com/docs".
pub fn derive_domain(seed_url: &str) -> Result<String, SeedError> {
    let url = Url::parse(seed_url).map_err(|source| SeedError::Parse {
        url: seed_url.to_string(),
        source,
    })?;

    url.host_str()
        .map(str::to_string)
        .ok_or_else(|| SeedError::MissingHost {
            url: seed_url.to_string(),
        })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the root task spawned instead of just awaited?
//    - A spawned task that panics gives back Err(JoinError) instead of
//      taking the whole crawl down with it
//    - The report still contains every URL visited before the panic
//
// 2. What is Runtime::block_on?
//    - Runs one future to completion on the runtime and blocks the calling
//      thread until it is done
//    - It is the bridge from normal code (main) into async code
//
// 3. Why Arc<dyn PageFetcher>?
//    - dyn Trait means "any type implementing this trait", chosen at runtime
//    - Tests pass an in-memory fetcher, main passes the HTTP one
//    - Arc lets every crawl task share the same instance
// -----------------------------------------------------------------------------
