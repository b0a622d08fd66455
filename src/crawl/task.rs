// src/crawl/task.rs
// =============================================================================
// One unit of crawl work: "process this URL".
//
// Lifecycle of a task:
// 1. Claim the URL in the registry. If someone already has it, stop (Rejected)
// 2. Fetch the page. If that fails, log it and stop (Failed)
// 3. Extract the same-domain links on the page
// 4. Fork: spawn one child task per link onto the runtime
// 5. Join: wait for every child before reporting Done
//
// Step 5 is what makes the whole thing work: a task only finishes after its
// entire subtree has finished, so when the root task finishes, the crawl is
// over.
//
// Fetches are rate limited by a semaphore shared by the whole crawl: at most
// `max_concurrent` requests are in flight at once, no matter how many links a
// page has. The permit is held for the fetch only. A task waiting on its
// children holds nothing, otherwise a deep site would use up every permit
// with parents that are just waiting.
//
// Children are spawned, not called. Every task is its own heap-allocated
// future on the tokio scheduler, so a very deep site does not mean a very deep
// native stack.
// =============================================================================

use std::num::NonZeroUsize;
use std::sync::Arc;

use dashmap::DashSet;
use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use super::registry::VisitedRegistry;
use super::report::CrawlReport;
use crate::extract::LinkExtractor;
use crate::fetch::PageFetcher;

/// State shared by every task of one crawl.
pub(crate) struct CrawlContext {
    pub(crate) domain: String,
    pub(crate) registry: VisitedRegistry,
    // URLs that were claimed but could not be fetched
    pub(crate) failures: DashSet<String>,
    pub(crate) fetcher: Arc<dyn PageFetcher>,
    pub(crate) extractor: Arc<dyn LinkExtractor>,
    // One permit per fetch allowed in flight
    pub(crate) fetch_permits: Semaphore,
}

impl CrawlContext {
    pub(crate) fn new(
        domain: String,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        max_concurrent: NonZeroUsize,
    ) -> Self {
        Self {
            domain,
            registry: VisitedRegistry::new(),
            failures: DashSet::new(),
            fetcher,
            extractor,
            fetch_permits: Semaphore::new(max_concurrent.get()),
        }
    }

    /// Snapshot of the crawl. Call only after the root task has joined.
    pub(crate) fn report(&self) -> CrawlReport {
        let mut failed: Vec<String> = self
            .failures
            .iter()
            .map(|url| url.key().clone())
            .collect();
        failed.sort();

        CrawlReport {
            domain: self.domain.clone(),
            visited: self.registry.all(),
            failed,
        }
    }
}

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The URL was already claimed by another task.
    Rejected,
    /// The fetch failed; no children were forked.
    Failed,
    /// The page was processed and all `children` have joined.
    Completed { children: usize },
}

pub(crate) struct CrawlTask {
    url: String,
    ctx: Arc<CrawlContext>,
}

impl CrawlTask {
    pub(crate) fn new(url: String, ctx: Arc<CrawlContext>) -> Self {
        Self { url, ctx }
    }

    // Boxed because the future spawns more of itself
    pub(crate) fn run(self) -> BoxFuture<'static, TaskOutcome> {
        async move {
            if !self.ctx.registry.claim(&self.url) {
                debug!(url = %self.url, "already claimed, skipping");
                return TaskOutcome::Rejected;
            }

            info!(url = %self.url, "crawling");

            let fetched = match self.ctx.fetch_permits.acquire().await {
                // The permit drops at the end of this arm, before any forking
                Ok(_permit) => self.ctx.fetcher.fetch(&self.url).await,
                Err(e) => {
                    error!(url = %self.url, error = %e, "fetch limiter closed");
                    self.ctx.failures.insert(self.url.clone());
                    return TaskOutcome::Failed;
                }
            };

            let content = match fetched {
                Ok(content) => content,
                Err(e) => {
                    warn!(url = %self.url, error = %e, "failed to fetch page");
                    self.ctx.failures.insert(self.url.clone());
                    return TaskOutcome::Failed;
                }
            };

            let links = self.ctx.extractor.extract(&content, &self.ctx.domain);

            // Fork. No point checking the registry here: the child's own
            // claim is the only check that counts.
            let children: Vec<_> = links
                .into_iter()
                .map(|link| tokio::spawn(CrawlTask::new(link, Arc::clone(&self.ctx)).run()))
                .collect();
            let forked = children.len();

            // Join
            for joined in join_all(children).await {
                if let Err(e) = joined {
                    error!(parent = %self.url, error = %e, "crawl task panicked");
                }
            }

            debug!(url = %self.url, children = forked, "subtree done");
            TaskOutcome::Completed { children: forked }
        }
        .boxed()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does run() return a BoxFuture instead of being an async fn?
//    - An async fn compiles to a state machine whose size must be known
//    - A task that spawns more tasks of the same kind would contain itself
//    - Boxing puts the state machine on the heap, which breaks the cycle
//    - .boxed() comes from futures::FutureExt and also requires Send
//
// 2. What does tokio::spawn give back?
//    - A JoinHandle<T>, itself a future that resolves when the task ends
//    - It resolves to Result<T, JoinError>; Err means the task panicked
//    - The task starts running as soon as it is spawned, whether or not
//      anyone awaits the handle
//
// 3. What is join_all?
//    - Takes a collection of futures and waits for ALL of them
//    - Here those futures are JoinHandles, so it waits for every child task
//    - This is the "join" half of fork/join
//
// 4. What is a Semaphore?
//    - A counter of permits: acquire() waits until one is free
//    - The permit is returned when the guard is dropped
//    - We keep the guard inside one match arm so it is dropped right after
//      the fetch, before this task waits on its children
// -----------------------------------------------------------------------------
