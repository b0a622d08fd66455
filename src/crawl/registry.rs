// src/crawl/registry.rs
// =============================================================================
// The set of URLs that have already been claimed by a crawl task.
//
// There is exactly one way to add a URL: claim(). It checks and inserts in a
// single atomic step, so two tasks racing on the same URL can never both win.
// That is what stops duplicate fetches, and what stops cycles (A -> B -> A)
// from recursing forever.
//
// Rust concepts:
// - DashSet: a HashSet split into shards, each behind its own lock
// - &self methods: many threads can share one registry through an Arc
// =============================================================================

use dashmap::DashSet;

/// Concurrency-safe, grow-only set of visited URLs.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: DashSet<String>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for processing.
    ///
    /// Returns true if this call inserted it (the caller now owns the URL),
    /// false if it was already there (the caller must leave it alone).
    pub fn claim(&self, url: &str) -> bool {
        // insert() holds the shard's write lock across the check and the insert
        self.urls.insert(url.to_string())
    }

    /// Every claimed URL, sorted.
    ///
    /// Only meaningful once the crawl has finished; during a crawl the answer
    /// is already stale by the time it is returned.
    pub fn all(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.iter().map(|url| url.key().clone()).collect();
        urls.sort();
        urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not contains() followed by insert()?
//    - Two threads could both run contains() before either runs insert()
//    - Both would see "not visited" and both would fetch the page
//    - DashSet::insert() does the check and the insert under one lock,
//      and its bool return value tells you which thread got there first
//    - This is called test-and-set
//
// 2. What is DashSet?
//    - A concurrent HashSet from the dashmap crate
//    - Internally it is split into shards, each with its own RwLock
//    - Threads touching different shards never wait on each other
//    - Methods take &self, so an Arc<VisitedRegistry> is all you need to share it
//
// 3. Why does all() clone the strings?
//    - iter() hands out guards that hold a shard's read lock
//    - Cloning into a Vec lets us drop those locks straight away
// -----------------------------------------------------------------------------
