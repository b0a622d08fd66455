// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is only one thing to do (crawl a site), so there are no subcommands:
// just the seed URL and a few optional flags.
// =============================================================================

use std::num::NonZeroUsize;

use clap::Parser;

use crate::crawl::DEFAULT_MAX_CONCURRENT;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "domain-crawl",
    version = "0.1.0",
    about = "Crawl every page of a website reachable from a seed URL",
    long_about = "domain-crawl starts at a seed URL, follows every link that stays on the \
                  seed's domain, and prints the sorted list of pages it visited. \
                  Set RUST_LOG to control log output (written to stderr)."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    ///
    /// This is a positional argument (required, no flag needed).
    /// Only links whose host contains this URL's host are followed,
    /// so https://example.com also follows https://docs.example.com
    pub seed_url: String,

    /// Output the report in JSON format instead of a plain list
    ///
    /// This is an optional flag: --json
    /// Logs still go to stderr, so stdout stays valid JSON
    #[arg(long)]
    pub json: bool,

    /// Number of worker threads (default: one per CPU core)
    ///
    /// Threads only decide how much CPU work runs in parallel;
    /// --max-concurrent is what limits network requests
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,

    /// Maximum number of pages fetched at the same time
    ///
    /// Keeps a page with thousands of links from opening thousands of
    /// connections at once. Must be at least 1.
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: NonZeroUsize,

    /// Per-request timeout in seconds
    ///
    /// #[arg(long, default_value_t = 10)] creates --timeout-secs with default value
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}
