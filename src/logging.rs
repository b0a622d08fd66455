// src/logging.rs
// =============================================================================
// Sets up tracing output.
//
// Logs go to stderr, so stdout only ever carries the crawl report (and stays
// valid JSON with --json). RUST_LOG overrides the default filter, e.g.
//   RUST_LOG=domain_crawl=debug domain-crawl https://example.com
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,domain_crawl=info";

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_names(true)
                .with_thread_ids(true),
        )
        .init();
}
