// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Crawl the site starting from the seed URL
// 4. Print the visited URLs
// 5. Exit with proper code (0 = success, 1 = some pages failed, 2 = error)
//
// main() is a plain function rather than #[tokio::main]: the crawl builds its
// own multi-threaded runtime so the worker count can come from the command
// line.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the parallel crawl engine
mod error; // src/error.rs - error types
mod extract; // src/extract/ - finding links in pages
mod fetch; // src/fetch/ - downloading pages
mod logging; // src/logging.rs - tracing setup

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use crawl::{CrawlCoordinator, CrawlReport};
use extract::AnchorLinkExtractor;
use fetch::HttpFetcher;

fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // Fatal errors (bad seed URL, no runtime) end up here
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every page fetched fine
//   Ok(1) = crawl finished, but some pages could not be fetched
//   Err   = the crawl could not run at all
fn run(cli: Cli) -> Result<i32> {
    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout_secs))
        .context("failed to build HTTP client")?;
    let coordinator = CrawlCoordinator::new(Arc::new(fetcher), Arc::new(AnchorLinkExtractor::new()))
        .with_max_concurrent(cli.max_concurrent);

    eprintln!("🔍 Start scanning {}...", cli.seed_url);

    let report = coordinator.run_blocking(&cli.seed_url, cli.workers)?;

    print_results(&report, cli.json)?;

    if report.has_failures() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints the report either as a plain list or JSON
fn print_results(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_list(report);
    }
    Ok(())
}

// Prints the sorted URLs, then a short summary
fn print_list(report: &CrawlReport) {
    println!("Results size : {}", report.visited_count());
    println!();
    for url in &report.visited {
        println!("{}", url);
    }
    println!();

    println!("📊 Summary:");
    println!("   🌐 Domain: {}", report.domain);
    println!("   ✅ Fetched: {}", report.visited_count() - report.failed_count());
    println!("   ❌ Failed: {}", report.failed_count());
    println!("   📋 Total: {}", report.visited_count());

    for url in &report.failed {
        println!("      ❌ {}", url);
    }
}
