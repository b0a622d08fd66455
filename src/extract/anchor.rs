// src/extract/anchor.rs
// =============================================================================
// This module extracts absolute links from HTML anchor tags.
//
// What counts as a link:
// - An <a ...> tag with an href attribute in DOUBLE quotes
// - The href is absolute and starts with http:// or https:// (lowercase)
//   The tag and attribute names may be in any case: <A HREF="http://...">
// - The host of the link contains the crawl domain
//
// What does NOT count:
// - Single-quoted or unquoted hrefs
// - Relative links ("/docs", "../about")
// - <link> tags, JavaScript-built links, anything else
//
// The host check is a substring match, not host equality. With domain
// "example.com" a link to "evil-example.com" is accepted too.
//
// Links are returned exactly as written in the page. We parse them only to
// read the host; the parsed Url is never what we hand back, because parsing
// would normalise the string (add a trailing slash, lowercase the scheme).
// =============================================================================

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::LinkExtractor;

// Compiled once, shared by every thread
static ANCHOR_HREF: Lazy<Regex> = Lazy::new(|| {
    // Only the tag and attribute are case-insensitive, the scheme is not
    Regex::new(r#"(?i:<a\s(?:[^>]*?\s)?href=)"(https?://[^"]+)""#)
        .expect("anchor href pattern is valid")
});

/// LinkExtractor that scans for `<a href="http(s)://...">`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorLinkExtractor;

impl AnchorLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for AnchorLinkExtractor {
    fn extract(&self, content: &str, domain: &str) -> BTreeSet<String> {
        ANCHOR_HREF
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|href| href.as_str())
            .filter(|href| host_contains(href, domain))
            .map(str::to_string)
            .collect()
    }
}

// Checks whether the link's host contains the domain
//
// Links whose host can't be read (bad port, empty host, ...) are dropped
fn host_contains(link: &str, domain: &str) -> bool {
    match Url::parse(link) {
        Ok(url) => url.host_str().is_some_and(|host| host.contains(domain)),
        Err(_) => false,
    }
}
