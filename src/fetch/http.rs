// src/fetch/http.rs
// =============================================================================
// Fetches pages over HTTP with reqwest.
//
// Key behaviour:
// - Plain GET, the body is returned as text
// - Redirects are NOT followed: a 3xx is reported as a failed fetch
// - Any non-2xx status is a failure
// - Transport errors are sorted into timeout / connect / other
//
// Rust concepts:
// - async/await: The fetch suspends while waiting on the network
// - Result<T, E>: Every failure becomes a FetchError variant
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::debug;

use super::PageFetcher;
use crate::error::FetchError;

/// A PageFetcher backed by a shared reqwest Client.
///
/// Client is internally reference counted, so one HttpFetcher can serve
/// every crawl task at once (connection pooling included).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    ///
    /// Failing here means the HTTP client itself could not be set up (TLS
    /// backend, system config), which is a startup problem, not a page
    /// problem, so it is a plain reqwest::Error rather than a FetchError.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text().await.map_err(|e| categorize_error(url, e))?;
        debug!(url = %url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

// Sorts reqwest errors into the FetchError variants
//
// reqwest errors can happen for many reasons:
// - The URL could not be turned into a request at all (builder error)
// - Network timeout
// - DNS failure or refused connection
// - Anything else (body decoding, protocol errors, ...)
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_builder() {
        FetchError::InvalidUrl(url.to_string())
    } else if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_setup_error_is_not_a_fetch_error() {
        let built: Result<HttpFetcher, reqwest::Error> = HttpFetcher::new(Duration::from_secs(1));
        assert!(built.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<p>hello</p>");
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status } if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_fetch_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
            .expect(0)
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&format!("{}/old", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status } if status.is_redirection()
        ));
    }

    #[tokio::test]
    async fn test_fetch_malformed_url_is_invalid_url() {
        let err = fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(url) if url == "not a url"));
    }
}
