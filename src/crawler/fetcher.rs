//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured timeout
//! - Fetching listing and detail pages
//! - Error classification (timeout vs connection vs status)

use crate::config::SiteConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a page
///
/// The walker decides severity: a listing-page failure is fatal for the
/// run, a detail-page failure only skips that candidate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} timed out")]
    Timeout { url: String },

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Builds an HTTP client with the configured per-request timeout
///
/// # Arguments
///
/// * `config` - The target site configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &SiteConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("postwatch/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its raw markup
///
/// Any non-success HTTP status is an error; the crawl has no retry
/// policy, so transient failures surface to the caller.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Http {
                url: url.to_string(),
                source: e,
            }
        }
    };

    let response = client.get(url).send().await.map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> SiteConfig {
        SiteConfig {
            listing_url: "http://supost.com/search/index/5".to_string(),
            base_url: "http://supost.com".to_string(),
            detail_path_pattern: "post/index".to_string(),
            title_selector: "h2#posttitle".to_string(),
            offset_increment: 99,
            fetch_timeout_secs: 30,
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    // Fetch behavior against live responses is covered by the wiremock
    // end-to-end tests in tests/watch_tests.rs.
}
