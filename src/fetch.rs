//! Product-page fetching.
//!
//! The single I/O-bound step of the pipeline. Requests carry the headers of a
//! common desktop browser; several marketplaces serve bot-detection stubs to
//! anything that looks like a script.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use tracing::debug;

use crate::error::FetchError;

/// Desktop Chrome on Windows, the least remarkable visitor a shop sees.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the shared HTTP client.
///
/// The timeout is the host's responsibility: the engine itself never retries
/// and enforces no deadline of its own, so an unbounded client would hang a
/// request forever on a stalled marketplace.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
}

/// GET the page and return its body as text.
///
/// The only failable step of a scrape: network errors, timeouts and
/// non-success statuses all surface as [`FetchError`].
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    debug!(url, bytes = body.len(), "fetched page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_browser_headers() {
        assert!(build_client(Duration::from_secs(15)).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let client = build_client(Duration::from_secs(2)).unwrap();
        // Port 1 on loopback refuses connections outright.
        let result = fetch_page(&client, "http://127.0.0.1:1/produto").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
