//! Pipeline error types.
//!
//! Only the fetch step can fail a scrape. Every stage after it degrades to an
//! absent field instead of returning an error, so this module stays small on
//! purpose: fragment parse failures and exhausted selector chains are plain
//! `Option`s at their call sites.

use thiserror::Error;

/// Failure to retrieve a product page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure or timeout from the HTTP client.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The marketplace answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),
}
