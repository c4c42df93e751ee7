//! Product-metadata extraction for marketplace product pages.
//!
//! Given a product URL from Amazon, Mercado Livre, Shopee or AliExpress (or
//! any other shop), fetches the page and mines title, image and prices out of
//! whatever rendering the marketplace uses:
//! - static server-rendered markup (CSS selector chains)
//! - embedded script-injected JSON (fragment mining)
//! - meta tags and plain-text currency patterns as fallbacks
//!
//! Only the fetch can fail; every extraction rule degrades to an absent field
//! and the caller always gets a record back.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod mining;
pub mod platform;
pub mod price;
pub mod product;
pub mod server;

pub use error::FetchError;
pub use extract::extract_product;
pub use platform::Platform;
pub use product::ScrapedProduct;

/// Fetch a product page and extract its metadata.
///
/// The one-stop entry point: one network round trip, then pure CPU-bound
/// parsing. Concurrent calls share nothing but the client's connection pool.
pub async fn scrape_product(
    client: &reqwest::Client,
    url: &str,
) -> Result<ScrapedProduct, FetchError> {
    let html = fetch::fetch_page(client, url).await?;
    Ok(extract_product(&html, url))
}
