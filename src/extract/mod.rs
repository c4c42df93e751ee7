//! Per-marketplace extraction strategies.
//!
//! One module per marketplace plus a generic fallback, dispatched by an
//! exhaustive match on [`Platform`]. Each field (title, image, price) runs
//! its own ordered rule chain: the first rule that yields a usable value
//! wins and the rest of the chain is never consulted.

mod aliexpress;
mod amazon;
pub(crate) mod dom;
mod generic;
mod mercadolivre;
mod shopee;

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::mining::MinedPrices;
use crate::platform::Platform;
use crate::product::ScrapedProduct;

/// Price candidates for one page, before assembly fills the gaps.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PricePair {
    pub discounted: Option<f64>,
    pub original: Option<f64>,
}

impl From<MinedPrices> for PricePair {
    fn from(mined: MinedPrices) -> Self {
        PricePair {
            discounted: mined.discounted,
            original: mined.original,
        }
    }
}

/// Run the full extraction over an already-fetched page.
///
/// Never fails: every field degrades independently to its default, and the
/// assembler always produces a record.
pub fn extract_product(html: &str, url: &str) -> ScrapedProduct {
    let platform = Platform::detect(url);
    debug!(?platform, url, "dispatching extraction");

    let document = Html::parse_document(html);

    let title = extract_title(&document, platform);
    let image = extract_image(&document, platform).map(|raw| resolve_image_url(raw, url));

    let mut prices = match platform {
        Platform::Amazon => amazon::prices(&document),
        Platform::MercadoLivre => mercadolivre::prices(&document),
        Platform::Shopee => shopee::prices(html, &document),
        Platform::AliExpress => aliexpress::prices(html, &document),
        Platform::Other => generic::prices(&document),
    };

    // Platform rules own the field; the generic chain only runs for what
    // they left unresolved.
    if prices.discounted.is_none() && platform != Platform::Other {
        let fallback = generic::prices(&document);
        prices.discounted = fallback.discounted;
        if prices.original.is_none() {
            prices.original = fallback.original;
        }
    }

    debug!(
        discounted = ?prices.discounted,
        original = ?prices.original,
        "price chain finished"
    );

    ScrapedProduct::assemble(platform, title, image, prices)
}

fn title_selectors(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Amazon => &["#productTitle", "span#productTitle"],
        Platform::MercadoLivre => &["h1.ui-pdp-title", ".ui-pdp-title"],
        Platform::Shopee => &[
            "[data-testid=\"product-title\"]",
            "div[class*=\"product-title\"]",
        ],
        Platform::AliExpress => &["h1[class*=\"title\"]", ".product-title"],
        Platform::Other => &[],
    }
}

/// Ordered `(selector, attribute)` rules for the product image, lazy-load
/// attributes included.
fn image_rules(platform: Platform) -> &'static [(&'static str, &'static str)] {
    match platform {
        Platform::Amazon => &[
            ("#landingImage", "data-old-hires"),
            ("#landingImage", "src"),
            ("#imgBlkFront", "src"),
        ],
        Platform::MercadoLivre => &[
            (".ui-pdp-gallery__figure img", "data-zoom"),
            (".ui-pdp-gallery__figure img", "src"),
            ("img.ui-pdp-image", "data-src"),
            ("img.ui-pdp-image", "src"),
        ],
        Platform::Shopee => &[
            ("img[class*=\"product-image\"]", "src"),
            ("img[class*=\"product-image\"]", "data-src"),
        ],
        Platform::AliExpress => &[
            (".image-view--image", "src"),
            ("img.magnifier-image", "src"),
            ("img[class*=\"pdp-img\"]", "src"),
        ],
        Platform::Other => &[],
    }
}

fn extract_title(document: &Html, platform: Platform) -> Option<String> {
    for selector in title_selectors(platform) {
        if let Some(title) = dom::first_text(document, selector) {
            debug!(selector, "title selector hit");
            return Some(title);
        }
    }
    dom::meta_content(document, "meta[property=\"og:title\"]")
        .or_else(|| dom::meta_content(document, "meta[name=\"twitter:title\"]"))
        .or_else(|| dom::first_text(document, "h1"))
}

/// Path-relative image sources get resolved against the page URL.
/// Protocol-relative ones keep their `//` here; assembly rewrites those to
/// `https://` unconditionally.
fn resolve_image_url(raw: String, page_url: &str) -> String {
    if raw.starts_with("//") || raw.contains("://") {
        return raw;
    }
    match Url::parse(page_url).and_then(|base| base.join(&raw)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => raw,
    }
}

fn extract_image(document: &Html, platform: Platform) -> Option<String> {
    for (selector, attr) in image_rules(platform) {
        if let Some(image) = dom::first_attr(document, selector, attr) {
            debug!(selector, attr, "image selector hit");
            return Some(image);
        }
    }
    dom::meta_content(document, "meta[property=\"og:image\"]")
        .or_else(|| dom::meta_content(document, "meta[name=\"twitter:image\"]"))
        .or_else(|| dom::first_attr(document, "img", "src"))
}
