//! Amazon price extraction.
//!
//! The buy-box price is split across a whole-number element and a fraction
//! element that must be joined before parsing. The struck compare-at price
//! lives in its own block; Amazon duplicates price digits in hidden nodes all
//! over the page, so only a tight `digits[.,]NN` match is trusted there.

use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::dom;
use super::PricePair;
use crate::price;

/// Struck compare-at price blocks, most specific first.
const COMPARE_AT_SELECTORS: &[&str] = &[
    ".a-price.a-text-price .a-offscreen",
    ".basisPrice .a-offscreen",
    "span[data-a-strike=\"true\"] .a-offscreen",
];

pub(super) fn prices(document: &Html) -> PricePair {
    let mut out = PricePair::default();

    // Visible price: whole + fraction nodes joined as `whole.fraction`.
    if let Some(whole) = dom::first_text(document, ".a-price-whole") {
        let fraction = dom::first_text(document, ".a-price-fraction").unwrap_or_default();
        out.discounted = price::from_parts(&whole, &fraction);
    }
    if out.discounted.is_none() {
        out.discounted = dom::first_text(document, ".a-price .a-offscreen")
            .as_deref()
            .and_then(strict_price);
    }
    if out.discounted.is_none() {
        out.discounted =
            dom::meta_content(document, "meta[property=\"product:price:amount\"]")
                .as_deref()
                .and_then(price::normalize);
    }

    for selector in COMPARE_AT_SELECTORS {
        if let Some(found) = dom::first_text(document, selector)
            .as_deref()
            .and_then(strict_price)
        {
            debug!(selector, found, "compare-at price hit");
            out.original = Some(found);
            break;
        }
    }

    out
}

/// Accept only a single well-formed amount with a two-digit cents part.
fn strict_price(text: &str) -> Option<f64> {
    let re = Regex::new(r"(\d{1,3}(?:\.\d{3})*[.,]\d{2})").ok()?;
    let matched = re.captures(text)?.get(1)?.as_str();
    price::normalize(matched)
}
