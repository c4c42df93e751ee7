//! Fallback strategy for unknown shops.
//!
//! Meta price properties first, then the usual price-class suspects, then a
//! sweep over the visible text.

use scraper::Html;
use tracing::debug;

use super::{dom, PricePair};
use crate::price;

const META_PRICE_SELECTORS: &[&str] = &[
    "meta[property=\"product:price:amount\"]",
    "meta[itemprop=\"price\"]",
    "meta[name=\"price\"]",
];

const PRICE_CLASS_SELECTORS: &[&str] = &[
    ".price",
    ".product-price",
    ".sale-price",
    ".current-price",
];

pub(super) fn prices(document: &Html) -> PricePair {
    let mut out = PricePair::default();

    for selector in META_PRICE_SELECTORS {
        if let Some(value) = dom::meta_content(document, selector)
            .as_deref()
            .and_then(price::normalize)
        {
            debug!(selector, value, "meta price hit");
            out.discounted = Some(value);
            return out;
        }
    }

    // data-price attributes carry the value directly.
    if let Some(value) = dom::first_attr(document, "[data-price]", "data-price")
        .as_deref()
        .and_then(price::normalize)
    {
        out.discounted = Some(value);
        return out;
    }

    for selector in PRICE_CLASS_SELECTORS {
        if let Some(value) = dom::first_text(document, selector)
            .as_deref()
            .and_then(price::normalize)
        {
            debug!(selector, value, "price class hit");
            out.discounted = Some(value);
            return out;
        }
    }

    out.discounted = price::find_in_text(&dom::body_text(document));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_price_beats_everything_else() {
        let html = r#"
            <html>
            <head><meta property="product:price:amount" content="89,90"></head>
            <body><div class="price">R$ 999,99</div></body>
            </html>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(prices(&document).discounted, Some(89.90));
    }

    #[test]
    fn data_price_attribute_is_read_directly() {
        let html = r#"<html><body><div data-price="123,45">de R$ 999,00</div></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(prices(&document).discounted, Some(123.45));
    }

    #[test]
    fn price_class_text_is_normalized() {
        let html = r#"<html><body><span class="product-price">R$ 1.234,56</span></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(prices(&document).discounted, Some(1234.56));
    }

    #[test]
    fn body_text_sweep_is_the_last_resort() {
        let html = "<html><body><p>tudo por R$ 49,90 hoje</p></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(prices(&document).discounted, Some(49.90));
    }

    #[test]
    fn pages_without_any_price_stay_empty() {
        let html = "<html><body><p>consulte o vendedor</p></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(prices(&document), PricePair::default());
    }
}
