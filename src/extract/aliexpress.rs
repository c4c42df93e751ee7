//! AliExpress price extraction.
//!
//! Like Shopee, AliExpress injects prices client-side (the `runParams`
//! payload); the raw text is mined first, with the visible-text currency
//! sweep as the fallback.

use scraper::Html;
use tracing::debug;

use super::{dom, PricePair};
use crate::mining;
use crate::price;

pub(super) fn prices(raw: &str, document: &Html) -> PricePair {
    let mined = mining::mine_prices(raw);
    if mined.discounted.is_some() || mined.original.is_some() {
        debug!(?mined, "runParams payload carried prices");
        return mined.into();
    }

    PricePair {
        discounted: price::find_in_text(&dom::body_text(document)),
        original: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mines_run_params_price_fields() {
        let raw = r#"
            <html><body>
            <script>
            window.runParams = {"data":{"sku":{"discounted_price":1599000,"original_price":2999000}}};
            </script>
            </body></html>
        "#;
        let document = Html::parse_document(raw);
        let pair = prices(raw, &document);
        assert_eq!(pair.discounted, Some(15.99));
        assert_eq!(pair.original, Some(29.99));
    }

    #[test]
    fn currency_sweep_covers_server_rendered_pages() {
        let raw = r#"
            <html><body>
            <div class="product-price">R$ 159,90</div>
            </body></html>
        "#;
        let document = Html::parse_document(raw);
        let pair = prices(raw, &document);
        assert_eq!(pair.discounted, Some(159.90));
        assert_eq!(pair.original, None);
    }
}
