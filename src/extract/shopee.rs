//! Shopee price extraction.
//!
//! Shopee renders prices client-side; the static document almost never has
//! them. The strategy mines the embedded state payload out of the raw page
//! text, then falls back to a plain-text currency sweep.

use scraper::Html;
use tracing::debug;

use super::{dom, PricePair};
use crate::mining;
use crate::price;

pub(super) fn prices(raw: &str, document: &Html) -> PricePair {
    let mined = mining::mine_prices(raw);
    if mined.discounted.is_some() || mined.original.is_some() {
        debug!(?mined, "embedded payload carried prices");
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
    fn mines_the_embedded_state_payload() {
        let raw = r#"
            <html><body>
            <script>
            window.__INITIAL_STATE__ = {"item":{"itemid":1,"price_min":499000,"price_max":499000,"price_before_discount":899000}};
            </script>
            </body></html>
        "#;
        let document = Html::parse_document(raw);
        let pair = prices(raw, &document);
        assert_eq!(pair.discounted, Some(4.99));
        assert_eq!(pair.original, Some(8.99));
    }

    #[test]
    fn falls_back_to_visible_text_when_no_payload_parses() {
        let raw = r#"
            <html><body>
            <div class="banner">Oferta relâmpago: R$ 24,90</div>
            </body></html>
        "#;
        let document = Html::parse_document(raw);
        let pair = prices(raw, &document);
        assert_eq!(pair.discounted, Some(24.90));
        assert_eq!(pair.original, None);
    }

    #[test]
    fn both_paths_failing_leaves_prices_unset() {
        let raw = "<html><body><p>sem estoque</p></body></html>";
        let document = Html::parse_document(raw);
        assert_eq!(prices(raw, &document), PricePair::default());
    }
}
