//! Mercado Livre price extraction.
//!
//! A single listing page shows several money blocks at once: the struck
//! reference price, the promoted cash price, and per-installment figures.
//! Structural cues are tried first; when the markup gives none, a sweep over
//! every money fragment keeps only plausible cash values.
//!
//! Each money block renders the whole part and the cents in separate spans
//! that must be joined before parsing.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::PricePair;
use crate::price;

/// Struck "previous" blocks. Whatever else the page shows, these are the
/// original price.
const PREVIOUS_SELECTORS: &[&str] = &[
    "s.andes-money-amount--previous",
    ".andes-money-amount--previous",
    ".ui-pdp-price__original-value",
];

/// Plausibility band for the last-resort sweep: below it sit per-installment
/// figures and rating counts, above it shipping-insurance style noise.
/// This tie-break is policy, not a guarantee; the marketplace's markup moves
/// underneath us.
const CASH_BAND_MIN: f64 = 10.0;
const CASH_BAND_MAX: f64 = 10_000.0;

pub(super) fn prices(document: &Html) -> PricePair {
    let mut out = PricePair::default();

    for selector in PREVIOUS_SELECTORS {
        if let Some(value) = amount_in(document, selector) {
            debug!(selector, value, "previous-price block hit");
            out.original = Some(value);
            break;
        }
    }

    // The promoted second price line is the cash price when present.
    out.discounted = amount_in(document, ".ui-pdp-price__second-line");

    if out.discounted.is_none() {
        out.discounted = first_non_previous_amount(document);
    }

    if out.discounted.is_none() {
        let mut survivors: Vec<f64> = all_amounts(document)
            .into_iter()
            .filter(|v| *v > CASH_BAND_MIN && *v < CASH_BAND_MAX)
            .collect();
        survivors.sort_by(f64::total_cmp);
        debug!(count = survivors.len(), "money-fragment sweep");
        out.discounted = survivors.first().copied();
        if out.original.is_none() && survivors.len() > 1 {
            out.original = survivors.last().copied();
        }
    }

    out
}

/// Amount of the first money block inside `container_selector`.
fn amount_in(document: &Html, container_selector: &str) -> Option<f64> {
    let container_sel = Selector::parse(container_selector).ok()?;
    let container = document.select(&container_sel).next()?;
    block_amount(container).or_else(|| {
        // Some original-value wrappers carry plain formatted text instead of
        // fraction/cents spans.
        let text = container.text().collect::<String>();
        price::normalize(&text)
    })
}

/// Join the whole-part span and the cents span of one money block.
fn block_amount(block: ElementRef<'_>) -> Option<f64> {
    let fraction_sel = Selector::parse(".andes-money-amount__fraction").ok()?;
    let cents_sel = Selector::parse(".andes-money-amount__cents").ok()?;

    let fraction = block
        .select(&fraction_sel)
        .next()
        .map(|el| el.text().collect::<String>())?;
    let cents = block
        .select(&cents_sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();
    price::from_parts(&fraction, &cents)
}

/// First money block in document order that is not struck out.
fn first_non_previous_amount(document: &Html) -> Option<f64> {
    let block_sel = Selector::parse(".andes-money-amount").ok()?;
    document
        .select(&block_sel)
        .filter(|block| !is_previous(*block))
        .find_map(block_amount)
}

/// Every money-block amount on the page, struck ones included.
fn all_amounts(document: &Html) -> Vec<f64> {
    let block_sel = match Selector::parse(".andes-money-amount") {
        Ok(sel) => sel,
        Err(_) => return Vec::new(),
    };
    document.select(&block_sel).filter_map(block_amount).collect()
}

/// Struck-out blocks: the `--previous` modifier, an original-value wrapper,
/// or any `<s>` ancestor.
fn is_previous(block: ElementRef<'_>) -> bool {
    let marked = |el: ElementRef<'_>| {
        el.value().name() == "s"
            || el.value().classes().any(|class| {
                class == "andes-money-amount--previous" || class == "ui-pdp-price__original-value"
            })
    };
    marked(block)
        || block
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money_block(extra_class: &str, fraction: &str, cents: &str) -> String {
        format!(
            r#"<span class="andes-money-amount {extra_class}">
                <span class="andes-money-amount__currency-symbol">R$</span>
                <span class="andes-money-amount__fraction">{fraction}</span>
                <span class="andes-money-amount__cents">{cents}</span>
            </span>"#
        )
    }

    #[test]
    fn previous_block_always_wins_the_original_slot() {
        // The struck block is *smaller* than the installment fragment that
        // follows; structural marking must beat magnitude.
        let html = format!(
            r#"<html><body>
                <s class="andes-money-amount andes-money-amount--previous">
                    <span class="andes-money-amount__fraction">313</span>
                    <span class="andes-money-amount__cents">20</span>
                </s>
                <div class="ui-pdp-price__second-line">{}</div>
                {}
            </body></html>"#,
            money_block("", "195", "44"),
            money_block("", "899", "99"),
        );
        let document = Html::parse_document(&html);
        let pair = prices(&document);
        assert_eq!(pair.original, Some(313.20));
        assert_eq!(pair.discounted, Some(195.44));
    }

    #[test]
    fn first_non_previous_block_is_the_cash_price_without_a_second_line() {
        let html = format!(
            r#"<html><body>
                <s class="andes-money-amount andes-money-amount--previous">
                    <span class="andes-money-amount__fraction">249</span>
                    <span class="andes-money-amount__cents">90</span>
                </s>
                {}
            </body></html>"#,
            money_block("", "199", "90"),
        );
        let document = Html::parse_document(&html);
        let pair = prices(&document);
        assert_eq!(pair.discounted, Some(199.90));
        assert_eq!(pair.original, Some(249.90));
    }

    #[test]
    fn sweep_discards_installment_noise_outside_the_band() {
        // No usable structural cues: every block sits inside a bare <s>, so
        // the struck-marker, second-line and first-block rules all miss and
        // only the sweep is left. It must drop the 9.90 installment and the
        // 45000.00 noise, then take min/max of what survives.
        let html = format!(
            "<html><body><s>{}{}{}{}</s></body></html>",
            money_block("", "9", "90"),
            money_block("", "195", "44"),
            money_block("", "313", "20"),
            money_block("", "45.000", "00"),
        );
        let document = Html::parse_document(&html);
        let pair = prices(&document);
        assert_eq!(pair.discounted, Some(195.44));
        assert_eq!(pair.original, Some(313.20));
    }

    #[test]
    fn whole_part_keeps_its_thousands_digits() {
        let html = format!(
            "<html><body><div class=\"ui-pdp-price__second-line\">{}</div></body></html>",
            money_block("", "1.234", "56"),
        );
        let document = Html::parse_document(&html);
        assert_eq!(prices(&document).discounted, Some(1234.56));
    }

    #[test]
    fn empty_page_resolves_nothing() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(prices(&document), PricePair::default());
    }
}
