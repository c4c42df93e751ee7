//! Embedded-JSON mining for client-rendered marketplaces.
//!
//! Shopee and AliExpress pages frequently ship their prices inside script
//! payloads instead of visible markup. This module scans the raw page text
//! for known price keys, recovers the smallest syntactically valid JSON
//! fragment around each hit, and walks the parsed value looking for the key
//! set. A fragment that fails to parse is skipped, never fatal.

use serde_json::Value;
use tracing::debug;

use crate::price;

/// Keys whose value is the price actually charged.
const DISCOUNTED_KEYS: &[&str] = &["price", "price_min", "discounted_price"];

/// Keys whose value is the pre-discount reference price. `price_max` comes
/// last: on single-variant listings it merely repeats the selling price.
const ORIGINAL_KEYS: &[&str] = &["original_price", "price_before_discount", "price_max"];

/// Recursion limit for the value walk. Marketplace payloads nest a handful of
/// levels; anything deeper is adversarial or irrelevant.
const MAX_WALK_DEPTH: usize = 8;

/// How many key hits to chase before giving up on a page.
const MAX_FRAGMENTS: usize = 10;

/// How many enclosing objects to try around a key hit before moving on.
const MAX_ENCLOSING_TRIES: usize = 3;

/// Prices recovered from embedded JSON.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MinedPrices {
    pub discounted: Option<f64>,
    pub original: Option<f64>,
}

impl MinedPrices {
    fn is_complete(&self) -> bool {
        self.discounted.is_some() && self.original.is_some()
    }
}

/// Mine price values out of raw page text.
///
/// Integer values are taken as sub-unit fixed-point and scaled down by
/// [`price::SUBUNIT_SCALE`]; values that already carry a fractional part are
/// natural decimals. String values go through the locale normalizer.
pub fn mine_prices(text: &str) -> MinedPrices {
    let mut out = MinedPrices::default();

    for (hits, position) in key_positions(text).into_iter().enumerate() {
        if hits >= MAX_FRAGMENTS || out.is_complete() {
            break;
        }
        let Some(fragment) = enclosing_fragment(text, position) else {
            continue;
        };
        let Ok(value) = serde_json::from_str::<Value>(fragment) else {
            // FragmentParseError: local to this candidate.
            continue;
        };
        debug!(bytes = fragment.len(), "parsed embedded fragment");
        walk(&value, 0, &mut out);
    }

    out
}

/// Byte offsets of every `"<key>": <value-start>` occurrence in the text.
fn key_positions(text: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    for key in DISCOUNTED_KEYS.iter().chain(ORIGINAL_KEYS) {
        let needle = format!("\"{key}\"");
        let mut from = 0;
        while let Some(found) = text[from..].find(&needle) {
            let at = from + found;
            // Only count occurrences that look like an object entry.
            let after = text[at + needle.len()..].trim_start();
            if after.starts_with(':') {
                positions.push(at);
            }
            from = at + needle.len();
        }
    }
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Smallest balanced `{...}` slice around `position` that parses as JSON.
///
/// Scans backwards for an opening brace, then forward with string-literal
/// awareness until the braces balance. If the innermost candidate fails to
/// parse, widens to the next enclosing object a bounded number of times.
fn enclosing_fragment(text: &str, position: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut open = position;

    for _ in 0..MAX_ENCLOSING_TRIES {
        open = text[..open].rfind('{')?;
        if let Some(end) = balanced_end(bytes, open) {
            let candidate = &text[open..end];
            if serde_json::from_str::<Value>(candidate).is_ok() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Index one past the brace that closes the object opened at `open`.
fn balanced_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[open..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Depth-bounded visitor over the parsed value.
///
/// The first hit per field wins; later fragments cannot overwrite it.
fn walk(value: &Value, depth: usize, out: &mut MinedPrices) {
    if depth > MAX_WALK_DEPTH || out.is_complete() {
        return;
    }
    match value {
        Value::Object(map) => {
            for key in DISCOUNTED_KEYS {
                if out.discounted.is_none() {
                    if let Some(found) = map.get(*key).and_then(value_to_price) {
                        out.discounted = Some(found);
                    }
                }
            }
            for key in ORIGINAL_KEYS {
                if out.original.is_none() {
                    if let Some(found) = map.get(*key).and_then(value_to_price) {
                        out.original = Some(found);
                    }
                }
            }
            for nested in map.values() {
                walk(nested, depth + 1, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, out);
            }
        }
        _ => {}
    }
}

/// Interpret one JSON scalar as a price.
fn value_to_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                price::from_subunits(int)
            } else {
                // Already a natural decimal; scaling it would always land
                // outside the sanity band.
                n.as_f64().filter(|v| price::in_bounds(*v))
            }
        }
        Value::String(s) => price::normalize(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mines_subunit_scaled_price_min() {
        let page = r#"<script>window.__DATA__ = {"item":{"price_min":499000,"stock":3}};</script>"#;
        let mined = mine_prices(page);
        assert_eq!(mined.discounted, Some(4.99));
        assert_eq!(mined.original, None);
    }

    #[test]
    fn mines_both_fields_from_nested_payload() {
        let page = r#"
            <script>
            var data = {"product":{"pricing":{"price":12990000,"price_before_discount":15990000}}};
            </script>
        "#;
        let mined = mine_prices(page);
        assert_eq!(mined.discounted, Some(129.90));
        assert_eq!(mined.original, Some(159.90));
    }

    #[test]
    fn skips_broken_fragment_and_uses_next() {
        // First hit sits in a JS expression that is not valid JSON even at
        // the outermost enclosing brace; the later literal parses fine.
        let page = r#"
            <script>f({"price": getPrice(), "x": 1});</script>
            <script>var p = {"price": 2599000};</script>
        "#;
        let mined = mine_prices(page);
        assert_eq!(mined.discounted, Some(25.99));
    }

    #[test]
    fn fractional_numbers_are_taken_as_natural_decimals() {
        let page = r#"{"offer":{"price":49.9}}"#;
        let mined = mine_prices(page);
        assert_eq!(mined.discounted, Some(49.9));
    }

    #[test]
    fn string_values_go_through_the_normalizer() {
        let page = r#"{"price":"R$ 1.234,56"}"#;
        let mined = mine_prices(page);
        assert_eq!(mined.discounted, Some(1234.56));
    }

    #[test]
    fn walk_stops_at_the_depth_bound() {
        let mut value = serde_json::json!({"price": 499000});
        for _ in 0..(MAX_WALK_DEPTH + 2) {
            value = serde_json::json!({"wrap": value});
        }
        let mut out = MinedPrices::default();
        walk(&value, 0, &mut out);
        assert_eq!(out.discounted, None);

        // The same payload within the bound is visible.
        let shallow = serde_json::json!({"wrap": {"price": 499000}});
        let mut out = MinedPrices::default();
        walk(&shallow, 0, &mut out);
        assert_eq!(out.discounted, Some(4.99));
    }

    #[test]
    fn no_keys_means_no_prices() {
        let mined = mine_prices("<html><body>nothing embedded here</body></html>");
        assert_eq!(mined, MinedPrices::default());
    }

    #[test]
    fn out_of_band_subunit_values_are_rejected() {
        let page = r#"{"price": -499000, "price_min": 0}"#;
        assert_eq!(mine_prices(page), MinedPrices::default());
    }
}
