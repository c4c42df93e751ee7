//! Locale-aware price normalization.
//!
//! Every text-derived price candidate in the engine funnels through this
//! module, which encodes a single locale convention (Brazilian: dot as
//! thousands separator, comma as decimal separator) and a single sanity band.
//! Keeping the heuristics here means the document-parsing code never touches
//! raw numeric strings.

use regex::Regex;

/// Upper sanity bound. Values at or above this are parse artifacts
/// (concatenated digits, installment math), never real prices.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Scale of sub-unit fixed-point prices found in embedded marketplace JSON:
/// five decimal places, so `499000` encodes `4.99`.
pub const SUBUNIT_SCALE: f64 = 100_000.0;

/// Whether a parsed value is a plausible price.
pub fn in_bounds(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value < MAX_PRICE
}

/// Parse locale-formatted price text into a decimal value.
///
/// `"R$ 1.234,56"` becomes `1234.56`; `"R$ 49,90"` becomes `49.90`. Returns
/// `None` for anything out of bounds or with no digits at all.
pub fn normalize(raw: &str) -> Option<f64> {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != 'R' && *c != '$')
        .collect();
    // Dots are thousands separators in this locale; the comma is the
    // decimal mark.
    cleaned = cleaned.replace('.', "").replace(',', ".");
    cleaned.retain(|c| c.is_ascii_digit() || c == '.');

    // First run of digits with at most one decimal point.
    let mut number = String::new();
    for c in cleaned.chars() {
        match c {
            '0'..='9' => number.push(c),
            '.' if !number.is_empty() && !number.contains('.') => number.push(c),
            _ if !number.is_empty() => break,
            _ => {}
        }
    }
    if number.is_empty() {
        return None;
    }

    let value = number.parse::<f64>().ok()?;
    in_bounds(value).then_some(value)
}

/// Join a whole-number element and a cents element into one value.
///
/// Marketplaces that split the visible price across two nodes (`195` + `44`)
/// need the parts concatenated with a decimal point before parsing. The whole
/// part may itself carry a thousands dot (`1.234`), so both parts are reduced
/// to their digits first.
pub fn from_parts(whole: &str, cents: &str) -> Option<f64> {
    let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
    let cents: String = cents.chars().filter(char::is_ascii_digit).collect();
    if whole.is_empty() {
        return None;
    }
    let text = if cents.is_empty() {
        whole
    } else {
        format!("{whole}.{cents}")
    };
    let value = text.parse::<f64>().ok()?;
    in_bounds(value).then_some(value)
}

/// Convert a sub-unit fixed-point integer into a natural currency value.
pub fn from_subunits(raw: i64) -> Option<f64> {
    let value = raw as f64 / SUBUNIT_SCALE;
    in_bounds(value).then_some(value)
}

/// Last-resort sweep over visible page text for a currency-prefixed amount.
///
/// Tried in order: an `R$`-prefixed amount, an amount followed by "reais",
/// then any grouped decimal amount.
pub fn find_in_text(text: &str) -> Option<f64> {
    let patterns = [
        r"R?\$\s*(\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2}))",
        r"(\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2}))\s*reais",
        r"(\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2}))",
    ];
    for pattern in patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };
        if let Some(captures) = re.captures(text) {
            if let Some(value) = captures.get(1).and_then(|m| normalize(m.as_str())) {
                return Some(value);
            }
        }
    }
    None
}
