//! Small selector helpers over a parsed document.
//!
//! Every extraction rule in the strategies reduces to one of these: first
//! non-empty text, first attribute value, or a meta tag's content. A selector
//! that fails to compile yields nothing rather than an error; rule chains
//! treat that the same as "not on this page".

use scraper::{Html, Selector};

/// Text of the first matching element with non-empty trimmed content.
pub fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

/// First matching element's attribute, skipping empty values.
pub fn first_attr(document: &Html, selector_str: &str, attr_name: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr_name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// `content` attribute of a meta tag.
pub fn meta_content(document: &Html, selector_str: &str) -> Option<String> {
    first_attr(document, selector_str, "content")
}

/// Concatenated text of the page body (script payloads included, matching
/// what a plain text dump of the document gives).
pub fn body_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}
