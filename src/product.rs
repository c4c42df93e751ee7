//! The extracted product record and final assembly.

use serde::{Deserialize, Serialize};

use crate::extract::PricePair;
use crate::platform::Platform;

/// One extraction result, created fresh per request and handed straight back
/// to the caller. Nothing here is persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    /// Never empty; falls back to a marketplace-specific placeholder.
    pub title: String,

    /// Absolute image URL, when one was recovered.
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,

    pub platform: Platform,
}

impl ScrapedProduct {
    /// Merge per-field outcomes into the final record.
    ///
    /// No cross-field validation happens here: a missing image never blocks
    /// a recovered price and vice versa. When exactly one price resolved,
    /// the other is set equal to it, so a lone value never reads as a
    /// discount.
    pub fn assemble(
        platform: Platform,
        title: Option<String>,
        image_url: Option<String>,
        prices: PricePair,
    ) -> ScrapedProduct {
        let (discounted_price, original_price) = match (prices.discounted, prices.original) {
            (Some(d), Some(o)) => (Some(d), Some(o)),
            (Some(d), None) => (Some(d), Some(d)),
            (None, Some(o)) => (Some(o), Some(o)),
            (None, None) => (None, None),
        };

        ScrapedProduct {
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| platform.placeholder_title()),
            image_url: image_url.map(absolutize),
            original_price,
            discounted_price,
            platform,
        }
    }
}

/// Protocol-relative URLs (`//cdn...`) become secure absolute ones.
fn absolutize(url: String) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url,
    }
}
