//! Marketplace classification from product URLs.

use serde::{Deserialize, Serialize};

/// Closed set of marketplaces the engine knows how to read.
///
/// Adding a marketplace means adding a variant here and a strategy arm in
/// `extract`; the exhaustive matches make the compiler point at every site
/// that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Amazon,
    MercadoLivre,
    Shopee,
    AliExpress,
    Other,
}

impl Platform {
    /// Classify a URL by case-insensitive substring match.
    ///
    /// Pure and total: anything unrecognized falls through to `Other`, and
    /// the same input always yields the same answer.
    pub fn detect(url: &str) -> Platform {
        let url = url.to_lowercase();
        if url.contains("amazon") {
            Platform::Amazon
        } else if url.contains("mercadolivre") || url.contains("mercadolibre") {
            Platform::MercadoLivre
        } else if url.contains("shopee") {
            Platform::Shopee
        } else if url.contains("aliexpress") {
            Platform::AliExpress
        } else {
            Platform::Other
        }
    }

    /// Display name shown to shop owners.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::MercadoLivre => "Mercado Livre",
            Platform::Shopee => "Shopee",
            Platform::AliExpress => "AliExpress",
            Platform::Other => "",
        }
    }

    /// Title used when every extraction rule comes up empty.
    pub fn placeholder_title(&self) -> String {
        match self {
            Platform::Other => "Produto".to_string(),
            _ => format!("Produto {}", self.label()),
        }
    }
}
