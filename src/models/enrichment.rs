use serde::{Deserialize, Serialize};

use super::TokenScore;

/// Token metadata as returned by the metadata service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub logo_uri: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub description: Option<String>,
}

/// Price and 24h volume snapshot from the price/volume service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PriceInfo {
    pub price: Option<f64>,
    pub price_change_percent: Option<f64>,
    pub volume_usd: Option<f64>,
    pub volume_change_percent: Option<f64>,
    pub price_updated_at: Option<i64>,
}

/// A scored token with enrichment left-joined onto it. Missing enrichment
/// serializes as null fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedToken {
    #[serde(flatten)]
    pub score: TokenScore,
    #[serde(flatten)]
    pub metadata: TokenMetadata,
    #[serde(flatten)]
    pub price: PriceInfo,
}

impl RankedToken {
    pub fn new(score: TokenScore, metadata: Option<TokenMetadata>, price: Option<PriceInfo>) -> Self {
        Self {
            score,
            metadata: metadata.unwrap_or_default(),
            price: price.unwrap_or_default(),
        }
    }
}
