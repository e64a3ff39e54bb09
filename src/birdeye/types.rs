use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{PriceInfo, TokenMetadata};

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// `{ "success": bool, "data": ..., "message": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyeEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Multi-address payload; unknown addresses come back as `null`.
pub type AddressMap<T> = HashMap<String, Option<T>>;

// ---------------------------------------------------------------------------
// Token metadata (v3/token/meta-data/multiple)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiTokenExtensions {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTokenMetadata {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub logo_uri: Option<String>,
    #[serde(default)]
    pub extensions: Option<ApiTokenExtensions>,
}

impl From<ApiTokenMetadata> for TokenMetadata {
    fn from(api: ApiTokenMetadata) -> Self {
        let extensions = api.extensions.unwrap_or_default();
        TokenMetadata {
            name: api.name,
            symbol: api.symbol,
            decimals: api.decimals,
            logo_uri: api.logo_uri,
            website: extensions.website,
            twitter: extensions.twitter,
            description: extensions.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Price / volume (defi/price_volume/multi)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPriceVolume {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "updateUnixTime")]
    pub update_unix_time: Option<i64>,
    #[serde(default, alias = "volumeUSD")]
    pub volume_usd: Option<f64>,
    #[serde(default, alias = "volumeChangePercent")]
    pub volume_change_percent: Option<f64>,
    #[serde(default, alias = "priceChangePercent")]
    pub price_change_percent: Option<f64>,
}

impl From<ApiPriceVolume> for PriceInfo {
    fn from(api: ApiPriceVolume) -> Self {
        PriceInfo {
            price: api.price,
            price_change_percent: api.price_change_percent,
            volume_usd: api.volume_usd,
            volume_change_percent: api.volume_change_percent,
            price_updated_at: api.update_unix_time,
        }
    }
}

/// Request body for the price/volume endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PriceVolumeRequest<'a> {
    pub list_address: String,
    #[serde(rename = "type")]
    pub timeframe: &'a str,
}
