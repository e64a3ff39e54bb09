use std::collections::HashMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{AddressMap, ApiPriceVolume, ApiTokenMetadata, BirdeyeEnvelope, PriceVolumeRequest};

pub const BIRDEYE_API_BASE: &str = "https://public-api.birdeye.so";
pub const DEFAULT_CHAIN: &str = "solana";

#[derive(Debug, Error)]
pub enum BirdeyeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request unsuccessful: {0}")]
    Unsuccessful(String),
}

/// Client for the Birdeye public API: token metadata and price/volume data.
#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    http: Client,
    base_url: String,
    api_key: String,
    chain: String,
}

impl BirdeyeClient {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: BIRDEYE_API_BASE.into(),
            api_key: api_key.into(),
            chain: DEFAULT_CHAIN.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = chain.into();
        self
    }

    /// Metadata for up to one batch of token addresses. Addresses the API
    /// does not know are absent from the returned map.
    pub async fn token_metadata_multiple(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, ApiTokenMetadata>, BirdeyeError> {
        let url = format!("{}/defi/v3/token/meta-data/multiple", self.base_url);
        let list_address = addresses.join(",");
        tracing::debug!(url = %url, count = addresses.len(), "Birdeye metadata request");

        let resp = self
            .http
            .get(&url)
            .header("accept", "application/json")
            .header("X-API-KEY", &self.api_key)
            .header("x-chain", &self.chain)
            .query(&[("list_address", list_address.as_str())])
            .send()
            .await?
            .error_for_status()?;

        unwrap_envelope(resp).await
    }

    /// Price and volume over `timeframe` (e.g. `24h`) for a batch of addresses.
    pub async fn price_volume_multi(
        &self,
        addresses: &[String],
        timeframe: &str,
    ) -> Result<HashMap<String, ApiPriceVolume>, BirdeyeError> {
        let url = format!("{}/defi/price_volume/multi", self.base_url);
        let body = PriceVolumeRequest {
            list_address: addresses.join(","),
            timeframe,
        };
        tracing::debug!(url = %url, count = addresses.len(), "Birdeye price/volume request");

        let resp = self
            .http
            .post(&url)
            .header("accept", "application/json")
            .header("X-API-KEY", &self.api_key)
            .header("x-chain", &self.chain)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        unwrap_envelope(resp).await
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<HashMap<String, T>, BirdeyeError> {
    let envelope: BirdeyeEnvelope<AddressMap<T>> = resp.json().await?;
    if !envelope.success {
        return Err(BirdeyeError::Unsuccessful(
            envelope.message.unwrap_or_else(|| "no message".into()),
        ));
    }

    Ok(envelope
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(address, item)| item.map(|item| (address, item)))
        .collect())
}
