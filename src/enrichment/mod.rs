//! Left-joins token metadata and price data onto scored tokens.
//!
//! Lookups run in fixed-size address batches. A failed batch is logged and
//! contributes no entries; it never drops a token or fails the request.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use metrics::counter;

use crate::birdeye::BirdeyeClient;
use crate::models::{PriceInfo, RankedToken, TokenMetadata, TokenScore};

pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Timeframe requested from the price/volume service.
const PRICE_TIMEFRAME: &str = "24h";

/// Keyed batch lookup against an external token service.
#[async_trait]
pub trait TokenLookup<T>: Send + Sync {
    /// Short name used in logs and metric labels.
    fn service_name(&self) -> &'static str;

    /// Look up one batch of addresses. Addresses without data are simply
    /// absent from the returned map.
    async fn lookup(&self, addresses: &[String]) -> anyhow::Result<HashMap<String, T>>;
}

#[async_trait]
impl TokenLookup<TokenMetadata> for BirdeyeClient {
    fn service_name(&self) -> &'static str {
        "metadata"
    }

    async fn lookup(&self, addresses: &[String]) -> anyhow::Result<HashMap<String, TokenMetadata>> {
        let items = self.token_metadata_multiple(addresses).await?;
        Ok(items.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[async_trait]
impl TokenLookup<PriceInfo> for BirdeyeClient {
    fn service_name(&self) -> &'static str {
        "price_volume"
    }

    async fn lookup(&self, addresses: &[String]) -> anyhow::Result<HashMap<String, PriceInfo>> {
        let items = self.price_volume_multi(addresses, PRICE_TIMEFRAME).await?;
        Ok(items.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Trim, drop blanks, dedupe and sort addresses.
pub fn normalize_addresses<'a>(addresses: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    addresses
        .into_iter()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Run every batch concurrently and merge the successful ones. All batches
/// complete before the merge.
pub async fn lookup_in_batches<T>(
    source: &dyn TokenLookup<T>,
    addresses: &[String],
    batch_size: usize,
) -> HashMap<String, T> {
    let batches: Vec<&[String]> = addresses.chunks(batch_size.max(1)).collect();
    let total = batches.len();
    let service = source.service_name();

    let results = join_all(batches.iter().map(|batch| source.lookup(batch))).await;

    let mut merged = HashMap::new();
    for (idx, result) in results.into_iter().enumerate() {
        counter!("enrichment_batches_total", "service" => service).increment(1);
        match result {
            Ok(entries) => {
                tracing::debug!(
                    service,
                    batch = idx + 1,
                    total,
                    found = entries.len(),
                    "Enrichment batch complete"
                );
                merged.extend(entries);
            }
            Err(e) => {
                counter!("enrichment_batch_failures_total", "service" => service).increment(1);
                tracing::error!(
                    service,
                    batch = idx + 1,
                    total,
                    size = batches[idx].len(),
                    error = %e,
                    "Enrichment batch failed, continuing without its data"
                );
            }
        }
    }

    merged
}

/// Metadata and price lookups bundled with the batch size.
#[derive(Clone)]
pub struct Enricher {
    metadata: Arc<dyn TokenLookup<TokenMetadata>>,
    prices: Arc<dyn TokenLookup<PriceInfo>>,
    batch_size: usize,
}

impl Enricher {
    pub fn new(
        metadata: Arc<dyn TokenLookup<TokenMetadata>>,
        prices: Arc<dyn TokenLookup<PriceInfo>>,
        batch_size: usize,
    ) -> Self {
        Self {
            metadata,
            prices,
            batch_size: batch_size.max(1),
        }
    }

    /// Use one Birdeye client for both services.
    pub fn birdeye(client: BirdeyeClient, batch_size: usize) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client, batch_size)
    }

    /// Attach enrichment to every score, preserving rank order.
    pub async fn enrich(&self, scores: Vec<TokenScore>) -> Vec<RankedToken> {
        let addresses = normalize_addresses(scores.iter().map(|s| s.token_address.as_str()));
        if addresses.is_empty() {
            return scores
                .into_iter()
                .map(|s| RankedToken::new(s, None, None))
                .collect();
        }

        tracing::info!(
            addresses = addresses.len(),
            batch_size = self.batch_size,
            "Enriching ranked tokens"
        );

        let (metadata, prices) = tokio::join!(
            lookup_in_batches(self.metadata.as_ref(), &addresses, self.batch_size),
            lookup_in_batches(self.prices.as_ref(), &addresses, self.batch_size),
        );

        scores
            .into_iter()
            .map(|score| {
                let key = score.token_address.trim();
                // Tokens may share an address; clone rather than take.
                let meta = metadata.get(key).cloned();
                let price = prices.get(key).cloned();
                RankedToken::new(score, meta, price)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_addresses() {
        let raw = vec![" b ", "a", "", "b", "   ", "c"];
        assert_eq!(normalize_addresses(raw), vec!["a", "b", "c"]);
    }
}
