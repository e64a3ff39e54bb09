use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::Decimal;

use momentum_ranker::config::{AppConfig, ScoringConfig};
use momentum_ranker::db::PortfolioStore;
use momentum_ranker::enrichment::{Enricher, TokenLookup};
use momentum_ranker::models::{PriceInfo, Snapshot, TokenMetadata, Trader};
use momentum_ranker::AppState;

/// Fixed origin for snapshot timestamps.
#[allow(dead_code)]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Build a snapshot `hour` hours after `base_time()`.
#[allow(dead_code)]
pub fn snapshot(symbol: &str, category: &str, hour: i64, balance: i64, traders: i64) -> Snapshot {
    Snapshot {
        token_symbol: symbol.into(),
        token_address: format!("{symbol}_mint"),
        category: category.into(),
        total_value_usd: Some(Decimal::from(balance * 3)),
        total_balance: Some(Decimal::from(balance)),
        trader_count: Some(traders),
        fetch_date: base_time() + Duration::hours(hour),
    }
}

/// In-memory portfolio warehouse.
#[derive(Default)]
pub struct MemoryStore {
    pub snapshots: Vec<Snapshot>,
    pub traders: Vec<Trader>,
    pub fail: bool,
    pub queried_min_dates: Mutex<Vec<Option<DateTime<Utc>>>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn with_snapshots(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("warehouse unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }

    async fn latest_fetch_date(&self, category: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
        self.check()?;
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.fetch_date)
            .max())
    }

    async fn query_snapshots(
        &self,
        category: &str,
        min_fetch_date: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<Snapshot>> {
        self.check()?;
        self.queried_min_dates.lock().unwrap().push(min_fetch_date);
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.category == category)
            .filter(|s| min_fetch_date.map_or(true, |min| s.fetch_date >= min))
            .cloned()
            .collect())
    }

    async fn category_trader_addresses(&self, category: &str) -> anyhow::Result<Vec<String>> {
        self.check()?;
        Ok(self
            .traders
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.address.clone())
            .collect())
    }

    async fn top_trader_addresses(&self, category: &str, limit: i64) -> anyhow::Result<Vec<String>> {
        self.check()?;
        let mut traders: Vec<&Trader> = self.traders.iter().filter(|t| t.category == category).collect();
        traders.sort_by(|a, b| b.freq.cmp(&a.freq).then_with(|| a.address.cmp(&b.address)));
        Ok(traders
            .into_iter()
            .take(limit as usize)
            .map(|t| t.address.clone())
            .collect())
    }

    async fn trader_details(&self, addresses: &[String]) -> anyhow::Result<Vec<Trader>> {
        self.check()?;
        let mut traders: Vec<Trader> = self
            .traders
            .iter()
            .filter(|t| addresses.contains(&t.address))
            .cloned()
            .collect();
        traders.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(traders)
    }
}

/// Lookup fake returning fixed entries. Batches containing `fail_on` error out.
pub struct StaticLookup<T> {
    pub name: &'static str,
    pub entries: HashMap<String, T>,
    pub fail_on: Option<String>,
    pub batch_sizes: Mutex<Vec<usize>>,
}

#[allow(dead_code)]
impl<T> StaticLookup<T> {
    pub fn new(name: &'static str, entries: HashMap<String, T>) -> Self {
        Self {
            name,
            entries,
            fail_on: None,
            batch_sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self::new(name, HashMap::new())
    }

    pub fn failing_on(mut self, address: &str) -> Self {
        self.fail_on = Some(address.into());
        self
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> TokenLookup<T> for StaticLookup<T> {
    fn service_name(&self) -> &'static str {
        self.name
    }

    async fn lookup(&self, addresses: &[String]) -> anyhow::Result<HashMap<String, T>> {
        self.batch_sizes.lock().unwrap().push(addresses.len());
        if let Some(fail_on) = &self.fail_on {
            if addresses.contains(fail_on) {
                anyhow::bail!("upstream returned 500");
            }
        }
        Ok(addresses
            .iter()
            .filter_map(|a| self.entries.get(a).map(|v| (a.clone(), v.clone())))
            .collect())
    }
}

#[allow(dead_code)]
pub fn metadata(name: &str) -> TokenMetadata {
    TokenMetadata {
        name: Some(name.into()),
        symbol: Some(name.to_uppercase()),
        decimals: Some(6),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn price(value: f64) -> PriceInfo {
    PriceInfo {
        price: Some(value),
        volume_usd: Some(value * 1_000.0),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn enricher(
    metadata: StaticLookup<TokenMetadata>,
    prices: StaticLookup<PriceInfo>,
    batch_size: usize,
) -> Enricher {
    Enricher::new(Arc::new(metadata), Arc::new(prices), batch_size)
}

#[allow(dead_code)]
pub fn test_config(api_token: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        api_token: api_token.map(String::from),
        birdeye_api_key: "test-key".into(),
        birdeye_base_url: "http://localhost".into(),
        birdeye_chain: "solana".into(),
        enrichment_batch_size: 100,
        scoring: ScoringConfig::default(),
    }
}

/// App state over the given store with empty enrichment services.
#[allow(dead_code)]
pub fn test_state(store: MemoryStore, api_token: Option<&str>) -> AppState {
    AppState {
        store: Arc::new(store),
        enricher: enricher(
            StaticLookup::empty("metadata"),
            StaticLookup::empty("price_volume"),
            100,
        ),
        config: test_config(api_token),
        metrics_handle: PrometheusBuilder::new().build_recorder().handle(),
    }
}
