use std::env;

use chrono::Duration;

use crate::birdeye::client::{BIRDEYE_API_BASE, DEFAULT_CHAIN};
use crate::enrichment::DEFAULT_BATCH_SIZE;
use crate::scoring::{MetricWeights, WindowSet, DEFAULT_WINDOWS};

const DEFAULT_LOOKBACK_PADDING_HOURS: i64 = 6;

/// Parameters of the scoring pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub windows: WindowSet,
    pub weights: MetricWeights,
    /// History fetched beyond the longest window's target, so its
    /// backward match can land on a snapshot slightly before the target.
    pub lookback_padding: Duration,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            windows: WindowSet::default(),
            weights: MetricWeights::default(),
            lookback_padding: Duration::hours(DEFAULT_LOOKBACK_PADDING_HOURS),
        }
    }
}

impl ScoringConfig {
    /// Full span of history one ranking needs, counted back from the
    /// category's latest snapshot.
    pub fn history_span(&self) -> Duration {
        self.windows.max_duration() + self.lookback_padding
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Bearer token for `/api/*`. Unset disables authentication.
    pub api_token: Option<String>,

    // Birdeye enrichment
    pub birdeye_api_key: String,
    pub birdeye_base_url: String,
    pub birdeye_chain: String,
    pub enrichment_batch_size: usize,

    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let windows: WindowSet = env::var("SCORING_WINDOWS")
            .unwrap_or_else(|_| DEFAULT_WINDOWS.into())
            .parse()?;

        let padding_hours: i64 = env::var("SNAPSHOT_LOOKBACK_PADDING_HOURS")
            .unwrap_or_else(|_| DEFAULT_LOOKBACK_PADDING_HOURS.to_string())
            .parse()?;
        if padding_hours < 0 {
            anyhow::bail!("SNAPSHOT_LOOKBACK_PADDING_HOURS must not be negative");
        }
        let lookback_padding = Duration::try_hours(padding_hours)
            .ok_or_else(|| anyhow::anyhow!("SNAPSHOT_LOOKBACK_PADDING_HOURS out of range"))?;

        let enrichment_batch_size: usize = env::var("ENRICHMENT_BATCH_SIZE")
            .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
            .parse()?;
        if enrichment_batch_size == 0 {
            anyhow::bail!("ENRICHMENT_BATCH_SIZE must be at least 1");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),

            birdeye_api_key: env::var("BIRDEYE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| anyhow::anyhow!("BIRDEYE_API_KEY must be set"))?,
            birdeye_base_url: env::var("BIRDEYE_BASE_URL")
                .unwrap_or_else(|_| BIRDEYE_API_BASE.into()),
            birdeye_chain: env::var("BIRDEYE_CHAIN").unwrap_or_else(|_| DEFAULT_CHAIN.into()),
            enrichment_batch_size,

            scoring: ScoringConfig {
                windows,
                weights: MetricWeights::default(),
                lookback_padding,
            },
        })
    }
}
