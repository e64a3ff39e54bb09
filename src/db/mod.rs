pub mod snapshot_repo;
pub mod trader_repo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{Snapshot, Trader};

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Read-only view of the portfolio warehouse consumed by the ranking and
/// trader endpoints.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Cheap connectivity probe.
    async fn ping(&self) -> anyhow::Result<()>;

    async fn latest_fetch_date(&self, category: &str) -> anyhow::Result<Option<DateTime<Utc>>>;

    async fn query_snapshots(
        &self,
        category: &str,
        min_fetch_date: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<Snapshot>>;

    async fn category_trader_addresses(&self, category: &str) -> anyhow::Result<Vec<String>>;

    async fn top_trader_addresses(&self, category: &str, limit: i64) -> anyhow::Result<Vec<String>>;

    async fn trader_details(&self, addresses: &[String]) -> anyhow::Result<Vec<Trader>>;
}

/// [`PortfolioStore`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgPortfolioStore {
    pool: PgPool,
}

impl PgPortfolioStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn latest_fetch_date(&self, category: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
        snapshot_repo::get_max_fetch_date(&self.pool, category).await
    }

    async fn query_snapshots(
        &self,
        category: &str,
        min_fetch_date: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<Snapshot>> {
        snapshot_repo::get_snapshots(&self.pool, category, min_fetch_date).await
    }

    async fn category_trader_addresses(&self, category: &str) -> anyhow::Result<Vec<String>> {
        trader_repo::get_addresses(&self.pool, category).await
    }

    async fn top_trader_addresses(&self, category: &str, limit: i64) -> anyhow::Result<Vec<String>> {
        trader_repo::get_top_addresses_by_frequency(&self.pool, category, limit).await
    }

    async fn trader_details(&self, addresses: &[String]) -> anyhow::Result<Vec<Trader>> {
        trader_repo::get_trader_details(&self.pool, addresses).await
    }
}
