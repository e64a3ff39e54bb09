use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::Snapshot;

/// Most recent fetch instant recorded for a category.
pub async fn get_max_fetch_date(
    pool: &PgPool,
    category: &str,
) -> anyhow::Result<Option<DateTime<Utc>>> {
    let row: (Option<DateTime<Utc>>,) = sqlx::query_as(
        "SELECT MAX(fetch_date) FROM trader_portfolio_agg WHERE category = $1",
    )
    .bind(category)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Fetch a category's snapshots, optionally bounded below by `min_fetch_date`,
/// ordered by token then time.
pub async fn get_snapshots(
    pool: &PgPool,
    category: &str,
    min_fetch_date: Option<DateTime<Utc>>,
) -> anyhow::Result<Vec<Snapshot>> {
    let snapshots = sqlx::query_as::<_, Snapshot>(
        r#"
        SELECT token_symbol, token_address, category, total_value_usd,
               total_balance, trader_count, fetch_date
        FROM trader_portfolio_agg
        WHERE category = $1
          AND ($2::timestamptz IS NULL OR fetch_date >= $2)
        ORDER BY token_symbol, fetch_date
        "#,
    )
    .bind(category)
    .bind(min_fetch_date)
    .fetch_all(pool)
    .await?;

    Ok(snapshots)
}
