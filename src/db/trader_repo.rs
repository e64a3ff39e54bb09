use sqlx::PgPool;

use crate::models::Trader;

/// All trader addresses tracked for a category.
pub async fn get_addresses(pool: &PgPool, category: &str) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT address FROM traders WHERE category = $1 ORDER BY address",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// The `limit` most frequently seen traders of a category.
pub async fn get_top_addresses_by_frequency(
    pool: &PgPool,
    category: &str,
    limit: i64,
) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT address
        FROM traders
        WHERE category = $1
        ORDER BY freq DESC NULLS LAST, address
        LIMIT $2
        "#,
    )
    .bind(category)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Trader rows for the given addresses, ordered by address.
pub async fn get_trader_details(pool: &PgPool, addresses: &[String]) -> anyhow::Result<Vec<Trader>> {
    if addresses.is_empty() {
        return Ok(Vec::new());
    }

    let traders = sqlx::query_as::<_, Trader>(
        r#"
        SELECT date_added, address, category, freq
        FROM traders
        WHERE address = ANY($1)
        ORDER BY address
        "#,
    )
    .bind(addresses)
    .fetch_all(pool)
    .await?;

    Ok(traders)
}
