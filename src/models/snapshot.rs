use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for the trader_portfolio_agg table: aggregate holdings of
/// tracked traders for one token at one fetch instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Snapshot {
    pub token_symbol: String,
    pub token_address: String,
    pub category: String,
    pub total_value_usd: Option<Decimal>,
    pub total_balance: Option<Decimal>,
    pub trader_count: Option<i64>,
    pub fetch_date: DateTime<Utc>,
}
