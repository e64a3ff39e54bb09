use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for the traders table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Trader {
    pub date_added: Option<DateTime<Utc>>,
    pub address: String,
    pub category: String,
    pub freq: Option<i64>,
}
